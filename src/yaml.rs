use crate::content::Content;
use crate::value::Value;
pub use serde_yaml::Value as YamlValue;


impl<C: Content> From<&YamlValue> for Value<C> {
    fn from(yaml: &YamlValue) -> Self {
        match yaml {
            YamlValue::Null => Value::Null,
            YamlValue::Bool(b) => Value::Bool(*b),
            YamlValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default())
            },
            YamlValue::String(s) => Value::Text(s.clone()),
            YamlValue::Sequence(seq) =>
                Value::Sequence(
                    seq.iter()
                        .map(Value::from)
                        .collect::<_>()
                ),
            YamlValue::Mapping(obj) =>
                Value::Record(
                    obj.iter()
                        .filter_map(|(key, value)| {
                            mapping_key(key).map(|key| (key, Value::from(value)))
                        })
                        .collect::<_>()
                ),
            // tags are a matter for the caller
            YamlValue::Tagged(tagged) => Value::from(&tagged.value)
        }
    }
}

fn mapping_key(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None
    }
}
