use crate::content::Content;
use crate::value::Value;
pub use serde_json::Value as JsonValue;


impl<C: Content> From<&JsonValue> for Value<C> {
    fn from(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default())
            },
            JsonValue::String(s) => Value::Text(s.clone()),
            JsonValue::Array(seq) =>
                Value::Sequence(
                    seq.iter()
                        .map(Value::from)
                        .collect::<_>()
                ),
            JsonValue::Object(obj) =>
                Value::Record(
                    obj.iter()
                        .map(|(key, value)| (key.clone(), Value::from(value)))
                        .collect::<_>()
                )
        }
    }
}
