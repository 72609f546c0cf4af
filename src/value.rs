use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use serde::Serialize;
use crate::content::Content;
use crate::error::Result;
use crate::rich::RichText;


pub type Record<C> = BTreeMap<String, Value<C>>;

type SimpleFn<C> = dyn Fn(&C) -> C;
type FullFn<C> = dyn Fn(&C, &dyn Fn(&C) -> C) -> C;


/// A value a key can resolve to while rendering.
///
/// Host data gets into a template through this closed set of variants:
/// build it directly, convert JSON or YAML, or use
/// [`Value::from_serialize`] on any serializable structure.
pub enum Value<C: Content = String> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Rich(RichText),
    Sequence(Vec<Value<C>>),
    Record(Record<C>),
    Lambda(Lambda<C>),
}


/// A rendering function found in place of a section value.
///
/// It receives the unrendered source of the section. The full form also
/// gets a callback rendering any template source in the current scope.
pub enum Lambda<C: Content = String> {
    Simple(Rc<SimpleFn<C>>),
    Full(Rc<FullFn<C>>),
}

impl<C: Content> Lambda<C> {
    pub(crate) fn call(&self, text: &C, render: &dyn Fn(&C) -> C) -> C {
        match self {
            Lambda::Simple(lambda) => lambda(text),
            Lambda::Full(lambda) => lambda(text, render),
        }
    }
}

impl<C: Content> Clone for Lambda<C> {
    fn clone(&self) -> Self {
        match self {
            Lambda::Simple(lambda) => Lambda::Simple(Rc::clone(lambda)),
            Lambda::Full(lambda) => Lambda::Full(Rc::clone(lambda)),
        }
    }
}

impl<C: Content> PartialEq for Lambda<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Lambda::Simple(a), Lambda::Simple(b)) => Rc::ptr_eq(a, b),
            (Lambda::Full(a), Lambda::Full(b)) => Rc::ptr_eq(a, b),
            _ => false
        }
    }
}

impl<C: Content> fmt::Debug for Lambda<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lambda::Simple(_) => write!(f, "Lambda::Simple {{...}}"),
            Lambda::Full(_) => write!(f, "Lambda::Full {{...}}"),
        }
    }
}


/// How a section treats a truthy value.
#[derive(Debug, PartialEq)]
pub enum Kind<'v, C: Content> {
    /// Rendered once, scope unchanged.
    Scalar,
    /// Rendered once per item, each item in turn becoming the scope.
    Sequence(&'v [Value<C>]),
    /// Rendered once with the record as scope.
    Record(&'v Record<C>),
    Lambda(&'v Lambda<C>),
}


impl<C: Content> Value<C> {
    pub fn simple_lambda<F>(fun: F) -> Self
    where F: Fn(&C) -> C + 'static {
        Value::Lambda(Lambda::Simple(Rc::new(fun)))
    }

    pub fn lambda<F>(fun: F) -> Self
    where F: Fn(&C, &dyn Fn(&C) -> C) -> C + 'static {
        Value::Lambda(Lambda::Full(Rc::new(fun)))
    }

    pub fn record<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value<C>)>,
    {
        Value::Record(
            pairs.into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect()
        )
    }

    /// Converts any serializable host structure, structs becoming records.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value)?;
        Ok(Value::from(&json))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Falsy values are `null`, `false`, zero, the empty text and the empty
    /// sequence; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(text) => !text.is_empty(),
            Value::Rich(rich) => !rich.is_empty(),
            Value::Sequence(items) => !items.is_empty(),
            Value::Record(_) | Value::Lambda(_) => true,
        }
    }

    pub fn classify(&self) -> Kind<'_, C> {
        match self {
            Value::Sequence(items) => Kind::Sequence(items),
            Value::Record(record) => Kind::Record(record),
            Value::Lambda(lambda) => Kind::Lambda(lambda),
            _ => Kind::Scalar,
        }
    }

    /// Member of a record value.
    pub fn get(&self, key: &str) -> Option<&Value<C>> {
        match self {
            Value::Record(record) => record.get(key),
            _ => None
        }
    }
}

impl<C: Content> Clone for Value<C> {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Int(i) => Value::Int(*i),
            Value::Float(f) => Value::Float(*f),
            Value::Text(text) => Value::Text(text.clone()),
            Value::Rich(rich) => Value::Rich(rich.clone()),
            Value::Sequence(items) => Value::Sequence(items.clone()),
            Value::Record(record) => Value::Record(record.clone()),
            Value::Lambda(lambda) => Value::Lambda(lambda.clone()),
        }
    }
}

impl<C: Content> PartialEq for Value<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Rich(a), Value::Rich(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Lambda(a), Value::Lambda(b)) => a == b,
            _ => false
        }
    }
}

impl<C: Content> fmt::Debug for Value<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b:?})"),
            Value::Int(i) => write!(f, "Int({i:?})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Text(text) => write!(f, "Text({text:?})"),
            Value::Rich(rich) => write!(f, "Rich({rich:?})"),
            Value::Sequence(items) => f.debug_list().entries(items).finish(),
            Value::Record(record) => f.debug_map().entries(record).finish(),
            Value::Lambda(lambda) => fmt::Debug::fmt(lambda, f),
        }
    }
}

/// Text form of a value, as a tag renders it.
impl<C: Content> fmt::Display for Value<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Record(_) | Value::Lambda(_) => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(text) => f.write_str(text),
            Value::Rich(rich) => write!(f, "{rich}"),
            Value::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}


impl<C: Content> From<&str> for Value<C> {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl<C: Content> From<String> for Value<C> {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl<C: Content> From<bool> for Value<C> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<C: Content> From<i32> for Value<C> {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl<C: Content> From<i64> for Value<C> {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl<C: Content> From<f64> for Value<C> {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<C: Content> From<RichText> for Value<C> {
    fn from(rich: RichText) -> Self {
        Value::Rich(rich)
    }
}

impl<C: Content, T: Into<Value<C>>> From<Vec<T>> for Value<C> {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<C: Content> From<Record<C>> for Value<C> {
    fn from(record: Record<C>) -> Self {
        Value::Record(record)
    }
}
