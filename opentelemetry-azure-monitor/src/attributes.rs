//! A uniform read-only view over span attributes ([`KeyValue`]) and log
//! record attributes ([`AnyValue`]), so the mapping table handles both.
use opentelemetry::logs::AnyValue;
use opentelemetry::{Array, Key, KeyValue, Value};

/// A borrowed attribute value from either attribute model.
#[derive(Clone, Copy, Debug)]
pub enum AttributeValue<'a> {
    Value(&'a Value),
    Any(&'a AnyValue),
}

impl<'a> AttributeValue<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            AttributeValue::Value(Value::String(s)) => Some(s.as_str()),
            AttributeValue::Any(AnyValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Value(Value::I64(v)) => Some(*v),
            AttributeValue::Any(AnyValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Value(Value::F64(v)) => Some(*v),
            AttributeValue::Any(AnyValue::Double(v)) => Some(*v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Value(Value::Bool(v)) => Some(*v),
            AttributeValue::Any(AnyValue::Boolean(v)) => Some(*v),
            _ => None,
        }
    }

    /// Renders the value as a custom property string.
    ///
    /// Scalars use their default formatting and homogeneous arrays are joined
    /// with `", "`. Values with no property representation yield the name of
    /// their type as the error.
    pub fn to_property_string(&self) -> Result<String, &'static str> {
        match self {
            AttributeValue::Value(value) => value_to_string(value),
            AttributeValue::Any(value) => any_value_to_string(value),
        }
    }
}

fn value_to_string(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::Bool(v) => Ok(v.to_string()),
        Value::I64(v) => Ok(v.to_string()),
        Value::F64(v) => Ok(v.to_string()),
        Value::String(v) => Ok(v.as_str().to_owned()),
        Value::Array(array) => array_to_string(array),
        #[allow(unreachable_patterns)]
        _ => Err("unknown"),
    }
}

fn array_to_string(array: &Array) -> Result<String, &'static str> {
    Ok(match array {
        Array::Bool(values) => join(values.iter()),
        Array::I64(values) => join(values.iter()),
        Array::F64(values) => join(values.iter()),
        Array::String(values) => join(values.iter().map(|v| v.as_str())),
        #[allow(unreachable_patterns)]
        _ => return Err("unknown array"),
    })
}

fn any_value_to_string(value: &AnyValue) -> Result<String, &'static str> {
    match value {
        AnyValue::Int(v) => Ok(v.to_string()),
        AnyValue::Double(v) => Ok(v.to_string()),
        AnyValue::String(v) => Ok(v.as_str().to_owned()),
        AnyValue::Boolean(v) => Ok(v.to_string()),
        AnyValue::ListAny(values) => {
            let rendered = values
                .iter()
                .map(|value| match value {
                    AnyValue::ListAny(_) => Err("nested list"),
                    other => any_value_to_string(other),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rendered.join(", "))
        }
        AnyValue::Bytes(_) => Err("bytes"),
        AnyValue::Map(_) => Err("map"),
        #[allow(unreachable_patterns)]
        _ => Err("unknown"),
    }
}

fn join<T: ToString>(values: impl Iterator<Item = T>) -> String {
    values
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ordered attribute view with typed lookups.
#[derive(Clone, Debug, Default)]
pub struct Attributes<'a> {
    entries: Vec<(&'a str, AttributeValue<'a>)>,
}

impl<'a> Attributes<'a> {
    pub fn from_key_values(attributes: impl IntoIterator<Item = &'a KeyValue>) -> Self {
        Attributes {
            entries: attributes
                .into_iter()
                .map(|kv| (kv.key.as_str(), AttributeValue::Value(&kv.value)))
                .collect(),
        }
    }

    pub fn from_log_attributes(attributes: impl IntoIterator<Item = &'a (Key, AnyValue)>) -> Self {
        Attributes {
            entries: attributes
                .into_iter()
                .map(|(key, value)| (key.as_str(), AttributeValue::Any(value)))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, AttributeValue<'a>)> + '_ {
        self.entries.iter().copied()
    }

    /// Last value recorded under `key`.
    pub fn get(&self, key: &str) -> Option<AttributeValue<'a>> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(|value| value.as_str())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|value| value.as_i64())
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|value| value.as_f64())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|value| value.as_bool())
    }

    /// String under the stable key, else under its older spelling.
    pub fn get_str_either(&self, stable: &str, old: &str) -> Option<&'a str> {
        self.get_str(stable).or_else(|| self.get_str(old))
    }

    pub fn get_i64_either(&self, stable: &str, old: &str) -> Option<i64> {
        self.get_i64(stable).or_else(|| self.get_i64(old))
    }
}
