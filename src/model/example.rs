//! Examples: immutable key→value lookups consumed by features.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// A raw field value of an example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Free text, usually a categorical value
    Text(String),
    /// Real number
    Number(f64),
    /// Integer
    Integer(i64),
    /// Boolean flag
    Bool(bool),
}

impl Value {
    /// Numeric reading of the value, `NaN` when there is none.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Integer(i) => *i as f64,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// An example presented to the tree for training or prediction.
pub trait Example {
    /// Returns the raw value stored under `feature`, if any.
    fn get(&self, feature: &str) -> Option<&Value>;
}

impl<E: Example + ?Sized> Example for &E {
    fn get(&self, feature: &str) -> Option<&Value> {
        (**self).get(feature)
    }
}

impl<S: BuildHasher> Example for HashMap<String, Value, S> {
    fn get(&self, feature: &str) -> Option<&Value> {
        HashMap::get(self, feature)
    }
}

impl Example for BTreeMap<String, Value> {
    fn get(&self, feature: &str) -> Option<&Value> {
        BTreeMap::get(self, feature)
    }
}

/// Map-backed example with a fluent builder.
///
/// ```rust
/// use hoeffding_rust::model::{Example, MapExample, Value};
///
/// let x = MapExample::new().with("outlook", "rainy").with("humidex", 61.0);
/// assert_eq!(x.get("outlook"), Some(&Value::from("rainy")));
/// assert_eq!(x.get("windy"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapExample(BTreeMap<String, Value>);

impl MapExample {
    /// Creates an empty example.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field and returns the example.
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a field.
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    /// Removes a field.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the example has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Example for MapExample {
    fn get(&self, feature: &str) -> Option<&Value> {
        self.0.get(feature)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapExample {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MapExample(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_as_number() {
        assert_eq!(Value::from(2.5).as_number(), 2.5);
        assert_eq!(Value::from(7).as_number(), 7.0);
        assert_eq!(Value::from(true).as_number(), 1.0);
        assert_eq!(Value::from(" 4.25 ").as_number(), 4.25);
        assert!(Value::from("sunny").as_number().is_nan());
    }

    #[test]
    fn test_map_example() {
        let mut x: MapExample = vec![("outlook", "sunny"), ("temp", "hot")].into_iter().collect();
        assert_eq!(x.len(), 2);
        x.insert("hours", 25.0);
        assert_eq!(x.get("hours"), Some(&Value::Number(25.0)));
        assert_eq!(x.remove("temp"), Some(Value::from("hot")));
        assert_eq!(x.get("temp"), None);
    }

    #[test]
    fn test_hashmap_example() {
        let mut x = HashMap::new();
        x.insert("windy".to_string(), Value::Bool(false));
        assert_eq!(Example::get(&x, "windy"), Some(&Value::Bool(false)));
        assert_eq!(Example::get(&&x, "missing"), None);
    }
}
