use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Story arguments keyed by name. Also used for render props and override args.
pub type Args = BTreeMap<String, ArgValue>;

/// Props pushed into a mounted tree.
pub type Props = Args;

/// Deep-mergeable parameter object.
pub type Parameters = serde_json::Map<String, Value>;

/// Globals derived from argType defaults.
pub type Globals = BTreeMap<String, Value>;

/// Named callback carried in args, e.g. an `onClick` output handler.
///
/// Two actions are equal when they share the same handler allocation.
#[derive(Clone)]
pub struct Action {
    name: String,
    handler: Arc<dyn Fn(&Value) + Send + Sync>,
}

impl Action {
    /// Wrap a handler under a display name.
    pub fn new(name: impl Into<String>, handler: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            handler: Arc::new(handler),
        }
    }

    /// Display name of the action.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the handler with an event payload.
    pub fn invoke(&self, payload: &Value) {
        (self.handler)(payload);
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action({})", self.name)
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

/// A single argument value: plain JSON data or a callback.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    /// Serializable data.
    Data(Value),
    /// Callback; serializes as an `[action <name>]` marker.
    Action(Action),
}

impl ArgValue {
    /// Borrow the JSON payload, if this is data.
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Self::Data(v) => Some(v),
            Self::Action(_) => None,
        }
    }

    /// Borrow the callback, if this is an action.
    pub fn as_action(&self) -> Option<&Action> {
        match self {
            Self::Data(_) => None,
            Self::Action(a) => Some(a),
        }
    }

    /// Shortcut for string data.
    pub fn as_str(&self) -> Option<&str> {
        self.as_data().and_then(Value::as_str)
    }
}

impl From<Value> for ArgValue {
    fn from(v: Value) -> Self {
        Self::Data(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        Self::Data(Value::String(v.to_string()))
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        Self::Data(Value::String(v))
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        Self::Data(Value::Bool(v))
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        Self::Data(Value::from(v))
    }
}

impl From<Action> for ArgValue {
    fn from(a: Action) -> Self {
        Self::Action(a)
    }
}

impl serde::Serialize for ArgValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Data(v) => v.serialize(serializer),
            Self::Action(a) => serializer.serialize_str(&format!("[action {}]", a.name)),
        }
    }
}

impl<'de> serde::Deserialize<'de> for ArgValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::Data)
    }
}

/// Build an [`Args`] map from `(name, value)` pairs.
pub fn args<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Args
where
    K: Into<String>,
    V: Into<ArgValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
