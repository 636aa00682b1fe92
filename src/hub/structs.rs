use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of `GET /api/states`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct HaEntity {
    #[serde(default)]
    pub entity_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, Value>,
    #[serde(default)]
    pub last_updated: String,
}

impl HaEntity {
    /// Attribute as text. Missing and null attributes are empty, other
    /// non-string values are rendered as JSON.
    pub fn attribute(&self, key: &str) -> String {
        match self.attributes.get(key) {
            None | Some(Value::Null) => "".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(v) => v.to_string(),
        }
    }

    /// Like `attribute`, but values that carry nothing (`false`, `0`, `[]`,
    /// `{}`) come back empty. Used for references such as `via_device`.
    pub fn reference_attribute(&self, key: &str) -> String {
        match self.attributes.get(key) {
            Some(Value::Bool(false)) => "".to_string(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => "".to_string(),
            Some(Value::Array(a)) if a.is_empty() => "".to_string(),
            Some(Value::Object(o)) if o.is_empty() => "".to_string(),
            _ => self.attribute(key),
        }
    }
}

/// Body of `POST /api/services/notify/<channel>`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationPayload {
    pub title: String,
    pub message: String,
}
