//! Learning materials attached to a step

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Medium of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Inline prose; the `url` column holds the body
    Text,
    Image,
    /// The `url` column holds a JSON search descriptor, see [`VideoSearch`]
    Video,
    Reference,
    Practice,
    /// Any tag this client does not know how to show
    #[serde(other)]
    Unknown,
}

/// A row from the step resources table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResource {
    pub id: Uuid,
    pub step_id: Uuid,
    pub title: String,
    pub url: String,
    pub resource_type: ResourceType,
}

/// Video search descriptor stored in a video resource's `url`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSearch {
    pub query: String,
    pub channel: Option<String>,
}

impl VideoSearch {
    /// Decode a descriptor such as `{"query": "rust lifetimes", "channel": "Jon Gjengset"}`
    ///
    /// Returns `None` when the payload is not JSON or has no usable `query`.
    pub fn decode(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let query = match value.get("query")? {
            Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let channel = value
            .get("channel")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Some(Self { query, channel })
    }

    /// Text submitted to the video site's search
    pub fn search_terms(&self) -> String {
        match &self.channel {
            Some(channel) => format!("{} {}", self.query, channel),
            None => self.query.clone(),
        }
    }
}
