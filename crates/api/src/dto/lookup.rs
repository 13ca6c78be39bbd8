use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub json: Option<String>,
}

impl LookupQuery {
    /// `?json=true` (or `1`) switches the response to JSON.
    pub fn wants_json(&self) -> bool {
        matches!(self.json.as_deref(), Some("true") | Some("1"))
    }
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub domains: Vec<String>,
    pub count: usize,
}
