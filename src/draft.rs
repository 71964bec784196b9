//! Blog post draft model
//!
//! Holds the committed tag selection and the submitted draft payload.

mod tags;

pub use tags::TagSelection;

use serde::Serialize;

/// A finished post as handed back on submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl Draft {
    /// Render the draft as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, crate::error::DraftError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
