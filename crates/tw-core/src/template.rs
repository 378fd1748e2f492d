use serde::{Deserialize, Serialize};

/// A named root text object containing embedded `{{reference}}` expressions.
///
/// Rolling a template expands every reference in `text` and returns the
/// composed string plus the attributions gathered along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Identifier, unique within the owning document.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The template text with embedded expressions.
    pub text: String,
    /// Optional result category carried into the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User-defined tags for filtering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Template {
    /// Create a template.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
            result_type: None,
            description: None,
            tags: Vec::new(),
        }
    }

    /// Set the result type.
    pub fn with_result_type(mut self, result_type: impl Into<String>) -> Self {
        self.result_type = Some(result_type.into());
        self
    }
}
