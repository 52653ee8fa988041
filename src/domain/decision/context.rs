//! The user-authored context a decision is analyzed against.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// An attachment carried with a decision's context.
///
/// `content` holds base64 for images and raw text otherwise, exactly as
/// ingested by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionFile {
    pub id: String,
    pub name: String,
    pub media_type: String,
    pub content: String,
    pub is_image: bool,
}

/// The dilemma being decided: a title, a free-form description, and any
/// supporting attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<DecisionFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<Timestamp>,
}

impl DecisionContext {
    /// Creates a context with no attachments, stamped now.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            files: Vec::new(),
            date_created: Some(Timestamp::now()),
        }
    }

    /// Adds an attachment.
    pub fn with_file(mut self, file: DecisionFile) -> Self {
        self.files.push(file);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_round_trips_through_json() {
        let context = DecisionContext::new("Relocate the company", "SF vs Austin")
            .with_file(DecisionFile {
                id: "f1".to_string(),
                name: "runway.txt".to_string(),
                media_type: "text/plain".to_string(),
                content: "18 months at current burn".to_string(),
                is_image: false,
            });

        let json = serde_json::to_string(&context).unwrap();
        let back: DecisionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, context);
    }

    #[test]
    fn empty_files_are_omitted_from_json() {
        let context = DecisionContext::new("T", "D");
        let json = serde_json::to_value(&context).unwrap();
        assert!(json.get("files").is_none());
    }
}
