use serde::{Deserialize, Serialize};

use super::repo_types::FeedbackWithAuthor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackType {
    Suggestion,
    Problem,
    Compliment,
    Other,
}

impl FeedbackType {
    pub const ALL: [FeedbackType; 4] = [
        Self::Suggestion,
        Self::Problem,
        Self::Compliment,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Suggestion => "suggestion",
            Self::Problem => "problem",
            Self::Compliment => "compliment",
            Self::Other => "other",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    #[serde(alias = "type")]
    pub feedback_type: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub feedback_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackPage {
    pub feedbacks: Vec<FeedbackWithAuthor>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Confirmation returned to the author; the stored row stays admin-only.
#[derive(Debug, Serialize)]
pub struct FeedbackCreated {
    pub id: i64,
    pub message: &'static str,
}

impl FeedbackCreated {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            message: "feedback sent",
        }
    }
}
