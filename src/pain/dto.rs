use serde::{Deserialize, Serialize};

use super::repo_types::PainRecord;

#[derive(Debug, Deserialize)]
pub struct CreatePainRecordRequest {
    pub body_parts: Option<Vec<String>>,
    /// Kept as a raw JSON number so fractional values can be told apart from
    /// integers and rejected with a precise message.
    pub intensity: Option<serde_json::Number>,
    pub description: Option<String>,
    pub record_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePainRecordRequest {
    pub body_parts: Option<Vec<String>>,
    pub intensity: Option<serde_json::Number>,
    pub description: Option<String>,
    pub record_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecordList {
    pub records: Vec<PainRecord>,
}
