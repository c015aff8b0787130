use serde::{Deserialize, Serialize};

use crate::{auth::dto::PublicUser, pain::repo_types::PainRecord};

#[derive(Debug, Default, Deserialize)]
pub struct UserSearch {
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordLimit {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetAdminRequest {
    pub is_admin: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<PublicUser>,
}

#[derive(Debug, Serialize)]
pub struct UserRecords {
    pub user_id: i64,
    pub records: Vec<PainRecord>,
}
