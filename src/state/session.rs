use serde::{Deserialize, Serialize};

use crate::client::ClientHandle;

/// Role of the signed-in user within the active course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Staff,
    Admin,
}

/// Authentication and identity data.
///
/// `github_client` is derived from `github_access_token` during hydration and is
/// never serialized; only the raw credential round-trips through storage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub name: Option<String>,
    pub user_id: Option<u64>,
    pub role: Option<Role>,
    pub course_id: Option<u64>,
    pub enable_stories: bool,
    pub github_access_token: Option<String>,
    #[serde(skip)]
    pub github_client: Option<ClientHandle>,
}

impl SessionState {
    /// Whether both backend tokens are present.
    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some() && self.refresh_token.is_some()
    }
}
