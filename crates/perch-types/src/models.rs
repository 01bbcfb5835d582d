use serde::{Deserialize, Serialize};

/// A registered user. The full record, password included, is what the
/// register and login endpoints return as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// A text post attributed to an account via `postedBy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub message_text: String,
    pub posted_by: i64,
    /// Epoch milliseconds. Stamped at insert when the client omits it.
    pub posted_at: i64,
}
