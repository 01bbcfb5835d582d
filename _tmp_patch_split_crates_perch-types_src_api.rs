use serde::Deserialize;

// -- Auth --

/// Fields are optional so an absent or null field reaches validation and
/// comes back as a 400 instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

// -- Messages --

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub message_text: Option<String>,
    #[serde(default)]
    pub posted_by: Option<i64>,
    /// Epoch milliseconds; the server stamps the current time when omitted.
    #[serde(default)]
    pub posted_at: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    #[serde(default)]
    pub message_text: Option<String>,
}
