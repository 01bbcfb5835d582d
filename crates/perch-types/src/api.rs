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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_tolerates_missing_and_unknown_fields() {
        let req: CreateMessageRequest =
            serde_json::from_str(r#"{"postedBy": 4, "extra": true}"#).unwrap();
        assert_eq!(req.message_text, None);
        assert_eq!(req.posted_by, Some(4));
        assert_eq!(req.posted_at, None);
    }

    #[test]
    fn register_request_accepts_null_fields() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username": null, "password": "pass1"}"#).unwrap();
        assert_eq!(req.username, None);
        assert_eq!(req.password.as_deref(), Some("pass1"));
    }
}
