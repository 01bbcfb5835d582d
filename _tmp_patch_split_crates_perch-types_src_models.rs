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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_uses_camel_case_wire_names() {
        let message = Message {
            id: 7,
            message_text: "hello".to_string(),
            posted_by: 3,
            posted_at: 1_700_000_000_000,
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["messageText"], "hello");
        assert_eq!(value["postedBy"], 3);
        assert_eq!(value["postedAt"], 1_700_000_000_000_i64);
    }

    #[test]
    fn account_serializes_all_fields() {
        let account = Account {
            id: 1,
            username: "alice".to_string(),
            password: "pass1".to_string(),
        };

        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["username"], "alice");
        assert_eq!(value["password"], "pass1");
    }
}

