//! Field checks shared by the account and message handlers. Pure functions,
//! no I/O.

use crate::error::ApiError;

/// Checks register and login input. Username is checked before password, so
/// a request failing both reports the username problem.
pub fn validate_credentials<'a>(
    username: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), ApiError> {
    let username = match username {
        Some(u) if !u.trim().is_empty() => u,
        _ => return Err(ApiError::BlankUsername),
    };
    let password = match password {
        Some(p) if p.chars().count() >= 4 => p,
        _ => return Err(ApiError::PasswordTooShort),
    };
    Ok((username, password))
}

/// Checks message text for create and update. Lengths count characters, not
/// bytes, so multibyte text gets the full 255.
pub fn validate_message_text(text: Option<&str>) -> Result<&str, ApiError> {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(ApiError::BlankMessageText),
    };
    if text.chars().count() > 255 {
        return Err(ApiError::MessageTextTooLong);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_username_is_rejected() {
        for username in [None, Some(""), Some("   "), Some("\t\n")] {
            let err = validate_credentials(username, Some("pass1")).unwrap_err();
            assert!(matches!(err, ApiError::BlankUsername));
        }
    }

    #[test]
    fn short_or_missing_password_is_rejected() {
        for password in [None, Some(""), Some("abc")] {
            let err = validate_credentials(Some("alice"), password).unwrap_err();
            assert!(matches!(err, ApiError::PasswordTooShort));
        }
    }

    #[test]
    fn four_character_password_is_the_floor() {
        assert!(validate_credentials(Some("alice"), Some("pass")).is_ok());
        // Four characters even when they are multibyte.
        assert!(validate_credentials(Some("alice"), Some("päss")).is_ok());
    }

    #[test]
    fn blank_username_wins_when_both_fields_are_bad() {
        let err = validate_credentials(Some(" "), Some("x")).unwrap_err();
        assert!(matches!(err, ApiError::BlankUsername));
    }

    #[test]
    fn missing_or_blank_text_is_rejected() {
        for text in [None, Some(""), Some("   ")] {
            let err = validate_message_text(text).unwrap_err();
            assert!(matches!(err, ApiError::BlankMessageText));
        }
    }

    #[test]
    fn text_length_boundary_is_255_characters() {
        let at_limit = "x".repeat(255);
        assert_eq!(validate_message_text(Some(&at_limit)).unwrap(), at_limit);

        let over_limit = "x".repeat(256);
        let err = validate_message_text(Some(&over_limit)).unwrap_err();
        assert!(matches!(err, ApiError::MessageTextTooLong));

        // 255 multibyte characters are more than 255 bytes but still fit.
        let multibyte = "ü".repeat(255);
        assert!(validate_message_text(Some(&multibyte)).is_ok());
    }
}
