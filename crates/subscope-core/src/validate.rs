// ── Client-side credential validation ──
//
// These checks run before any network call: invalid input never leaves
// the process. The rules mirror the server's own constraints (password
// minimum length 6, at least one letter and one digit), so a passing
// input is never rejected server-side for format reasons.

use crate::error::CoreError;

pub const MSG_INVALID_EMAIL: &str = "Invalid email format";
pub const MSG_INVALID_PASSWORD: &str =
    "Password must be at least 6 characters long, contain at least one letter and one number";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Validate an email address.
///
/// The rule is deliberately loose: non-empty local part, `@`, non-empty
/// host with at least one dot, and no whitespace anywhere.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(CoreError::ValidationFailed {
            message: MSG_INVALID_EMAIL.into(),
        })
    }
}

/// Validate a password: at least 6 characters, only ASCII alphanumerics,
/// with at least one letter and at least one digit.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if is_valid_password(password) {
        Ok(())
    } else {
        Err(CoreError::ValidationFailed {
            message: MSG_INVALID_PASSWORD.into(),
        })
    }
}

/// Validate a registration form: email, password, and confirmation.
///
/// Checks run in order and stop at the first failure, so the message the
/// user sees always names the first broken field.
pub fn validate_registration(
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), CoreError> {
    validate_email(email)?;
    validate_password(password)?;
    if password != confirm {
        return Err(CoreError::ValidationFailed {
            message: MSG_PASSWORD_MISMATCH.into(),
        });
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, host)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || host.contains('@') {
        return false;
    }
    // Host needs a dot with non-empty parts on both sides.
    match host.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn is_valid_password(password: &str) -> bool {
    password.len() >= 6
        && password.chars().all(|c| c.is_ascii_alphanumeric())
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normal_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("a.b+tag@sub.example.co").is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in [
            "",
            "userexample.com",
            "user@",
            "@example.com",
            "user@example",
            "user@@example.com",
            "us er@example.com",
            "user@exa mple.com",
            "user@.com",
            "user@example.",
        ] {
            let err = validate_email(bad).unwrap_err();
            assert_eq!(err.to_string(), MSG_INVALID_EMAIL, "input: {bad:?}");
        }
    }

    #[test]
    fn accepts_valid_passwords() {
        assert!(validate_password("abc123").is_ok());
        assert!(validate_password("1a2b3c4d").is_ok());
        assert!(validate_password("A1bcde").is_ok());
    }

    #[test]
    fn rejects_weak_passwords() {
        // Too short, no digit, no letter, non-alphanumeric characters.
        for bad in ["a1", "abcdef", "123456", "abc 123", "abc123!", ""] {
            let err = validate_password(bad).unwrap_err();
            assert_eq!(err.to_string(), MSG_INVALID_PASSWORD, "input: {bad:?}");
        }
    }

    #[test]
    fn registration_checks_in_order() {
        // Bad email reported before bad password.
        let err = validate_registration("nope", "short", "short").unwrap_err();
        assert_eq!(err.to_string(), MSG_INVALID_EMAIL);

        // Bad password reported before mismatch.
        let err = validate_registration("u@e.com", "short", "other").unwrap_err();
        assert_eq!(err.to_string(), MSG_INVALID_PASSWORD);

        let err = validate_registration("u@e.com", "abc123", "abc124").unwrap_err();
        assert_eq!(err.to_string(), MSG_PASSWORD_MISMATCH);

        assert!(validate_registration("u@e.com", "abc123", "abc123").is_ok());
    }
}
