use regex::Regex;
use std::sync::OnceLock;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Trim and lower-case an email so lookups and the unique index agree.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Username: 2 to 32 characters after trimming, no control characters.
pub fn validate_username(username: &str) -> Result<(), String> {
    let len = username.trim().chars().count();
    if len < 2 {
        return Err("Username must be at least 2 characters long".to_string());
    }
    if len > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }
    if username.chars().any(char::is_control) {
        return Err("Username contains invalid characters".to_string());
    }
    Ok(())
}

/// Loose syntax check: one `@` with text on both sides and a dot in the domain.
pub fn validate_email(email: &str) -> Result<(), String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles")
    });

    if email.len() > 254 || !re.is_match(email) {
        return Err("Email address is invalid".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        ));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(format!(
            "Password must be at most {MAX_PASSWORD_LEN} characters long"
        ));
    }
    Ok(())
}
