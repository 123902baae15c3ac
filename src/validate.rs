//! Request payload validation, mirroring the signup/signin/user schemas.

pub fn email(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let parts: Vec<&str> = value.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Password length bounds shared by signup and user creation.
pub fn password(value: &str) -> Result<(), String> {
    if value.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if value.len() > 100 {
        return Err("Password must be at most 100 characters".to_string());
    }
    Ok(())
}

pub fn name(value: &str, max: usize) -> Result<(), String> {
    if value.len() < 2 {
        return Err("Name must be at least 2 characters".to_string());
    }
    if value.len() > max {
        return Err(format!("Name must be at most {} characters", max));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_plain_addresses() {
        assert!(email("a@x.com").is_ok());
        assert!(email("first.last@sub.example.org").is_ok());
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for bad in ["", "a", "a@", "@x.com", "a@xcom", "a@b@c.com"] {
            assert!(email(bad).is_err(), "expected rejection for {:?}", bad);
        }
    }

    #[test]
    fn password_enforces_length_bounds() {
        assert!(password("longenough1").is_ok());
        assert!(password("short").is_err());
        assert!(password(&"p".repeat(101)).is_err());
    }

    #[test]
    fn name_enforces_length_bounds() {
        assert!(name("Al", 20).is_ok());
        assert!(name("A", 20).is_err());
        assert!(name(&"n".repeat(21), 20).is_err());
    }
}
