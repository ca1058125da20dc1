use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in session marker. Credentials are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub signed_in_at: DateTime<Utc>,
}

impl User {
    /// Falls back to the local part of `email` when `name` is blank.
    pub fn new(email: impl Into<String>, name: Option<String>, signed_in_at: DateTime<Utc>) -> Self {
        let email = email.into();
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        Self {
            email,
            name,
            signed_in_at,
        }
    }

    /// First word of the name, or `User` when there is none.
    pub fn display_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("User")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_defaults_to_email_local_part() {
        let user = User::new("ada@example.com", None, Utc::now());
        assert_eq!(user.name, "ada");
        assert_eq!(user.display_name(), "ada");
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let user = User::new("grace@navy.mil", Some("   ".into()), Utc::now());
        assert_eq!(user.name, "grace");
    }

    #[test]
    fn test_display_name_is_first_word() {
        let user = User::new("x@y.z", Some("Ada Lovelace".into()), Utc::now());
        assert_eq!(user.display_name(), "Ada");

        let nameless = User::new("", None, Utc::now());
        assert_eq!(nameless.display_name(), "User");
    }
}
