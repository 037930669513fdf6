use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Account classification. Carries no authorization behavior; the wire
/// field is named `type`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// User record held by the credential store, keyed by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,             // unique primary key, case-sensitive
    pub email: String,                // unique across all records
    #[serde(rename = "type")]
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_salt: String,        // opaque, generated at registration
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 PHC string, not exposed in JSON
    pub created_at: OffsetDateTime,   // creation timestamp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_exact_values_only() {
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn record_serialization_omits_salt_and_hash() {
        let record = UserRecord {
            username: "alice".into(),
            email: "alice@x.com".into(),
            role: Role::User,
            password_salt: "salt".into(),
            password_hash: "hash".into(),
            created_at: OffsetDateTime::now_utc(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("alice@x.com"));
        assert!(json.contains("\"type\":\"user\""));
        assert!(!json.contains("salt"));
        assert!(!json.contains("hash"));
    }
}
