use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::auth::record::UserRecord;

/// Conflict detected while inserting, under the store's write lock.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InsertError {
    #[error("username is already taken")]
    UsernameTaken,
    #[error("email is already registered")]
    EmailTaken,
}

/// Credential store abstraction injected into the handlers, so a
/// persistent backend can replace the in-memory map without touching
/// handler logic.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup by username.
    async fn find_by_username(&self, username: &str) -> Option<UserRecord>;

    /// Linear scan over all records comparing the email field.
    async fn find_by_email(&self, email: &str) -> Option<UserRecord>;

    /// Add a record keyed by username. Username and email uniqueness are
    /// re-checked atomically with the insert, so two concurrent
    /// registrations cannot both pass the handler's earlier checks and
    /// both land in the store.
    async fn insert(&self, record: UserRecord) -> Result<(), InsertError>;
}

/// Process-lifetime map keyed by username. No persistence, no on-disk
/// representation.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        self.users.read().await.get(username).cloned()
    }

    async fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    async fn insert(&self, record: UserRecord) -> Result<(), InsertError> {
        // Write lock held across both checks and the insert.
        let mut users = self.users.write().await;
        if users.contains_key(&record.username) {
            return Err(InsertError::UsernameTaken);
        }
        if users.values().any(|u| u.email == record.email) {
            return Err(InsertError::EmailTaken);
        }
        users.insert(record.username.clone(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::OffsetDateTime;

    use super::*;
    use crate::auth::record::Role;

    fn record(username: &str, email: &str) -> UserRecord {
        UserRecord {
            username: username.into(),
            email: email.into(),
            role: Role::User,
            password_salt: "salt".into(),
            password_hash: "hash".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn insert_then_find_by_username() {
        let store = MemoryStore::new();
        store.insert(record("alice", "alice@x.com")).await.unwrap();

        let found = store.find_by_username("alice").await.unwrap();
        assert_eq!(found.email, "alice@x.com");
        assert!(store.find_by_username("bob").await.is_none());
    }

    #[tokio::test]
    async fn username_lookup_is_case_sensitive() {
        let store = MemoryStore::new();
        store.insert(record("alice", "alice@x.com")).await.unwrap();

        assert!(store.find_by_username("Alice").await.is_none());
    }

    #[tokio::test]
    async fn find_by_email_scans_all_records() {
        let store = MemoryStore::new();
        store.insert(record("alice", "alice@x.com")).await.unwrap();
        store.insert(record("bob", "bob@x.com")).await.unwrap();

        let found = store.find_by_email("bob@x.com").await.unwrap();
        assert_eq!(found.username, "bob");
        assert!(store.find_by_email("carol@x.com").await.is_none());
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_username() {
        let store = MemoryStore::new();
        store.insert(record("alice", "alice@x.com")).await.unwrap();

        let err = store
            .insert(record("alice", "other@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err, InsertError::UsernameTaken);

        // Losing insert left the original record untouched.
        let kept = store.find_by_username("alice").await.unwrap();
        assert_eq!(kept.email, "alice@x.com");
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email_under_other_username() {
        let store = MemoryStore::new();
        store.insert(record("alice", "alice@x.com")).await.unwrap();

        let err = store
            .insert(record("bob", "alice@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err, InsertError::EmailTaken);

        store.insert(record("bob", "bob@x.com")).await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_duplicate_registrations_admit_exactly_one() {
        let store = Arc::new(MemoryStore::new());

        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.insert(record("alice", "alice@x.com")).await })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.insert(record("alice", "other@x.com")).await })
        };

        let first = a.await.unwrap();
        let second = b.await.unwrap();
        assert!(first.is_ok() != second.is_ok());
        assert!(store.find_by_username("alice").await.is_some());
    }
}
