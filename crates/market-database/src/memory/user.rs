//! In-memory user store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use market_core::error::AppError;
use market_core::result::AppResult;
use market_core::types::UserId;
use market_entity::user::{CreateUser, User, UserSummary};

use crate::repositories::UserStore;

/// User store kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<UserId, User>>,
    emails: Arc<DashMap<String, UserId>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.emails.get(email).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_many(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.users.get(id).map(|u| u.value().clone()))
            .collect())
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: data.email,
            password_hash: data.password_hash,
            role: data.role,
            created_at: now,
            updated_at: now,
        };

        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => return Err(AppError::conflict("Email already in use")),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_all(&self) -> AppResult<Vec<UserSummary>> {
        let mut users: Vec<UserSummary> =
            self.users.iter().map(|u| u.value().summary()).collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::error::ErrorKind;
    use market_entity::user::UserRole;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Seller,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("alice@example.com")).await.unwrap();

        let by_email = store.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));
        let by_id = store.find_by_id(user.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.email), Some("alice@example.com".to_string()));
    }

    #[tokio::test]
    async fn test_email_is_case_sensitive() {
        let store = MemoryUserStore::new();
        store.create(new_user("alice@example.com")).await.unwrap();
        assert!(store.find_by_email("Alice@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        store.create(new_user("alice@example.com")).await.unwrap();
        let err = store.create(new_user("alice@example.com")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_registers_once() {
        let store = MemoryUserStore::new();
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create(new_user("race@example.com")).await.is_ok()
            }));
        }
        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_find_many_skips_unknown() {
        let store = MemoryUserStore::new();
        let a = store.create(new_user("a@example.com")).await.unwrap();
        let found = store.find_many(&[a.id, UserId::new()]).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_list_all_returns_summaries() {
        let store = MemoryUserStore::new();
        let a = store.create(new_user("a@example.com")).await.unwrap();
        let b = store.create(new_user("b@example.com")).await.unwrap();

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&a.summary()));
        assert!(listed.contains(&b.summary()));
        assert!(listed.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }
}
