use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// User record held in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
}

/// A write was rejected because another stored user already owns the id or email.
#[derive(Debug, Error)]
#[error("A user with this ID or Email already exists!")]
pub struct DuplicateUser;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Vec<User>;
    async fn find(&self, id: Uuid) -> Option<User>;
    async fn insert(&self, user: User) -> Result<User, DuplicateUser>;
    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        email: String,
    ) -> Result<Option<User>, DuplicateUser>;
    async fn remove(&self, id: Uuid) -> usize;
}

/// In-memory store; lives for the process lifetime, nothing survives restart.
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    async fn find(&self, id: Uuid) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    async fn insert(&self, user: User) -> Result<User, DuplicateUser> {
        // Uniqueness check and insert share the write lock, so two concurrent
        // creates cannot both pass the check.
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.id == user.id || u.email == user.email)
        {
            return Err(DuplicateUser);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        email: String,
    ) -> Result<Option<User>, DuplicateUser> {
        let mut users = self.users.write().await;
        // The record being updated keeps its own email; only a *different*
        // user owning the new email is a conflict.
        if users.iter().any(|u| u.id != id && u.email == email) {
            return Err(DuplicateUser);
        }
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.name = name;
                user.email = email;
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, id: Uuid) -> usize {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        before - users.len()
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: None,
            email: email.into(),
        }
    }

    #[tokio::test]
    async fn insert_then_list_and_find() {
        let store = MemoryStore::new();
        let alice = store.insert(user("alice@example.com")).await.unwrap();
        let bob = store.insert(user("bob@example.com")).await.unwrap();

        assert_eq!(store.list().await.len(), 2);
        assert_eq!(store.find(alice.id).await.unwrap().email, alice.email);
        assert_eq!(store.find(bob.id).await.unwrap().email, bob.email);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = MemoryStore::new();
        let alice = store.insert(user("alice@example.com")).await.unwrap();

        let clash = User {
            id: alice.id,
            name: None,
            email: "other@example.com".into(),
        };
        assert!(store.insert(clash).await.is_err());
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.insert(user("alice@example.com")).await.unwrap();

        assert!(store.insert(user("alice@example.com")).await.is_err());
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn update_overwrites_name_and_email_only() {
        let store = MemoryStore::new();
        let alice = store.insert(user("alice@example.com")).await.unwrap();

        let updated = store
            .update(alice.id, Some("Alice".into()), "new@example.com".into())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, alice.id);
        assert_eq!(updated.name.as_deref(), Some("Alice"));
        assert_eq!(updated.email, "new@example.com");
    }

    #[tokio::test]
    async fn update_keeps_own_email_without_conflict() {
        let store = MemoryStore::new();
        let alice = store.insert(user("alice@example.com")).await.unwrap();

        let updated = store
            .update(alice.id, Some("Alice".into()), "alice@example.com".into())
            .await
            .unwrap();
        assert!(updated.is_some());
    }

    #[tokio::test]
    async fn update_rejects_email_of_another_user() {
        let store = MemoryStore::new();
        store.insert(user("alice@example.com")).await.unwrap();
        let bob = store.insert(user("bob@example.com")).await.unwrap();

        let result = store
            .update(bob.id, None, "alice@example.com".into())
            .await;
        assert!(result.is_err());
        assert_eq!(
            store.find(bob.id).await.unwrap().email,
            "bob@example.com"
        );
    }

    #[tokio::test]
    async fn update_missing_user_returns_none() {
        let store = MemoryStore::new();
        let result = store
            .update(Uuid::new_v4(), None, "ghost@example.com".into())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn remove_missing_user_returns_zero() {
        let store = MemoryStore::new();
        store.insert(user("alice@example.com")).await.unwrap();

        assert_eq!(store.remove(Uuid::new_v4()).await, 0);
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn remove_deletes_every_match() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        // Seed duplicates directly; insert() would refuse them.
        {
            let mut users = store.users.write().await;
            users.push(User {
                id,
                name: None,
                email: "a@example.com".into(),
            });
            users.push(User {
                id,
                name: None,
                email: "b@example.com".into(),
            });
        }

        assert_eq!(store.remove(id).await, 2);
        assert!(store.list().await.is_empty());
    }
}
