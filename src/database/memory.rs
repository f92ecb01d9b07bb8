use super::user_store::{StoreError, UserStore};
use crate::models::User;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process store keyed by user id.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn delete(&self, id: &str) {
        self.users.write().await.remove(id);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        users.insert(user.user_id(), user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if let Some(existing) = users.get_mut(&user.user_id()) {
            *existing = user.clone();
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new("Test".into(), email.into(), "hash".into())
    }

    #[tokio::test]
    async fn create_enforces_unique_email() {
        let store = MemoryUserStore::new();
        store.create(user("a@x.com")).await.unwrap();

        let err = store.create(user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));

        // Case-sensitive as stored
        assert!(store.create(user("A@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn save_persists_course_changes() {
        let store = MemoryUserStore::new();
        let mut created = store.create(user("a@x.com")).await.unwrap();

        created.add_course("CS101");
        store.save(&created).await.unwrap();

        let found = store.find_by_id(&created.user_id()).await.unwrap().unwrap();
        assert_eq!(found.courses, vec!["CS101"]);
        assert_eq!(
            store.find_by_email("a@x.com").await.unwrap().unwrap().id,
            created.id
        );
    }

    #[tokio::test]
    async fn save_does_not_resurrect_deleted_user() {
        let store = MemoryUserStore::new();
        let created = store.create(user("a@x.com")).await.unwrap();
        store.delete(&created.user_id()).await;

        store.save(&created).await.unwrap();
        assert!(store.find_by_id(&created.user_id()).await.unwrap().is_none());
    }
}
