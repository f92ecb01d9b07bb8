use super::MongoDB;
use crate::models::User;
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::Collection;
use thiserror::Error;

pub const USERS_COLLECTION: &str = "users";

const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        if is_duplicate_key(&e) {
            StoreError::DuplicateEmail
        } else {
            StoreError::Unavailable(e.to_string())
        }
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        &*e.kind,
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

/// Persistence for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Unknown or malformed ids yield `Ok(None)`.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Fails with `DuplicateEmail` if the email is taken.
    async fn create(&self, user: User) -> Result<User, StoreError>;

    /// Overwrites the stored record. Last write wins.
    async fn save(&self, user: &User) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub struct MongoUserStore {
    db: MongoDB,
    users: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            db: db.clone(),
            users: db.collection::<User>(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one(doc! { "email": email }).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let oid = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };
        Ok(self.users.find_one(doc! { "_id": oid }).await?)
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        self.users.insert_one(&user).await?;
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        let result = self.users.replace_one(doc! { "_id": user.id }, user).await?;
        if result.matched_count == 0 {
            log::warn!("⚠️ Save matched no document for user {}", user.user_id());
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongo_store_roundtrip() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/student_registration_test".to_string());

        let db = MongoDB::new(&uri).await.unwrap();
        let store = MongoUserStore::new(&db);

        let email = format!("{}@test.local", ObjectId::new().to_hex());
        let user = User::new("Mongo Test".into(), email.clone(), "hash".into());
        let mut created = store.create(user.clone()).await.unwrap();

        let duplicate = User::new("Other".into(), email.clone(), "hash".into());
        assert!(matches!(store.create(duplicate).await, Err(StoreError::DuplicateEmail)));

        created.add_course("CS101");
        store.save(&created).await.unwrap();

        let found = store.find_by_id(&created.user_id()).await.unwrap().unwrap();
        assert_eq!(found.courses, vec!["CS101"]);
        assert!(store.find_by_id("not-an-object-id").await.unwrap().is_none());
    }
}
