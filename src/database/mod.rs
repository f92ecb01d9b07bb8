mod memory;
mod user_store;

pub use memory::MemoryUserStore;
pub use user_store::{MongoUserStore, StoreError, UserStore, USERS_COLLECTION};

use mongodb::{Client, Collection, Database};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, mongodb::error::Error> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        // Fail fast when the server is unreachable
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .rsplit('/')
            .next()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty() && !s.contains(':'))
            .unwrap_or("student_registration");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Unique email index; this is what makes registration race-free.
    async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<mongodb::bson::Document>(USERS_COLLECTION);

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        users.create_index(email_index).await?;
        log::info!("   ✅ Index ready: users(email) unique");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// Picks the store backend from the database URL. `memory://` keeps
/// everything in process and is lost on restart.
pub async fn connect(database_url: &str) -> Result<Arc<dyn UserStore>, mongodb::error::Error> {
    if database_url.starts_with("memory://") {
        log::warn!("⚠️  Using in-memory user store; data will not survive a restart");
        return Ok(Arc::new(MemoryUserStore::new()));
    }

    let db = MongoDB::new(database_url).await?;
    log::info!("✅ MongoDB connected: {}", db.database().name());
    Ok(Arc::new(MongoUserStore::new(&db)))
}
