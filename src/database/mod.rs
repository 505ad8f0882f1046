use mongodb::{Client, Collection, Database};
use std::error::Error;

pub const USERS_COLLECTION: &str = "users";
pub const MOVIES_COLLECTION: &str = "allMovies";
pub const MESSAGES_COLLECTION: &str = "messages";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool tuned for a single-process API
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .next_back()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("videoStreamingDB");

        let db = client.database(db_name);

        // Test connection; an unreachable store aborts startup
        db.list_collection_names().await?;

        let mongodb = Self { client, db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the query paths rely on.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("Creating database indexes...");

        // Unique index on users(email): signup duplicates are rejected
        // at the store level even if the pre-insert check races.
        let users = self
            .db
            .collection::<mongodb::bson::Document>(USERS_COLLECTION);

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match users.create_index(email_index).await {
            Ok(_) => log::info!("   Index created: users(email) unique"),
            Err(e) => log::debug!("   Index already exists: {}", e),
        }

        // Index for allMovies(title) - title search routes
        let movies = self
            .db
            .collection::<mongodb::bson::Document>(MOVIES_COLLECTION);

        let title_index = IndexModel::builder().keys(doc! { "title": 1 }).build();

        match movies.create_index(title_index).await {
            Ok(_) => log::info!("   Index created: allMovies(title)"),
            Err(e) => log::debug!("   Index already exists: {}", e),
        }

        // Index for messages(videoId) - per-video message listing
        let messages = self
            .db
            .collection::<mongodb::bson::Document>(MESSAGES_COLLECTION);

        let video_index = IndexModel::builder().keys(doc! { "videoId": 1 }).build();

        match messages.create_index(video_index).await {
            Ok(_) => log::info!("   Index created: messages(videoId)"),
            Err(e) => log::debug!("   Index already exists: {}", e),
        }

        log::info!("Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_connection_and_indexes() {
        dotenv::dotenv().ok();

        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/videoStreamingDB".to_string());

        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
    }
}
