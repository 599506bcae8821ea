pub mod json;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Database};
use serde::Serialize;
use thiserror::Error;

pub use json::{bson_to_json, document_to_json, json_to_document};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("invalid document: {0}")]
    Encoding(#[from] mongodb::bson::ser::Error),
}

/// The five collections of the bistro database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Menu,
    Reviews,
    Cart,
    Users,
    Reservation,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Menu => "menu",
            Collection::Reviews => "reviews",
            Collection::Cart => "cart",
            Collection::Users => "users",
            Collection::Reservation => "reservation",
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    #[schema(value_type = String)]
    pub inserted_id: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Operations the route handlers need from the document store.
///
/// Filters are plain equality documents (`{ "email": "a@x.com" }`,
/// `{ "_id": ObjectId(..) }`). `update_one` applies `fields` as a `$set`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    async fn find(&self, collection: Collection, filter: Document) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: Collection, filter: Document) -> Result<Option<Document>, StoreError>;

    async fn insert_one(&self, collection: Collection, document: Document) -> Result<InsertOutcome, StoreError>;

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    async fn delete_one(&self, collection: Collection, filter: Document) -> Result<DeleteOutcome, StoreError>;
}

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Pool shared by every actix worker
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        client_options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        let mongodb = Self { client, db };
        mongodb.ping().await?;

        Ok(mongodb)
    }

    /// Round trip to the `admin` database to confirm the deployment is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.client.database("admin").run_command(doc! { "ping": 1 }).await?;
        log::info!("📡 Pinged your deployment. You successfully connected to MongoDB!");
        Ok(())
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection(collection.name())
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        self.find(collection, doc! {}).await
    }

    async fn find(&self, collection: Collection, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(&self, collection: Collection, filter: Document) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_one(&self, collection: Collection, document: Document) -> Result<InsertOutcome, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: bson_to_json(result.inserted_id),
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .await?;
        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result.upserted_id.map(bson_to_json),
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Document) -> Result<DeleteOutcome, StoreError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}
