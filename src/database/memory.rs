use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use super::{bson_to_json, Collection, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome};

/// In-process store with the same equality-filter semantics as the MongoDB one.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// A null filter value also matches documents that lack the field, as in MongoDB.
fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| match document.get(key) {
        Some(actual) => actual == expected,
        None => *expected == Bson::Null,
    })
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn find(&self, collection: Collection, filter: Document) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|documents| documents.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: Collection, filter: Document) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: Collection, mut document: Document) -> Result<InsertOutcome, StoreError> {
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        let inserted_id = document.get("_id").cloned().unwrap_or(Bson::Null);

        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().push(document);

        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: bson_to_json(inserted_id),
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|d| matches(d, &filter)));

        let (matched_count, modified_count) = match target {
            Some(document) => {
                let changed = fields.iter().any(|(key, value)| document.get(key) != Some(value));
                for (key, value) in fields {
                    document.insert(key, value);
                }
                (1, u64::from(changed))
            }
            None => (0, 0),
        };

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Document) -> Result<DeleteOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let deleted_count = match collections.get_mut(&collection) {
            Some(documents) => match documents.iter().position(|d| matches(d, &filter)) {
                Some(index) => {
                    documents.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count,
        })
    }
}

/// Store that answers every call with a database error, as when the cluster is unreachable.
pub struct FailingStore;

fn unreachable_cluster() -> StoreError {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    StoreError::Mongo(mongodb::error::Error::from(io))
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find_all(&self, _collection: Collection) -> Result<Vec<Document>, StoreError> {
        Err(unreachable_cluster())
    }

    async fn find(&self, _collection: Collection, _filter: Document) -> Result<Vec<Document>, StoreError> {
        Err(unreachable_cluster())
    }

    async fn find_one(&self, _collection: Collection, _filter: Document) -> Result<Option<Document>, StoreError> {
        Err(unreachable_cluster())
    }

    async fn insert_one(&self, _collection: Collection, _document: Document) -> Result<InsertOutcome, StoreError> {
        Err(unreachable_cluster())
    }

    async fn update_one(
        &self,
        _collection: Collection,
        _filter: Document,
        _fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        Err(unreachable_cluster())
    }

    async fn delete_one(&self, _collection: Collection, _filter: Document) -> Result<DeleteOutcome, StoreError> {
        Err(unreachable_cluster())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[actix_web::test]
    async fn test_insert_then_find_by_filter() {
        let store = MemoryStore::new();
        store.insert_one(Collection::Cart, doc! { "email": "a@x.com", "name": "Soup" }).await.unwrap();
        store.insert_one(Collection::Cart, doc! { "email": "b@x.com", "name": "Pie" }).await.unwrap();

        let found = store.find(Collection::Cart, doc! { "email": "a@x.com" }).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("name").unwrap(), "Soup");
        assert!(found[0].get_object_id("_id").is_ok());
    }

    #[actix_web::test]
    async fn test_null_filter_matches_missing_field() {
        let store = MemoryStore::new();
        store.insert_one(Collection::Users, doc! { "name": "anonymous" }).await.unwrap();

        let found = store.find_one(Collection::Users, doc! { "email": Bson::Null }).await.unwrap();
        assert!(found.is_some());
    }

    #[actix_web::test]
    async fn test_update_sets_fields() {
        let store = MemoryStore::new();
        let id = ObjectId::new();
        store.insert_one(Collection::Users, doc! { "_id": id, "email": "a@x.com" }).await.unwrap();

        let first = store.update_one(Collection::Users, doc! { "_id": id }, doc! { "role": "admin" }).await.unwrap();
        assert_eq!((first.matched_count, first.modified_count), (1, 1));

        let second = store.update_one(Collection::Users, doc! { "_id": id }, doc! { "role": "admin" }).await.unwrap();
        assert_eq!((second.matched_count, second.modified_count), (1, 0));

        let user = store.find_one(Collection::Users, doc! { "_id": id }).await.unwrap().unwrap();
        assert_eq!(user.get_str("role").unwrap(), "admin");
    }

    #[actix_web::test]
    async fn test_delete_missing_reports_zero() {
        let store = MemoryStore::new();
        let outcome = store.delete_one(Collection::Menu, doc! { "_id": ObjectId::new() }).await.unwrap();
        assert_eq!(outcome.deleted_count, 0);
    }
}
