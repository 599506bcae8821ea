//! Conversions between request/response JSON and stored BSON documents.

use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

use super::StoreError;

/// Renders a BSON value as plain JSON, with object ids as 24-hex strings.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

pub fn json_to_document(body: &Map<String, Value>) -> Result<Document, StoreError> {
    Ok(bson::to_document(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_object_id_rendered_as_hex() {
        let oid = ObjectId::new();
        let rendered = document_to_json(doc! { "_id": oid, "name": "Salad", "price": 12.5 });
        assert_eq!(rendered, json!({ "_id": oid.to_hex(), "name": "Salad", "price": 12.5 }));
    }

    #[test]
    fn test_nested_ids_rendered_as_hex() {
        let oid = ObjectId::new();
        let rendered = document_to_json(doc! { "items": [ { "menuItemId": oid } ] });
        assert_eq!(rendered["items"][0]["menuItemId"], json!(oid.to_hex()));
    }

    #[test]
    fn test_json_body_becomes_document() {
        let body = json!({ "email": "a@x.com", "quantity": 2, "tags": ["vegan"] });
        let document = json_to_document(body.as_object().unwrap()).unwrap();
        assert_eq!(document.get_str("email").unwrap(), "a@x.com");
        assert!(matches!(document.get("quantity"), Some(Bson::Int32(2)) | Some(Bson::Int64(2))));
        assert_eq!(document.get_array("tags").unwrap().len(), 1);
    }
}
