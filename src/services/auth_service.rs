use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded payload of a verified access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Whatever else the caller put in the payload at issuance.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// HS256 signer/verifier over the shared access-token secret.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Signs `payload` as-is, stamping `iat` and `exp`.
    ///
    /// The payload is not checked against the users collection: whoever calls
    /// `/jwt` gets a token for the email they send.
    pub fn issue(&self, mut payload: Map<String, Value>) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        payload.insert("iat".to_string(), Value::from(now.timestamp()));
        payload.insert("exp".to_string(), Value::from((now + self.ttl).timestamp()));

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_issued_token_verifies() {
        let signer = TokenSigner::new("test-secret", Duration::hours(1));
        let token = signer.issue(payload(json!({ "email": "a@x.com", "name": "Ada" }))).unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.extra.get("name"), Some(&json!("Ada")));
        assert_eq!(claims.exp - claims.iat.unwrap(), 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = TokenSigner::new("test-secret", Duration::hours(-1));
        let token = signer.issue(payload(json!({ "email": "a@x.com" }))).unwrap();
        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issuer = TokenSigner::new("one-secret", Duration::hours(1));
        let verifier = TokenSigner::new("another-secret", Duration::hours(1));
        let token = issuer.issue(payload(json!({ "email": "a@x.com" }))).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_token_without_email_rejected() {
        let signer = TokenSigner::new("test-secret", Duration::hours(1));
        let token = signer.issue(payload(json!({ "name": "nobody" }))).unwrap();
        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn test_caller_expiry_overwritten() {
        let signer = TokenSigner::new("test-secret", Duration::hours(1));
        let token = signer.issue(payload(json!({ "email": "a@x.com", "exp": 1 }))).unwrap();
        let claims = signer.verify(&token).unwrap();
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_garbage_rejected() {
        let signer = TokenSigner::new("test-secret", Duration::hours(1));
        assert!(signer.verify("not.a.token").is_err());
    }
}
