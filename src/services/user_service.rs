use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims, JwtError};
use crate::config::SecurityConfig;
use crate::store::{Document, DocumentStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("email is already registered")]
    EmailTaken,
    #[error("user not found")]
    NotFound,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("validation failed")]
    Validation(HashMap<String, String>),
    #[error(transparent)]
    Token(#[from] JwtError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Client-facing account shape. The stored password digest never leaves
/// this module.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}

/// A successful login: the bearer token plus who it belongs to.
#[derive(Debug, Serialize)]
pub struct Session {
    pub token: String,
    pub user: PublicUser,
    pub expires_in: u64,
}

pub struct UserService {
    store: Arc<dyn DocumentStore>,
}

impl UserService {
    pub const COLLECTION: &'static str = "users";

    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create an account. Accounts are not owner-gated; the store's owner
    /// column is filled but unused for this collection.
    pub async fn register(&self, email: &str, password: &str) -> Result<PublicUser, UserError> {
        let mut field_errors = HashMap::new();
        if email.is_empty() {
            field_errors.insert("email".to_string(), "is required".to_string());
        }
        if password.is_empty() {
            field_errors.insert("password".to_string(), "is required".to_string());
        }
        if !field_errors.is_empty() {
            return Err(UserError::Validation(field_errors));
        }

        if self.find_by_email(email).await?.is_some() {
            return Err(UserError::EmailTaken);
        }

        let mut attrs = Map::new();
        attrs.insert("email".to_string(), json!(email));
        attrs.insert("password_digest".to_string(), json!(hash_password(password)));

        let doc = self.store.insert(Self::COLLECTION, Uuid::new_v4(), attrs).await?;
        Ok(public_user(&doc))
    }

    /// Verify credentials and issue a bearer token.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Session, UserError> {
        let doc = self.find_by_email(email).await?.ok_or(UserError::InvalidCredentials)?;

        let stored = doc
            .attrs
            .get("password_digest")
            .and_then(Value::as_str)
            .ok_or(UserError::InvalidCredentials)?;
        if !verify_password(stored, password) {
            return Err(UserError::InvalidCredentials);
        }

        let claims = Claims::new(doc.id, security.jwt_expiry_hours);
        let token = generate_jwt(&claims, &security.jwt_secret)?;

        Ok(Session {
            token,
            user: public_user(&doc),
            expires_in: security.jwt_expiry_hours * 3600,
        })
    }

    pub async fn find(&self, id: Uuid) -> Result<PublicUser, UserError> {
        let doc = self
            .store
            .find_by_id(Self::COLLECTION, id)
            .await?
            .ok_or(UserError::NotFound)?;
        Ok(public_user(&doc))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Document>, UserError> {
        let users = self.store.find_all(Self::COLLECTION).await?;
        Ok(users
            .into_iter()
            .find(|doc| doc.attrs.get("email").and_then(Value::as_str) == Some(email)))
    }
}

fn public_user(doc: &Document) -> PublicUser {
    PublicUser {
        id: doc.id,
        email: doc
            .attrs
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

/// Salted SHA-256 digest, stored as `salt$hex`.
fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}", salt, digest_password(&salt, password))
}

fn verify_password(stored: &str, password: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, digest)) => digest_password(salt, password) == digest,
        None => false,
    }
}

fn digest_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
