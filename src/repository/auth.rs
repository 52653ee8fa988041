//! Credential registry.

use secrecy::SecretString;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::domain::credential::Credential;
use crate::domain::foundation::Username;
use crate::ports::SecretHasher;
use crate::store::{Store, StoreError, USERS};

/// Errors raised by the credential registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The username is already registered. User-correctable.
    #[error("username already registered")]
    DuplicateUser,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Registration and authentication over the `users` collection.
///
/// Secrets never reach the store as cleartext unless the configured
/// [`SecretHasher`] chooses to store them that way; comparison always goes
/// through `verify`.
#[derive(Clone)]
pub struct AuthRegistry {
    store: Store,
    hasher: Arc<dyn SecretHasher>,
}

impl AuthRegistry {
    /// Creates a registry over the given store and hashing policy.
    pub fn new(store: Store, hasher: Arc<dyn SecretHasher>) -> Self {
        Self { store, hasher }
    }

    /// Registers a new user.
    ///
    /// The existence check and the insert run in one transaction, so two
    /// concurrent registrations of the same username cannot both succeed.
    ///
    /// # Errors
    ///
    /// `AuthError::DuplicateUser` if the username is taken; store failures
    /// are forwarded unchanged.
    pub async fn register(
        &self,
        username: &Username,
        secret: &SecretString,
    ) -> Result<(), AuthError> {
        let credential = Credential::new(username.clone(), self.hasher.hash(secret));
        let record = serde_json::to_value(&credential)
            .map_err(|e| StoreError::constraint(format!("credential does not serialize: {e}")))?;

        self.store
            .transaction(|tx| {
                if tx.get(USERS, username.as_str())?.is_some() {
                    return Err(AuthError::DuplicateUser);
                }
                tx.insert(USERS, record)?;
                Ok(())
            })
            .await?;

        debug!(username = %username, "user registered");
        Ok(())
    }

    /// Checks a username/secret pair.
    ///
    /// Returns `false` for an unknown user and for a wrong secret alike;
    /// the two cases are never distinguishable to the caller. Only store
    /// failures raise.
    pub async fn authenticate(
        &self,
        username: &Username,
        secret: &SecretString,
    ) -> Result<bool, AuthError> {
        let Some(value) = self.store.get(USERS, username.as_str()).await? else {
            return Ok(false);
        };
        let credential: Credential = serde_json::from_value(value).map_err(|e| {
            StoreError::constraint(format!("stored credential does not match schema: {e}"))
        })?;
        Ok(self.hasher.verify(secret, credential.stored_secret()))
    }
}
