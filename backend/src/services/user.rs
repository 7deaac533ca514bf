//! User data-access service

use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewUser, User};
use crate::store::UserStore;

/// CRUD operations on users, backed by an injected store.
///
/// Holds no cached state; every call round-trips to the store.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    /// Create a new user service over the given store
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Probe the underlying store
    pub async fn ping(&self) -> ApiResult<()> {
        self.store.ping().await
    }

    /// Every user, in store order
    pub async fn list(&self) -> ApiResult<Vec<User>> {
        self.store.fetch_all().await
    }

    /// `None` when no row has this id
    pub async fn get_by_id(&self, id: i32) -> ApiResult<Option<User>> {
        self.store.fetch_by_id(id).await
    }

    /// Insert a user after checking the email is free.
    ///
    /// The check and the insert are separate statements, so two concurrent
    /// calls with the same email can both succeed unless the table carries a
    /// unique index.
    pub async fn create(&self, user: NewUser) -> ApiResult<User> {
        if self.store.fetch_by_email(&user.email).await?.is_some() {
            tracing::debug!(email = %user.email, "Rejected create: email already in use");
            return Err(ApiError::duplicate_email());
        }

        let id = self.store.insert(&user).await?;
        tracing::info!(user_id = id, "User created");

        Ok(user.into_user(id))
    }

    /// Overwrite name and email of an existing user.
    ///
    /// Returns the supplied user as confirmation, without re-reading the row.
    /// `None` when the id does not exist, in which case nothing is written.
    pub async fn update(&self, user: User) -> ApiResult<Option<User>> {
        if self.store.fetch_by_id(user.id).await?.is_none() {
            return Ok(None);
        }

        self.store.update(&user).await?;
        tracing::info!(user_id = user.id, "User updated");

        Ok(Some(user))
    }

    /// Delete by id. Missing ids are not an error.
    pub async fn delete(&self, id: i32) -> ApiResult<()> {
        let removed = self.store.delete(id).await?;
        tracing::info!(user_id = id, removed, "User delete processed");

        Ok(())
    }
}
