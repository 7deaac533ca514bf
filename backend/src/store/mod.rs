//! Store access for user records
//!
//! `UserStore` is the capability the service layer is built on. The
//! PostgreSQL implementation is used in production; the in-memory one backs
//! tests and local runs without a database.

mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{NewUser, User};

/// Row-level operations on the user table.
///
/// Implementations must never splice caller-supplied values into query text.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All rows, in whatever order the store returns them
    async fn fetch_all(&self) -> ApiResult<Vec<User>>;

    async fn fetch_by_id(&self, id: i32) -> ApiResult<Option<User>>;

    async fn fetch_by_email(&self, email: &str) -> ApiResult<Option<User>>;

    /// Insert a row and return the generated id
    async fn insert(&self, user: &NewUser) -> ApiResult<i32>;

    /// Overwrite name and email for `user.id`; returns rows affected
    async fn update(&self, user: &User) -> ApiResult<u64>;

    /// Remove the row for `id`; returns rows affected
    async fn delete(&self, id: i32) -> ApiResult<u64>;

    /// Cheap connectivity probe for health checks
    async fn ping(&self) -> ApiResult<()>;
}
