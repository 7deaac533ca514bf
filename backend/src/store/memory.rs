use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewUser, User};

use super::UserStore;

#[derive(Debug)]
struct Table {
    rows: Vec<User>,
    next_id: i32,
}

/// In-process user store. Ids start at 1 and are never reused, like a
/// `SERIAL` column.
#[derive(Clone)]
pub struct MemoryUserStore {
    table: Arc<RwLock<Table>>,
    offline: Arc<AtomicBool>,
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: Vec::new(),
                next_id: 1,
            })),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call fail as if the connection had dropped
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> ApiResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::DatabaseError(
                "connection to store is closed".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn fetch_all(&self) -> ApiResult<Vec<User>> {
        self.ensure_online()?;
        Ok(self.table.read().await.rows.clone())
    }

    async fn fetch_by_id(&self, id: i32) -> ApiResult<Option<User>> {
        self.ensure_online()?;
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn fetch_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        self.ensure_online()?;
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: &NewUser) -> ApiResult<i32> {
        self.ensure_online()?;
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;
        table.rows.push(user.clone().into_user(id));
        Ok(id)
    }

    async fn update(&self, user: &User) -> ApiResult<u64> {
        self.ensure_online()?;
        let mut table = self.table.write().await;
        match table.rows.iter_mut().find(|u| u.id == user.id) {
            Some(row) => {
                row.name = user.name.clone();
                row.email = user.email.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> ApiResult<u64> {
        self.ensure_online()?;
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|u| u.id != id);
        Ok((before - table.rows.len()) as u64)
    }

    async fn ping(&self) -> ApiResult<()> {
        self.ensure_online()
            .map_err(|e| ApiError::ServiceUnavailable(e.to_string()))
    }
}
