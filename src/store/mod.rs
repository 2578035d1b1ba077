//! # User Store
//!
//! Data-access interface over plain [`User`] records. Services depend on the
//! [`UserStore`] trait only; [`PgUserStore`] is the PostgreSQL implementation.
//!
//! Every call borrows a pooled connection for the duration of one statement.
//! Multi-statement work that must be all-or-nothing goes through a
//! [`UserTransaction`] obtained from [`UserStore::begin`].

mod postgres;

pub use postgres::PgUserStore;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{NewUser, User};

/// Persistence operations on users.
///
/// Implementations enforce email uniqueness and report a violation as
/// [`AppError::DuplicateEmail`](crate::error::AppError::DuplicateEmail).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user and returns it with its assigned id.
    async fn insert(&self, user: &NewUser) -> AppResult<User>;

    async fn get(&self, id: i32) -> AppResult<Option<User>>;

    /// Lists users in id order, skipping `skip` and returning at most `limit`.
    async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<User>>;

    /// Lists every user whose gender equals `gender`, in id order.
    async fn list_by_gender(&self, gender: &str) -> AppResult<Vec<User>>;

    /// Overwrites the row with `user.id`. Returns `None` if no such row exists.
    async fn update(&self, user: &User) -> AppResult<Option<User>>;

    /// Deletes a user. Returns `false` if no such row existed.
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Opens a transaction. Dropping it without [`UserTransaction::commit`]
    /// discards every write made through it.
    async fn begin(&self) -> AppResult<Box<dyn UserTransaction>>;
}

/// Scoped write handle used for batch inserts.
///
/// Reads through the handle observe the writes already made through it.
#[async_trait]
pub trait UserTransaction: Send {
    async fn email_exists(&mut self, email: &str) -> AppResult<bool>;

    async fn insert(&mut self, user: &NewUser) -> AppResult<User>;

    async fn commit(self: Box<Self>) -> AppResult<()>;
}
