//! # User Service
//!
//! Orchestrates CRUD operations over the [`UserStore`], validating emails
//! before they are written and running the matching filter on demand.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User, UserUpdate};
use crate::services::email::{EmailCheck, EmailChecker};
use crate::services::matching::MatchingService;
use crate::store::UserStore;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    email_checker: EmailChecker,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, email_checker: EmailChecker) -> Self {
        Self {
            store,
            email_checker,
        }
    }

    /// Runs the email check and converts a failure into [`AppError::InvalidEmail`].
    /// An empty email is not checked.
    async fn ensure_valid_email(&self, email: &str) -> AppResult<()> {
        if email.is_empty() {
            return Ok(());
        }

        let check = self.email_checker.check(email).await;
        if check.valid {
            Ok(())
        } else {
            warn!(%email, reason = %check.message, "Email rejected");
            Err(AppError::InvalidEmail(check.message))
        }
    }

    /// Checks an email without touching the store.
    pub async fn check_email(&self, email: &str) -> EmailCheck {
        self.email_checker.check(email).await
    }

    #[instrument(skip_all, fields(email = %new_user.email))]
    pub async fn create(&self, new_user: NewUser) -> AppResult<User> {
        self.ensure_valid_email(&new_user.email).await?;

        let user = self.store.insert(&new_user).await?;
        info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Inserts every user in one transaction.
    ///
    /// Users are processed in order; the first invalid or already-taken email
    /// aborts the batch and nothing is persisted.
    #[instrument(skip_all, fields(batch_size = new_users.len()))]
    pub async fn bulk_create(&self, new_users: Vec<NewUser>) -> AppResult<Vec<User>> {
        let mut tx = self.store.begin().await?;
        let mut created = Vec::with_capacity(new_users.len());

        for new_user in &new_users {
            self.ensure_valid_email(&new_user.email).await?;

            if tx.email_exists(&new_user.email).await? {
                warn!(email = %new_user.email, "Duplicate email in batch");
                return Err(AppError::DuplicateEmail(new_user.email.clone()));
            }

            created.push(tx.insert(new_user).await?);
        }

        tx.commit().await?;
        info!(count = created.len(), "Bulk user creation committed");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> AppResult<User> {
        self.store
            .get(id)
            .await?
            .ok_or(AppError::NotFound("User not found"))
    }

    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<User>> {
        debug!(skip, limit, "Listing users");
        self.store.list(skip, limit).await
    }

    /// Applies the non-empty fields of `changes` to an existing user.
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i32, changes: UserUpdate) -> AppResult<User> {
        let current = self
            .store
            .get(id)
            .await?
            .ok_or(AppError::NotFound("User does not exist"))?;

        if let Some(email) = changes.new_email() {
            self.ensure_valid_email(email).await?;
        }

        let merged = changes.apply_to(&current);
        let updated = self
            .store
            .update(&merged)
            .await?
            // deleted between the read and the write
            .ok_or(AppError::NotFound("User does not exist"))?;

        info!("User updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound("User does not exist"));
        }

        info!("User deleted");
        Ok(())
    }

    /// Returns users of the opposite gender sharing at least one interest
    /// with the user `id`.
    #[instrument(skip(self))]
    pub async fn find_matches(&self, id: i32) -> AppResult<Vec<User>> {
        let target = self.get(id).await?;

        let opposite_gender = MatchingService::opposite_gender(&target.gender);
        let candidates = self.store.list_by_gender(opposite_gender).await?;
        let candidate_count = candidates.len();

        let matches = MatchingService::find_matches(&target, candidates);
        debug!(
            candidate_count,
            match_count = matches.len(),
            "Matching completed"
        );
        Ok(matches)
    }
}
