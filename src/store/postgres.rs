use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use super::{UserStore, UserTransaction};
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};

const INSERT_USER: &str = r#"
    INSERT INTO users (name, age, gender, email, city, interests)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, name, age, gender, email, city, interests
"#;

/// [`UserStore`] backed by the `users` table in PostgreSQL.
#[derive(Clone)]
pub struct PgUserStore {
    db_pool: PgPool,
}

impl PgUserStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

/// Turns a unique-constraint violation into [`AppError::DuplicateEmail`].
/// Email is the only unique column besides the primary key.
fn map_insert_error(e: sqlx::Error, email: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateEmail(email.to_string())
        }
        _ => AppError::Db(e),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip_all, fields(email = %user.email))]
    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(INSERT_USER)
            .bind(&user.name)
            .bind(user.age)
            .bind(&user.gender)
            .bind(&user.email)
            .bind(&user.city)
            .bind(&user.interests)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| map_insert_error(e, &user.email))?;

        debug!(user_id = created.id, "Inserted user");
        Ok(created)
    }

    async fn get(&self, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, age, gender, email, city, interests FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }

    async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, age, gender, email, city, interests
            FROM users
            ORDER BY id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(users)
    }

    async fn list_by_gender(&self, gender: &str) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, age, gender, email, city, interests
            FROM users
            WHERE gender = $1
            ORDER BY id
            "#,
        )
        .bind(gender)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(users)
    }

    #[instrument(skip_all, fields(user_id = user.id))]
    async fn update(&self, user: &User) -> AppResult<Option<User>> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, age = $3, gender = $4, email = $5, city = $6, interests = $7
            WHERE id = $1
            RETURNING id, name, age, gender, email, city, interests
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.age)
        .bind(&user.gender)
        .bind(&user.email)
        .bind(&user.city)
        .bind(&user.interests)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| map_insert_error(e, &user.email))?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn begin(&self) -> AppResult<Box<dyn UserTransaction>> {
        let tx = self.db_pool.begin().await?;
        Ok(Box::new(PgUserTransaction { tx }))
    }
}

/// Wraps a `sqlx` transaction; dropping it rolls back.
struct PgUserTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UserTransaction for PgUserTransaction {
    async fn email_exists(&mut self, email: &str) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(self.tx.as_mut())
        .await?;

        Ok(exists)
    }

    async fn insert(&mut self, user: &NewUser) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(INSERT_USER)
            .bind(&user.name)
            .bind(user.age)
            .bind(&user.gender)
            .bind(&user.email)
            .bind(&user.city)
            .bind(&user.interests)
            .fetch_one(self.tx.as_mut())
            .await
            .map_err(|e| map_insert_error(e, &user.email))?;

        Ok(created)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let PgUserTransaction { tx } = *self;
        tx.commit().await?;
        Ok(())
    }
}
