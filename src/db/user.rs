use sqlx::sqlite::SqlitePool;

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

/// A registered user. The password hash never leaves the db/auth layers.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub hashed_password: String,
    pub is_premium: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user with an already-hashed password.
    pub async fn create(
        &self,
        id: &str,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query("INSERT INTO users (id, email, hashed_password) VALUES (?, ?, ?)")
            .bind(id)
            .bind(email)
            .bind(hashed_password)
            .execute(&self.pool)
            .await?;

        // Read the row back for the store-generated timestamps
        let user: User = sqlx::query_as(
            "SELECT id, email, hashed_password, is_premium, created_at, updated_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Get a user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let user: Option<User> = sqlx::query_as(
            "SELECT id, email, hashed_password, is_premium, created_at, updated_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Get a user by id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
        let user: Option<User> = sqlx::query_as(
            "SELECT id, email, hashed_password, is_premium, created_at, updated_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Replace a user's email and password hash.
    pub async fn update_credentials(
        &self,
        id: &str,
        email: &str,
        hashed_password: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET email = ?, hashed_password = ?, updated_at = datetime('now')
             WHERE id = ?",
        )
        .bind(email)
        .bind(hashed_password)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a user as premium. Returns false if no such user exists.
    pub async fn upgrade(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_premium = 1, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every user (dev-only reset). Posts and refresh tokens cascade.
    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
