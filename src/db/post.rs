//! Post storage for short messages.

use sqlx::sqlite::SqlitePool;

#[derive(Clone)]
pub struct PostStore {
    pool: SqlitePool,
}

/// A short message posted by a user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

impl PostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    pub async fn create(&self, id: &str, user_id: &str, body: &str) -> Result<Post, sqlx::Error> {
        sqlx::query("INSERT INTO posts (id, user_id, body) VALUES (?, ?, ?)")
            .bind(id)
            .bind(user_id)
            .bind(body)
            .execute(&self.pool)
            .await?;

        let post: Post = sqlx::query_as(
            "SELECT id, user_id, body, created_at, updated_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    /// Get a post by id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Post>, sqlx::Error> {
        let post: Option<Post> = sqlx::query_as(
            "SELECT id, user_id, body, created_at, updated_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    /// List all posts, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Post>, sqlx::Error> {
        let posts: Vec<Post> = sqlx::query_as(
            "SELECT id, user_id, body, created_at, updated_at FROM posts ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    /// Delete a post by id. Returns false if no row matched.
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Database;

    async fn test_db() -> Database {
        let db = Database::open(":memory:").await.unwrap();
        db.users()
            .create("u1", "alice@example.com", "hash")
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_create_and_get_post() {
        let db = test_db().await;

        let post = db.posts().create("p1", "u1", "hello world").await.unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.user_id, "u1");
        assert_eq!(post.body, "hello world");

        let fetched = db.posts().get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(fetched.body, "hello world");
    }

    #[tokio::test]
    async fn test_list_posts() {
        let db = test_db().await;

        db.posts().create("p1", "u1", "first").await.unwrap();
        db.posts().create("p2", "u1", "second").await.unwrap();

        let posts = db.posts().list_all().await.unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_post() {
        let db = test_db().await;

        db.posts().create("p1", "u1", "bye").await.unwrap();
        assert!(db.posts().delete("p1").await.unwrap());
        assert!(db.posts().get_by_id("p1").await.unwrap().is_none());
        assert!(!db.posts().delete("p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_deleting_user_cascades_posts() {
        let db = test_db().await;

        db.posts().create("p1", "u1", "orphan").await.unwrap();
        db.users().delete_all().await.unwrap();
        assert!(db.posts().get_by_id("p1").await.unwrap().is_none());
    }
}
