//! Blog post queries

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{BlogPost, NewBlogPost};
use crate::store::{BlogPostStore, StoreError, StoreResult};

use super::PgStore;

#[async_trait]
impl BlogPostStore for PgStore {
    async fn list_blog_posts(&self, published: Option<bool>) -> StoreResult<Vec<BlogPost>> {
        let posts = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, author, category, excerpt, content, date,
                   image, published, created_at
            FROM blog_posts
            WHERE $1::BOOLEAN IS NULL OR published = $1
            ORDER BY date DESC
            "#,
        )
        .bind(published)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn get_blog_post(&self, id: Uuid) -> StoreResult<BlogPost> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, author, category, excerpt, content, date,
                   image, published, created_at
            FROM blog_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn create_blog_post(&self, post: NewBlogPost) -> StoreResult<BlogPost> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (id, title, author, category, excerpt, content, date, image, published)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, author, category, excerpt, content, date,
                      image, published, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&post.title)
        .bind(&post.author)
        .bind(&post.category)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(post.date.unwrap_or_else(Utc::now))
        .bind(&post.image)
        .bind(post.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update_blog_post(&self, post: BlogPost) -> StoreResult<BlogPost> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts
            SET title = $2, author = $3, category = $4, excerpt = $5,
                content = $6, date = $7, image = $8, published = $9
            WHERE id = $1
            RETURNING id, title, author, category, excerpt, content, date,
                      image, published, created_at
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.author)
        .bind(&post.category)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(post.date)
        .bind(&post.image)
        .bind(post.published)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete_blog_post(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
