//! Feature post queries

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{FeaturePost, NewFeaturePost};
use crate::store::{FeaturePostStore, StoreError, StoreResult};

use super::PgStore;

#[async_trait]
impl FeaturePostStore for PgStore {
    async fn list_feature_posts(&self, active: Option<bool>) -> StoreResult<Vec<FeaturePost>> {
        let posts = sqlx::query_as::<_, FeaturePost>(
            r#"
            SELECT id, image, instagram_url, active, created_at
            FROM feature_posts
            WHERE $1::BOOLEAN IS NULL OR active = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(active)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn get_feature_post(&self, id: Uuid) -> StoreResult<FeaturePost> {
        sqlx::query_as::<_, FeaturePost>(
            r#"
            SELECT id, image, instagram_url, active, created_at
            FROM feature_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn create_feature_post(&self, post: NewFeaturePost) -> StoreResult<FeaturePost> {
        let post = sqlx::query_as::<_, FeaturePost>(
            r#"
            INSERT INTO feature_posts (id, image, instagram_url, active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, image, instagram_url, active, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&post.image)
        .bind(&post.instagram_url)
        .bind(post.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update_feature_post(&self, post: FeaturePost) -> StoreResult<FeaturePost> {
        sqlx::query_as::<_, FeaturePost>(
            r#"
            UPDATE feature_posts
            SET image = $2, instagram_url = $3, active = $4
            WHERE id = $1
            RETURNING id, image, instagram_url, active, created_at
            "#,
        )
        .bind(post.id)
        .bind(&post.image)
        .bind(&post.instagram_url)
        .bind(post.active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete_feature_post(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM feature_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
