//! Offer queries

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{NewOffer, Offer};
use crate::store::{OfferStore, StoreError, StoreResult};

use super::PgStore;

#[async_trait]
impl OfferStore for PgStore {
    async fn list_offers(&self) -> StoreResult<Vec<Offer>> {
        let offers = sqlx::query_as::<_, Offer>(
            r#"
            SELECT id, title, description, discount, offer_type, applicable_rooms,
                   min_days, valid_from, valid_to, code, active, created_at
            FROM offers
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(offers)
    }

    async fn list_active_offers(&self, on: NaiveDate) -> StoreResult<Vec<Offer>> {
        let offers = sqlx::query_as::<_, Offer>(
            r#"
            SELECT id, title, description, discount, offer_type, applicable_rooms,
                   min_days, valid_from, valid_to, code, active, created_at
            FROM offers
            WHERE active
              AND valid_from <= $1
              AND valid_to >= $1
            ORDER BY created_at
            "#,
        )
        .bind(on)
        .fetch_all(&self.pool)
        .await?;

        Ok(offers)
    }

    async fn get_offer(&self, id: Uuid) -> StoreResult<Offer> {
        sqlx::query_as::<_, Offer>(
            r#"
            SELECT id, title, description, discount, offer_type, applicable_rooms,
                   min_days, valid_from, valid_to, code, active, created_at
            FROM offers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn create_offer(&self, offer: NewOffer) -> StoreResult<Offer> {
        let offer = sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers (
                id, title, description, discount, offer_type, applicable_rooms,
                min_days, valid_from, valid_to, code, active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, title, description, discount, offer_type, applicable_rooms,
                      min_days, valid_from, valid_to, code, active, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&offer.title)
        .bind(&offer.description)
        .bind(offer.discount)
        .bind(offer.offer_type.as_str())
        .bind(&offer.applicable_rooms)
        .bind(offer.min_days)
        .bind(offer.valid_from)
        .bind(offer.valid_to)
        .bind(&offer.code)
        .bind(offer.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(offer)
    }

    async fn update_offer(&self, offer: Offer) -> StoreResult<Offer> {
        sqlx::query_as::<_, Offer>(
            r#"
            UPDATE offers
            SET title = $2, description = $3, discount = $4, offer_type = $5,
                applicable_rooms = $6, min_days = $7, valid_from = $8,
                valid_to = $9, code = $10, active = $11
            WHERE id = $1
            RETURNING id, title, description, discount, offer_type, applicable_rooms,
                      min_days, valid_from, valid_to, code, active, created_at
            "#,
        )
        .bind(offer.id)
        .bind(&offer.title)
        .bind(&offer.description)
        .bind(offer.discount)
        .bind(offer.offer_type.as_str())
        .bind(&offer.applicable_rooms)
        .bind(offer.min_days)
        .bind(offer.valid_from)
        .bind(offer.valid_to)
        .bind(&offer.code)
        .bind(offer.active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete_offer(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
