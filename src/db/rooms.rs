//! Room queries

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewRoom, Room};
use crate::store::{RoomStore, StoreError, StoreResult};

use super::PgStore;

#[async_trait]
impl RoomStore for PgStore {
    async fn list_rooms(&self) -> StoreResult<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(
            r#"
            SELECT id, name, category, capacity, price, description,
                   amenities, available, created_at
            FROM rooms
            ORDER BY created_at, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    async fn get_room(&self, id: Uuid) -> StoreResult<Room> {
        sqlx::query_as::<_, Room>(
            r#"
            SELECT id, name, category, capacity, price, description,
                   amenities, available, created_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn create_room(&self, room: NewRoom) -> StoreResult<Room> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (id, name, category, capacity, price, description, amenities, available)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, category, capacity, price, description,
                      amenities, available, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&room.name)
        .bind(room.category.as_str())
        .bind(room.capacity)
        .bind(room.price)
        .bind(&room.description)
        .bind(&room.amenities)
        .bind(room.available)
        .fetch_one(&self.pool)
        .await?;

        Ok(room)
    }

    async fn update_room(&self, room: Room) -> StoreResult<Room> {
        sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET name = $2, category = $3, capacity = $4, price = $5,
                description = $6, amenities = $7, available = $8
            WHERE id = $1
            RETURNING id, name, category, capacity, price, description,
                      amenities, available, created_at
            "#,
        )
        .bind(room.id)
        .bind(&room.name)
        .bind(room.category.as_str())
        .bind(room.capacity)
        .bind(room.price)
        .bind(&room.description)
        .bind(&room.amenities)
        .bind(room.available)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete_room(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
