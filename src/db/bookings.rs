//! Booking queries

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Booking, BookingStatus, NewBooking};
use crate::store::{BookingStore, StoreError, StoreResult};

use super::PgStore;

#[async_trait]
impl BookingStore for PgStore {
    async fn list_bookings(&self, status: Option<BookingStatus>) -> StoreResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, guest_name, email, phone, room_ids, check_in, check_out,
                   guest_count, special_requests, price, status, created_at
            FROM bookings
            WHERE $1::TEXT IS NULL OR status = $1
            ORDER BY check_in DESC, created_at DESC
            "#,
        )
        .bind(status.map(BookingStatus::as_str))
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn get_booking(&self, id: Uuid) -> StoreResult<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, guest_name, email, phone, room_ids, check_in, check_out,
                   guest_count, special_requests, price, status, created_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn create_booking(&self, booking: NewBooking) -> StoreResult<Booking> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                id, guest_name, email, phone, room_ids, check_in, check_out,
                guest_count, special_requests, price, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, guest_name, email, phone, room_ids, check_in, check_out,
                      guest_count, special_requests, price, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&booking.guest_name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(&booking.room_ids)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.guest_count)
        .bind(&booking.special_requests)
        .bind(booking.price)
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn update_booking(
        &self,
        booking: Booking,
        expected: BookingStatus,
    ) -> StoreResult<Booking> {
        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET guest_name = $2, email = $3, phone = $4, room_ids = $5,
                check_in = $6, check_out = $7, guest_count = $8,
                special_requests = $9, price = $10, status = $11
            WHERE id = $1 AND status = $12
            RETURNING id, guest_name, email, phone, room_ids, check_in, check_out,
                      guest_count, special_requests, price, status, created_at
            "#,
        )
        .bind(booking.id)
        .bind(&booking.guest_name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(&booking.room_ids)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.guest_count)
        .bind(&booking.special_requests)
        .bind(booking.price)
        .bind(booking.status.as_str())
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(updated) = updated {
            return Ok(updated);
        }

        // No row matched: either the booking is gone or its status moved on
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bookings WHERE id = $1)")
            .bind(booking.id)
            .fetch_one(&self.pool)
            .await?;

        Err(if exists {
            StoreError::Stale
        } else {
            StoreError::NotFound
        })
    }

    async fn delete_booking(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
