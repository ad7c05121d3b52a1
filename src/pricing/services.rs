//! Pricing service functions with store access.
//!
//! These resolve a cart into priced lines, load the offers active on the
//! reference date (through the cache) and hand both to the calculators.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::models::Offer;
use crate::store::{RoomStore, StoreError};
use crate::AppState;

use super::calculators::{compute_booking_total, nights_between, BookingLine, BookingTotals};
use super::requests::{CartItemRequest, QuoteRequest};

/// Pricing error types
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Check-out ({check_out}) must not be before check-in ({check_in})")]
    InvalidStay {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Room {0} not found")]
    UnknownRoom(Uuid),

    #[error("Room {0} is not available")]
    RoomUnavailable(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Turn cart items into priced lines.
///
/// Items with a zero quantity are dropped. Name and nightly price are
/// snapshotted from the room as it is stored right now.
pub async fn build_lines(
    rooms: &dyn RoomStore,
    cart: &[CartItemRequest],
) -> Result<Vec<BookingLine>, PricingError> {
    let mut lines = Vec::with_capacity(cart.len());

    for item in cart.iter().filter(|item| item.quantity > 0) {
        let room = rooms.get_room(item.room_id).await.map_err(|e| match e {
            StoreError::NotFound => PricingError::UnknownRoom(item.room_id),
            other => PricingError::Store(other),
        })?;

        if !room.available {
            return Err(PricingError::RoomUnavailable(room.id));
        }

        lines.push(BookingLine {
            room_id: room.id,
            name: room.name,
            unit_price: room.price,
            quantity: item.quantity,
        });
    }

    Ok(lines)
}

/// Offers active on `on`, served from the offer cache when possible
pub async fn active_offers(state: &AppState, on: NaiveDate) -> Result<Arc<Vec<Offer>>, StoreError> {
    state
        .cache
        .offers
        .get_or_try_load(AppCache::active_offers_key(on), || {
            state.offers.list_active_offers(on)
        })
        .await
}

/// Price a stay for the booking summary
pub async fn quote(state: &AppState, request: &QuoteRequest) -> Result<BookingTotals, PricingError> {
    if request.check_out < request.check_in {
        return Err(PricingError::InvalidStay {
            check_in: request.check_in,
            check_out: request.check_out,
        });
    }

    let nights = nights_between(request.check_in, request.check_out);
    let lines = build_lines(state.rooms.as_ref(), &request.rooms).await?;
    let on = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let offers = active_offers(state, on).await?;

    let totals = compute_booking_total(nights, &lines, &offers);
    debug!(
        nights,
        lines = lines.len(),
        grand_total = %totals.grand_total,
        "Priced stay"
    );

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use crate::models::{NewOffer, OfferType, Room, RoomCategory};
    use crate::store::{MockOfferStore, MockRoomStore, OfferStore, StoreResult};
    use crate::test_helpers::{offer, room, TestStores};
    use rust_decimal_macros::dec;

    fn request(rooms: Vec<CartItemRequest>) -> QuoteRequest {
        QuoteRequest {
            check_in: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            rooms,
            as_of: NaiveDate::from_ymd_opt(2026, 4, 1),
        }
    }

    #[test]
    fn test_pricing_error_display() {
        let id = Uuid::nil();
        assert!(PricingError::UnknownRoom(id).to_string().contains("not found"));
        assert!(PricingError::RoomUnavailable(id)
            .to_string()
            .contains("not available"));
    }

    #[tokio::test]
    async fn test_build_lines_drops_zero_quantities() {
        let dorm = room("Mountain View Dorm", RoomCategory::Dorm, dec!(500));
        let dorm_id = dorm.id;

        let mut rooms = MockRoomStore::new();
        rooms
            .expect_get_room()
            .withf(move |id| *id == dorm_id)
            .times(1)
            .returning(move |_| Ok(dorm.clone()));

        let cart = vec![
            CartItemRequest {
                room_id: dorm_id,
                quantity: 2,
            },
            CartItemRequest {
                room_id: Uuid::new_v4(),
                quantity: 0,
            },
        ];

        let lines = build_lines(&rooms, &cart).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].unit_price, dec!(500));
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].name, "Mountain View Dorm");
    }

    #[tokio::test]
    async fn test_build_lines_rejects_unknown_and_unavailable_rooms() {
        let mut closed: Room = room("Luxury Suite", RoomCategory::Private, dec!(2500));
        closed.available = false;
        let closed_id = closed.id;
        let missing = Uuid::new_v4();

        let mut rooms = MockRoomStore::new();
        rooms.expect_get_room().returning(move |id| {
            if id == closed_id {
                Ok(closed.clone())
            } else {
                Err(StoreError::NotFound)
            }
        });

        let err = build_lines(
            &rooms,
            &[CartItemRequest {
                room_id: missing,
                quantity: 1,
            }],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PricingError::UnknownRoom(id) if id == missing));

        let err = build_lines(
            &rooms,
            &[CartItemRequest {
                room_id: closed_id,
                quantity: 1,
            }],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PricingError::RoomUnavailable(id) if id == closed_id));
    }

    #[tokio::test]
    async fn test_quote_applies_active_offers() {
        let cottage = room("Private Cottage", RoomCategory::Private, dec!(1000));
        let cottage_id = cottage.id;

        let mut stores = TestStores::default();
        stores
            .rooms
            .expect_get_room()
            .returning(move |_| Ok(cottage.clone()));
        stores
            .offers
            .expect_list_active_offers()
            .withf(|on| *on == NaiveDate::from_ymd_opt(2026, 4, 1).unwrap())
            .times(1)
            .returning(|_| Ok(vec![offer("All Rooms", OfferType::All, dec!(10))]));
        let state = stores.into_state();

        let totals = quote(
            &state,
            &request(vec![CartItemRequest {
                room_id: cottage_id,
                quantity: 2,
            }]),
        )
        .await
        .unwrap();

        assert_eq!(totals.nights, 3);
        assert_eq!(totals.subtotal, dec!(6000));
        assert_eq!(totals.grand_total, dec!(6048));

        // Second quote on the same date is served from the cache
        let again = quote(
            &state,
            &request(vec![CartItemRequest {
                room_id: cottage_id,
                quantity: 2,
            }]),
        )
        .await
        .unwrap();
        assert_eq!(again, totals);
    }

    #[tokio::test]
    async fn test_quote_rejects_backwards_stay() {
        let state = TestStores::default().into_state();
        let mut backwards = request(vec![]);
        backwards.check_out = NaiveDate::from_ymd_opt(2026, 4, 20).unwrap();

        let err = quote(&state, &backwards).await.unwrap_err();
        assert!(matches!(err, PricingError::InvalidStay { .. }));
    }

    #[tokio::test]
    async fn test_empty_cart_quotes_zero() {
        let mut offers = MockOfferStore::new();
        offers
            .expect_list_active_offers()
            .returning(|_| Ok(vec![]));
        let state = TestStores {
            offers,
            ..Default::default()
        }
        .into_state();

        let totals = quote(&state, &request(vec![])).await.unwrap();
        assert_eq!(totals.grand_total, dec!(0));
        assert!(totals.applied_offers.is_empty());
    }

    /// First active-offer read is slow and returns an offer that is gone by
    /// the time any later read happens.
    #[derive(Default)]
    struct SlowOffers {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OfferStore for SlowOffers {
        async fn list_offers(&self) -> StoreResult<Vec<Offer>> {
            Ok(vec![])
        }

        async fn list_active_offers(&self, _on: NaiveDate) -> StoreResult<Vec<Offer>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(200)).await;
                return Ok(vec![offer("Half Price", OfferType::All, dec!(50))]);
            }
            Ok(vec![])
        }

        async fn get_offer(&self, _id: Uuid) -> StoreResult<Offer> {
            Err(StoreError::NotFound)
        }

        async fn create_offer(&self, _offer: NewOffer) -> StoreResult<Offer> {
            Err(StoreError::InvalidData)
        }

        async fn update_offer(&self, _offer: Offer) -> StoreResult<Offer> {
            Err(StoreError::NotFound)
        }

        async fn delete_offer(&self, _id: Uuid) -> StoreResult<()> {
            Err(StoreError::NotFound)
        }
    }

    #[tokio::test]
    async fn test_offer_change_during_load_is_not_cached() {
        let mut state = TestStores::default().into_state();
        state.offers = Arc::new(SlowOffers::default());
        let day = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();

        let in_flight = {
            let state = state.clone();
            tokio::spawn(async move { active_offers(&state, day).await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        // Admin deactivates the offer while the first read is still loading
        state.cache.invalidate_offers();

        let first = in_flight.await.unwrap().unwrap();
        assert_eq!(first.len(), 1);

        let after = active_offers(&state, day).await.unwrap();
        assert!(after.is_empty());
    }
}
