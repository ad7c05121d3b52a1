//! First-run demo content

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal_macros::dec;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    BookingStatus, NewBlogPost, NewBooking, NewOffer, NewRoom, OfferType, Room, RoomCategory,
};
use crate::store::{BlogPostStore, BookingStore, OfferStore, RoomStore, StoreResult};
use crate::AppState;

const DEMO_DORM: &str = "Mountain View Dorm";

/// Seed demo rooms, a booking, blog posts and offers.
///
/// Each collection is checked on its own, so a run that failed halfway is
/// completed by the next start. Returns whether anything was written.
pub async fn seed_if_empty(state: &AppState) -> StoreResult<bool> {
    let mut seeded = false;

    let mut rooms = state.rooms.list_rooms().await?;
    if rooms.is_empty() {
        rooms = seed_rooms(state.rooms.as_ref()).await?;
        info!("Rooms seeded");
        seeded = true;
    }

    if state.bookings.list_bookings(None).await?.is_empty() {
        if let Some(room) = booking_room(&rooms) {
            seed_booking(state.bookings.as_ref(), room.id).await?;
            info!("Bookings seeded");
            seeded = true;
        }
    }

    if state.blog_posts.list_blog_posts(None).await?.is_empty() {
        seed_blog_posts(state.blog_posts.as_ref()).await?;
        info!("Blog posts seeded");
        seeded = true;
    }

    if state.offers.list_offers().await?.is_empty() {
        seed_offers(state.offers.as_ref(), Utc::now().date_naive()).await?;
        info!("Offers seeded");
        seeded = true;
    }

    if !seeded {
        info!("Database already seeded");
    }
    Ok(seeded)
}

/// Room the demo booking is made for: the dorm if present, else any room
fn booking_room(rooms: &[Room]) -> Option<&Room> {
    rooms
        .iter()
        .find(|room| room.name == DEMO_DORM)
        .or_else(|| rooms.first())
}

async fn seed_rooms(store: &dyn RoomStore) -> StoreResult<Vec<Room>> {
    let demo = [
        room(
            DEMO_DORM,
            RoomCategory::Dorm,
            6,
            500,
            &["WiFi", "Hot Water", "Mountain View"],
        ),
        room(
            "Private Cottage",
            RoomCategory::Private,
            2,
            1500,
            &["Private Bathroom", "WiFi", "Kitchen Access", "Garden View"],
        ),
        room(
            "Luxury Suite",
            RoomCategory::Private,
            4,
            2500,
            &["Jacuzzi", "WiFi", "Premium Bedding", "Room Service"],
        ),
    ];

    let mut rooms = Vec::with_capacity(demo.len());
    for new_room in demo {
        rooms.push(store.create_room(new_room).await?);
    }
    Ok(rooms)
}

async fn seed_booking(store: &dyn BookingStore, room_id: Uuid) -> StoreResult<()> {
    let today = Utc::now().date_naive();
    store
        .create_booking(NewBooking {
            guest_name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: "+91-9876543210".to_string(),
            room_ids: vec![room_id],
            check_in: today,
            check_out: today + chrono::Days::new(2),
            guest_count: 1,
            special_requests: String::new(),
            price: dec!(1000),
            status: BookingStatus::Confirmed,
        })
        .await?;
    Ok(())
}

async fn seed_blog_posts(store: &dyn BlogPostStore) -> StoreResult<()> {
    for (title, category, excerpt, content, image) in [
        (
            "Mountain Hiking Guide",
            "travel",
            "Complete guide to hiking in the mountains",
            "This is a comprehensive guide about mountain hiking with tips and tricks.",
            "hiking.jpg",
        ),
        (
            "Budget Travel Tips",
            "tips",
            "Save money while traveling",
            "Learn how to travel on a budget without compromising on experiences.",
            "budget.jpg",
        ),
    ] {
        store
            .create_blog_post(NewBlogPost {
                title: title.to_string(),
                author: "Admin".to_string(),
                category: category.to_string(),
                excerpt: excerpt.to_string(),
                content: content.to_string(),
                date: None,
                image: image.to_string(),
                published: true,
            })
            .await?;
    }
    Ok(())
}

// Demo offers run for the whole current year so they show up immediately
async fn seed_offers(store: &dyn OfferStore, today: NaiveDate) -> StoreResult<()> {
    let (year_start, year_end) = year_bounds(today);
    store
        .create_offer(NewOffer {
            title: "Early Bird Offer".to_string(),
            description: "Book 30 days in advance and get 15% discount".to_string(),
            discount: dec!(15),
            offer_type: OfferType::All,
            applicable_rooms: vec![],
            min_days: 0,
            valid_from: year_start,
            valid_to: year_end,
            code: "EARLYBIRD15".to_string(),
            active: true,
        })
        .await?;
    store
        .create_offer(NewOffer {
            title: "Weekly Stay".to_string(),
            description: "Stay for 7 nights and get 20% discount".to_string(),
            discount: dec!(20),
            offer_type: OfferType::Duration,
            applicable_rooms: vec![],
            min_days: 7,
            valid_from: year_start,
            valid_to: year_end,
            code: "WEEKLY20".to_string(),
            active: true,
        })
        .await?;
    Ok(())
}

fn room(
    name: &str,
    category: RoomCategory,
    capacity: i32,
    price: i64,
    amenities: &[&str],
) -> NewRoom {
    NewRoom {
        name: name.to_string(),
        category,
        capacity,
        price: price.into(),
        description: String::new(),
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        available: true,
    }
}

fn year_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(day.year(), 1, 1).unwrap_or(day);
    let end = NaiveDate::from_ymd_opt(day.year(), 12, 31).unwrap_or(day);
    (start, end)
}
