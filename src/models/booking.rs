//! Booking models and the booking status lifecycle

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{require, UnknownVariant, ValidationError};

/// Booking lifecycle status.
///
/// `pending -> confirmed -> checked-in -> completed`, with `cancelled`
/// reachable from `pending` and `confirmed`. Every transition is made by an
/// admin; nothing moves a booking automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    CheckedIn,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked-in",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled bookings never change status again
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Whether an admin may move a booking from `self` to `next`.
    /// Re-applying the current status is allowed.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;

        if self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, CheckedIn)
                | (Confirmed, Cancelled)
                | (CheckedIn, Completed)
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "checked-in" => Ok(BookingStatus::CheckedIn),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(UnknownVariant {
                kind: "booking status",
                value,
            }),
        }
    }
}

/// Booking from the bookings table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub room_ids: Vec<Uuid>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub special_requests: String,
    /// Total payable, tax included
    pub price: Decimal,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Short reference shown to the guest, e.g. `THH-3F2A9C`
    pub fn confirmation_number(&self) -> String {
        let hex = self.id.simple().to_string();
        format!("THH-{}", hex[..6].to_uppercase())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.guest_name,
            &self.email,
            &self.phone,
            &self.room_ids,
            self.check_in,
            self.check_out,
            self.price,
        )
    }
}

/// Payload for creating a booking from the admin back-office
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub room_ids: Vec<Uuid>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_guest_count")]
    pub guest_count: i32,
    #[serde(default)]
    pub special_requests: String,
    pub price: Decimal,
    #[serde(default)]
    pub status: BookingStatus,
}

impl NewBooking {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.guest_name,
            &self.email,
            &self.phone,
            &self.room_ids,
            self.check_in,
            self.check_out,
            self.price,
        )?;
        if self.guest_count < 1 {
            return Err(ValidationError(
                "guestCount must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_guest_count() -> i32 {
    1
}

/// A status change the booking lifecycle does not allow
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot move booking from {from} to {to}")]
pub struct InvalidTransition {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

/// Partial booking update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    pub guest_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub room_ids: Option<Vec<Uuid>>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guest_count: Option<i32>,
    pub special_requests: Option<String>,
    pub price: Option<Decimal>,
    pub status: Option<BookingStatus>,
}

impl BookingUpdate {
    /// Merge the supplied fields into `booking`.
    ///
    /// Fails without touching `booking` if the requested status change is not
    /// a valid transition.
    pub fn apply(self, booking: &mut Booking) -> Result<(), InvalidTransition> {
        if let Some(next) = self.status {
            if !booking.status.can_transition_to(next) {
                return Err(InvalidTransition {
                    from: booking.status,
                    to: next,
                });
            }
        }

        if let Some(guest_name) = self.guest_name {
            booking.guest_name = guest_name;
        }
        if let Some(email) = self.email {
            booking.email = email;
        }
        if let Some(phone) = self.phone {
            booking.phone = phone;
        }
        if let Some(room_ids) = self.room_ids {
            booking.room_ids = room_ids;
        }
        if let Some(check_in) = self.check_in {
            booking.check_in = check_in;
        }
        if let Some(check_out) = self.check_out {
            booking.check_out = check_out;
        }
        if let Some(guest_count) = self.guest_count {
            booking.guest_count = guest_count;
        }
        if let Some(special_requests) = self.special_requests {
            booking.special_requests = special_requests;
        }
        if let Some(price) = self.price {
            booking.price = price;
        }
        if let Some(status) = self.status {
            booking.status = status;
        }
        Ok(())
    }
}

pub(crate) fn validate_guest(
    guest_name: &str,
    email: &str,
    phone: &str,
) -> Result<(), ValidationError> {
    require(guest_name, "guestName")?;
    require(email, "email")?;
    require(phone, "phone")?;
    if !email.contains('@') {
        return Err(ValidationError("Invalid email address".to_string()));
    }
    Ok(())
}

fn validate_fields(
    guest_name: &str,
    email: &str,
    phone: &str,
    room_ids: &[Uuid],
    check_in: NaiveDate,
    check_out: NaiveDate,
    price: Decimal,
) -> Result<(), ValidationError> {
    validate_guest(guest_name, email, phone)?;
    if room_ids.is_empty() {
        return Err(ValidationError::missing("roomIds"));
    }
    if check_out < check_in {
        return Err(ValidationError(
            "checkOut must not be before checkIn".to_string(),
        ));
    }
    if price.is_sign_negative() {
        return Err(ValidationError("Price cannot be negative".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use BookingStatus::*;

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::parse_str("3f2a9c1e-0000-4000-8000-000000000000").unwrap(),
            guest_name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: "+91-9876543210".to_string(),
            room_ids: vec![Uuid::new_v4()],
            check_in: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(),
            guest_count: 1,
            special_requests: String::new(),
            price: dec!(1000),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_forward_transitions() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(CheckedIn));
        assert!(CheckedIn.can_transition_to(Completed));
    }

    #[test]
    fn test_cancellation_only_before_check_in() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!CheckedIn.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Cancelled));
    }

    #[test]
    fn test_no_skipping_or_going_back() {
        assert!(!Pending.can_transition_to(CheckedIn));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(CheckedIn));
    }

    #[test]
    fn test_same_status_is_a_noop() {
        for status in [Pending, Confirmed, CheckedIn, Completed, Cancelled] {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn test_finished_bookings_are_final() {
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for next in [Pending, Confirmed, CheckedIn, Completed, Cancelled] {
                assert_eq!(terminal.can_transition_to(next), terminal == next);
            }
        }
        assert!(!Pending.is_terminal());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(CheckedIn).unwrap(),
            serde_json::json!("checked-in")
        );
        assert_eq!(
            BookingStatus::try_from("checked-in".to_string()).unwrap(),
            CheckedIn
        );
        assert!(BookingStatus::try_from("archived".to_string()).is_err());
    }

    #[test]
    fn test_update_rejects_invalid_transition_without_changes() {
        let mut stored = booking(Pending);
        let update = BookingUpdate {
            guest_name: Some("Jane Doe".to_string()),
            status: Some(Completed),
            ..Default::default()
        };

        assert_eq!(
            update.apply(&mut stored),
            Err(InvalidTransition {
                from: Pending,
                to: Completed
            })
        );
        assert_eq!(stored.guest_name, "John Doe");
        assert_eq!(stored.status, Pending);
    }

    #[test]
    fn test_update_applies_valid_transition() {
        let mut stored = booking(Confirmed);
        BookingUpdate {
            status: Some(CheckedIn),
            ..Default::default()
        }
        .apply(&mut stored)
        .unwrap();

        assert_eq!(stored.status, CheckedIn);
        assert_eq!(stored.price, dec!(1000));
    }

    #[test]
    fn test_confirmation_number() {
        assert_eq!(booking(Pending).confirmation_number(), "THH-3F2A9C");
    }

    #[test]
    fn test_validation() {
        assert!(booking(Pending).validate().is_ok());

        let mut no_rooms = booking(Pending);
        no_rooms.room_ids.clear();
        assert_eq!(
            no_rooms.validate(),
            Err(ValidationError::missing("roomIds"))
        );

        let mut backwards = booking(Pending);
        backwards.check_out = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(backwards.validate().is_err());

        let mut bad_email = booking(Pending);
        bad_email.email = "john.example.com".to_string();
        assert!(bad_email.validate().is_err());
    }
}
