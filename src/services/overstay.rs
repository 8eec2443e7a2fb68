//! Ticket expiry and overstay charges.
//!
//! Pure functions of their inputs; "now" is always passed in by the caller.

use chrono::{DateTime, Duration, FixedOffset};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overstay {
    pub ticket_expired: bool,
    /// Whole hours past expiry, rounded down.
    pub hours_expired: i64,
    pub extra_charge: Decimal,
}

impl Overstay {
    pub const NONE: Overstay = Overstay {
        ticket_expired: false,
        hours_expired: 0,
        extra_charge: Decimal::ZERO,
    };
}

/// Expiry of a ticket opened at `created_at` for `duration` hours.
/// Open-ended tickets (`duration <= 0`) never expire.
pub fn expires_at(
    created_at: DateTime<FixedOffset>,
    duration: i32,
) -> Option<DateTime<FixedOffset>> {
    if duration > 0 {
        Some(created_at + Duration::hours(i64::from(duration)))
    } else {
        None
    }
}

/// The charge saturates at `Decimal::MAX` when `hours_expired * rate` does not fit.
pub fn compute_overstay(
    expires_at: Option<DateTime<FixedOffset>>,
    now: DateTime<FixedOffset>,
    rate: Decimal,
) -> Overstay {
    let Some(expires_at) = expires_at else {
        return Overstay::NONE;
    };

    if now <= expires_at {
        return Overstay::NONE;
    }

    let hours_expired = now.signed_duration_since(expires_at).num_hours();
    let extra_charge = Decimal::from(hours_expired)
        .checked_mul(rate)
        .unwrap_or(Decimal::MAX);
    Overstay {
        ticket_expired: true,
        hours_expired,
        extra_charge,
    }
}
