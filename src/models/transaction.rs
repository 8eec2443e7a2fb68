use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::transactions;
use crate::services::overstay::Overstay;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenTransactionRequest {
    #[serde(default)]
    pub duration: i32,
}

/// `?id=` form of the leave endpoint, used by the mobile scanner.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveQuery {
    pub id: i32,
}

/// A parking session together with its overstay, computed at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i32,
    pub duration: i32,
    pub created_at: DateTime<FixedOffset>,
    pub expires_at: Option<DateTime<FixedOffset>>,
    pub leaved_at: Option<DateTime<FixedOffset>>,
    /// `created_at` as printed on the ticket, `DD-MM-YYYY HH:MM:SS`.
    pub date: String,
    pub ticket_expired: bool,
    pub hours_expired: i64,
    pub extra_charge: Decimal,
}

impl TransactionResponse {
    /// Timestamps are rendered in `offset`, the ledger's civil timezone.
    pub fn new(model: transactions::Model, overstay: Overstay, offset: &FixedOffset) -> Self {
        let model = model.in_offset(offset);
        Self {
            id: model.id,
            duration: model.duration,
            date: model.created_at.format("%d-%m-%Y %H:%M:%S").to_string(),
            created_at: model.created_at,
            expires_at: model.expires_at,
            leaved_at: model.leaved_at,
            ticket_expired: overstay.ticket_expired,
            hours_expired: overstay.hours_expired,
            extra_charge: overstay.extra_charge,
        }
    }
}
