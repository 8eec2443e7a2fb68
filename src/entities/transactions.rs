//! `SeaORM` Entity for transactions table
//!
//! One row per parking session. `leaved_at` is stamped when the ticket is
//! scanned on exit.

use chrono::FixedOffset;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub duration: i32,
    pub created_at: DateTimeWithTimeZone,
    pub expires_at: Option<DateTimeWithTimeZone>,
    pub leaved_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_closed(&self) -> bool {
        self.leaved_at.is_some()
    }

    /// SQLite hands timestamps back in UTC; this re-expresses all three in
    /// `offset` without changing the instants.
    pub fn in_offset(self, offset: &FixedOffset) -> Self {
        Self {
            created_at: self.created_at.with_timezone(offset),
            expires_at: self.expires_at.map(|t| t.with_timezone(offset)),
            leaved_at: self.leaved_at.map(|t| t.with_timezone(offset)),
            ..self
        }
    }
}
