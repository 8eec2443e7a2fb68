// src/lib.rs

use chrono::{DateTime, FixedOffset};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use clock::Clock;
use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Arc<Config>, clock: Arc<dyn Clock>) -> Self {
        Self { db, config, clock }
    }

    /// Current time in the ledger's civil timezone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now().with_timezone(&self.config.utc_offset)
    }
}

pub mod entities {
    pub mod prelude;
    pub mod clients;
    pub mod reservations;
    pub mod transactions;
}

pub mod services {
    pub mod ledger;
    pub mod overstay;
    pub mod reservation_dates;
}

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod models;
pub mod routes;
