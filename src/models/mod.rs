use serde::{Deserialize, Serialize};

pub mod client;
pub mod reservation;
pub mod transaction;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
