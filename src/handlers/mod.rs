pub mod client;
pub mod reservation;
pub mod transaction;

pub async fn hello() -> &'static str {
    "Hello from Parking Ledger!"
}
