pub use super::clients::Entity as Clients;
pub use super::reservations::Entity as Reservations;
pub use super::transactions::Entity as Transactions;
