pub mod database;
pub mod health;
pub mod layout;
pub mod memory;
pub mod store;
pub mod uploads;
