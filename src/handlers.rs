pub mod auth;
pub mod imports;
pub mod index;
pub mod reports;
pub mod workers;
