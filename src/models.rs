pub mod activities;
pub mod auth;
pub mod imports;
pub mod reports;
pub mod workers;
