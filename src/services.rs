pub mod auth;
pub mod catalog_service;
pub mod import_service;
pub mod report_service;
