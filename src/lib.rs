// Library for tests to access modules

pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod routes;
pub mod telemetry_repo;
