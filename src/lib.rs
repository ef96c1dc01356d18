pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod routes;
pub mod sources;
