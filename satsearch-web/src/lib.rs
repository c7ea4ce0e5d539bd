pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod routes;
