pub mod access;
pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod docs;
pub mod errors;
pub mod model;
pub mod routes;
pub mod utils;
pub mod workflow;
