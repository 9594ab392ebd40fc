// Library exports for testing and the binary entrypoint

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
