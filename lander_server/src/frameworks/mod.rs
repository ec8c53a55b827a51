// Frameworks layer: configuration and runtime bootstrap.

pub mod config;
pub mod server;
