pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod server;
pub mod validation;
pub mod views;
pub mod workflow;
