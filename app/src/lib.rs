pub mod config;
pub mod database;
pub mod document;
pub mod modules;
pub mod server;
pub mod utils;
