pub mod actions;
pub mod api;
pub mod config;
pub mod error;
pub mod mock_data;
pub mod models;
pub mod normalize;
pub mod server;
pub mod workers;
