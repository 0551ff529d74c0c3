pub mod api_base;
pub mod config;
pub mod dates;
pub mod feed;
pub mod fetch;
pub mod http_client;
pub mod matches;
pub mod render;
pub mod state;
