pub mod api_connection;
pub mod backend;
pub mod cli;
pub mod collections;
pub mod config;
pub mod i18n;
pub mod model;
pub mod render;
pub mod request_builder;
pub mod response_normalizer;
pub mod session;
pub mod store;
