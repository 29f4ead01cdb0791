pub mod apis;
pub mod common;
pub mod config;
pub mod domain;
pub mod export;
pub mod geo;
pub mod logging;
pub mod pipeline;
