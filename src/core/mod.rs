//! Configuration, data model and status classification

pub mod channels;
pub mod config;
pub mod models;
pub mod status;
