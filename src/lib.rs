pub mod config;
pub mod content;
pub mod courier;
pub mod error;
pub mod listings;
pub mod presentation;
