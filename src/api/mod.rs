pub mod auth;
pub mod client;
pub mod products;

pub use client::*;
