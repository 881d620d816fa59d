pub mod auth;
pub mod products;

pub use auth::*;
pub use products::*;
