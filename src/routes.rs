pub mod auth;
pub mod clock;
pub mod error;
pub mod health;
pub mod navigation;
pub mod user;
