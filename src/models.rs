pub mod clock;
pub mod health;
pub mod navigation;
pub mod role;
pub mod session;
pub mod user;
