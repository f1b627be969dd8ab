pub mod fares;
pub mod health;
