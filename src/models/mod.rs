//! Domain models

pub mod shop;
pub mod ticket;
pub mod user;
