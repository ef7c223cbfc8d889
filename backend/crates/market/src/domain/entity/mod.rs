//! Entity Module

pub mod barter;
pub mod listing;
pub mod message;
pub mod order;
pub mod rating;
