//! Route handlers organized by domain.

pub mod health;
pub mod job;
pub mod product;
pub mod seat;
