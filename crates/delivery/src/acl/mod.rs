//! Delivery's view of the Kitchen and Ordering contexts.

pub mod kitchen;
pub mod ordering;
