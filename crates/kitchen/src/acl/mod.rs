//! Kitchen's view of other contexts.

pub mod ordering;
