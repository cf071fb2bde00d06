//! Ordering's view of other contexts.
//!
//! Nothing here depends on another context's crate. The composition root
//! adapts the real services to these contracts.

pub mod payments;
