//! Shared kernel used by every bounded context.
//!
//! Only identity and money live here. Everything else belongs to a context.

pub mod amount;
pub mod reference;

pub use amount::Amount;
pub use reference::{Ref, generate_ref_string};
