//! Form interaction layer
//!
//! Edit buffers and focus navigation on top of the canonical [`FormState`].
//!
//! [`FormState`]: super::FormState

mod field;
mod focus;

pub use field::FormField;
pub use focus::{next_focus, prev_focus, Focus};
