//! Application state module

mod app_state;
mod commuting;
mod form_state;
mod forms;

pub use app_state::*;
pub use commuting::CommutingType;
pub use form_state::{
    format_date, DetailEdit, DetailField, DetailRecord, FormSnapshot, FormState, Identity,
    IdentityField, MissingField,
};
pub use forms::*;
