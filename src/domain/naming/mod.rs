//! File naming rules

mod base_name;
mod name_field;
mod sequence;

pub use base_name::{base_name_or, sanitize_base_name};
pub use name_field::NameField;
pub use sequence::{next_in_sequence, numeric_stem, DEFAULT_FLOOR};
