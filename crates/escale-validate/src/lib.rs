mod error_map;
mod profile;
mod rules;

pub use error_map::ErrorMap;
pub use profile::{ColumnProfile, guess_from_name, profile_column};
pub use rules::{
    CellError, expected_type, has_letters, is_date_shaped, is_numeric_literal, validate_value,
};
