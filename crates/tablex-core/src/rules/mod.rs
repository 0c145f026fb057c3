pub mod validation;

pub use validation::{validate_items, validate_snapshot};
