//! Domain entities representing core business objects.

pub mod code;

pub use code::{Code, DEFAULT_CODE_LENGTH, DEFAULT_VALID_MINUTES};
