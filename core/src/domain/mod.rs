//! Domain layer - entities and value objects.

pub mod entities;
pub mod value_objects;

pub use entities::code::{Code, DEFAULT_CODE_LENGTH, DEFAULT_VALID_MINUTES};
pub use value_objects::phone::PhoneNumber;
