//! Value objects for the domain layer.

pub mod phone;

pub use phone::PhoneNumber;
