//! Unit tests for the verification-code lifecycle engine.

mod mocks;
