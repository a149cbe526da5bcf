//! Unit tests for storage adapters.
