//! Unit tests for the audit pipeline.
