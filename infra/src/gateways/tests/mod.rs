//! Unit tests for gateways and the ordered dispatcher.
