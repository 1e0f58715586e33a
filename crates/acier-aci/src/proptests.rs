//! Property-based tests for the ACI model.
