//! Shared test utilities for focus-db unit tests.
