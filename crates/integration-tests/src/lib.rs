//! Integration tests for Mesa.
//!
//! The actual tests live in `tests/`; this library is intentionally empty.
