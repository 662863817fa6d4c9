//! Workspace-level golden tests for fibdrv-rs.
//!
//! The tests live in `tests/`; this library target is intentionally empty.
