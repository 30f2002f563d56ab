//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive the real `TuiApp` through key and
//! mouse events against a `TestBackend`.
