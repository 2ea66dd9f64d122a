//! Workspace-level integration test host. The actual suites live in
//! `tests/`; this crate exports nothing.
