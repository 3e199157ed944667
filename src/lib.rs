// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod announcer;
pub mod audio;
pub mod config;
pub mod moves;
pub mod runtime;
pub mod schedule;
pub mod session;
pub mod ui;
