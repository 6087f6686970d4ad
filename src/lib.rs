// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod catalog;
pub mod celebration;
pub mod quiz;
pub mod record;
pub mod runtime;
pub mod session;
