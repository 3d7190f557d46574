//! Logging facilities for Horizon Select.
//!
//! Horizon Select uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_select=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_select_core::signal";
    /// Combobox state machine target.
    pub const SELECT: &str = "horizon_select::select";
    /// Candidate filtering target.
    pub const FILTER: &str = "horizon_select::filter";
    /// Outside-interaction monitor target.
    pub const MONITOR: &str = "horizon_select::monitor";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_select::config";
}
