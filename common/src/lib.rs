//! # Hostscope Common
//!
//! Pure domain building blocks shared by every other crate in the workspace:
//!
//! * **[`network`]**: address classification, contiguous address ranges and network lists.
//! * **[`config`]**: the `key=value` configuration dialect and the runtime [`config::Config`].
//!
//! Nothing in here spawns processes or touches the network.

pub mod config;
pub mod network;

#[doc(hidden)]
pub use tracing as __tracing;

/// Target used by [`success!`] so formatters can render it apart from plain `info` events.
pub const SUCCESS_TARGET: &str = "hostscope::success";

/// Emits an `info` event flagged as a successful outcome.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: $crate::SUCCESS_TARGET, $($arg)*)
    };
}
