//! Global `tracing` default.
//!
//! Only one global subscriber can exist per process; whichever service logger
//! gets here first owns it.

use tracing::Dispatch;

/// Install `dispatch` as the process-wide default.
///
/// Returns `false` (and changes nothing) if a global default was already set,
/// e.g. by the embedding application.
pub fn install_global(dispatch: &Dispatch) -> bool {
    tracing::dispatcher::set_global_default(dispatch.clone()).is_ok()
}
