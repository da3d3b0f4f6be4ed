//! Profiling utilities based on the `puffin` crate.
//!
//! Scopes are recorded only while profiling is switched on, so the
//! `profile_function!` markers in hot paths cost next to nothing otherwise.

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Turn scope recording on or off.
pub fn set_enabled(enabled: bool) {
    puffin::set_scopes_on(enabled);
}

/// Whether scope recording is on.
pub fn is_enabled() -> bool {
    puffin::are_scopes_on()
}

/// Enable profiling and serve the data to `puffin_viewer` on `addr`.
///
/// # Example
/// ```no_run
/// berth_core::profiling::init_profiling("0.0.0.0:8585");
/// ```
#[cfg(feature = "profiling")]
pub fn init_profiling(addr: &str) {
    puffin::set_scopes_on(true);

    match puffin_http::Server::new(addr) {
        Ok(server) => {
            tracing::info!("Puffin profiler server started on http://{}", addr);
            let _ = PROFILING_SERVER.set(server);
        }
        Err(e) => {
            tracing::error!("Failed to start puffin server: {}", e);
        }
    }
}

/// Mark the end of one host event-loop iteration.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
