//! Profiling utilities based on the `puffin` crate.

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

use crate::config::ProfilingMode;

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Record scopes in-process only.
    InProcess,
    /// Send profiling data to puffin_viewer via HTTP.
    #[cfg(feature = "profiling")]
    PuffinHttp,
}

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Default address of the puffin HTTP server.
pub const PUFFIN_ADDR: &str = "0.0.0.0:8585";

/// Initialize profiling with the specified backend.
///
/// # Example
/// ```no_run
/// use lettera_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::InProcess);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    puffin::set_scopes_on(true);
    match backend {
        ProfilingBackend::InProcess => {
            tracing::debug!("puffin scopes enabled");
        }
        #[cfg(feature = "profiling")]
        ProfilingBackend::PuffinHttp => match puffin_http::Server::new(PUFFIN_ADDR) {
            Ok(server) => {
                tracing::info!("Puffin profiler server started on http://{}", PUFFIN_ADDR);
                let _ = PROFILING_SERVER.set(server);
            }
            Err(e) => {
                tracing::error!("Failed to start puffin server: {}", e);
            }
        },
    }
}

/// Enable profiling according to an engine [`ProfilingMode`].
pub fn init_from_mode(mode: ProfilingMode) {
    match mode {
        ProfilingMode::Off => {}
        ProfilingMode::On => init_profiling(ProfilingBackend::InProcess),
        #[cfg(feature = "profiling")]
        ProfilingMode::WithWebserver => init_profiling(ProfilingBackend::PuffinHttp),
        #[cfg(not(feature = "profiling"))]
        ProfilingMode::WithWebserver => {
            tracing::warn!("puffin webserver requested without the `profiling` feature");
            init_profiling(ProfilingBackend::InProcess);
        }
    }
}

/// Mark the start of a new frame for profiling.
///
/// The engine calls this once per update cycle.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
