/// Wall-clock stopwatch for perf sections.
///
/// wasm32 has no `Instant`, so it reads `Date.now()` (ms resolution).
#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    #[cfg(target_arch = "wasm32")]
    started_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    started: std::time::Instant,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            PerfTimer { started_ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            PerfTimer { started: std::time::Instant::now() }
        }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() - self.started_ms
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.started.elapsed().as_secs_f64() * 1000.0
        }
    }

    /// `Some(timer)` only when perf is on, so call sites stay branch-light.
    pub(crate) fn start_if(enabled: bool) -> Option<Self> {
        enabled.then(Self::start)
    }
}

/// Elapsed ms of an optional timer (0 when perf is off)
pub(crate) fn lap(timer: Option<PerfTimer>) -> f64 {
    timer.map(|t| t.elapsed_ms()).unwrap_or(0.0)
}
