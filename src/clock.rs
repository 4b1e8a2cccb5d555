use std::time::Duration;

// `std::time::Instant` panics on wasm32-unknown-unknown, so the browser build asks JavaScript for the time
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
#[derive(Copy, Clone, Debug)]
pub(crate) struct Stopwatch {
    started_ms: f64,
}

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self { started_ms: js_sys::Date::now() }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(((js_sys::Date::now() - self.started_ms) / 1000.0).max(0.0))
    }
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
#[derive(Copy, Clone, Debug)]
pub(crate) struct Stopwatch {
    started: std::time::Instant,
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self { started: std::time::Instant::now() }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
