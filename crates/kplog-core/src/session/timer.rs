use std::time::Instant;

/// Start instant of a session
///
/// Elapsed time is read from the monotonic clock, so it never goes
/// backwards even if the wall clock is adjusted mid-session.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    begin: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            begin: Instant::now(),
        }
    }

    pub fn elapsed_micros(&self) -> u64 {
        u64::try_from(self.begin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }

    pub fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.begin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}
