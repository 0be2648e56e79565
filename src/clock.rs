/// Timestamp of the last accepted user interaction (ms since boot).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InteractionClock {
    last_ms: u64,
}

impl InteractionClock {
    pub const fn new(now_ms: u64) -> Self {
        Self { last_ms: now_ms }
    }

    /// Record an interaction at `now_ms`.
    pub fn touch(&mut self, now_ms: u64) {
        self.last_ms = now_ms;
    }

    pub fn last_ms(&self) -> u64 {
        self.last_ms
    }

    /// Elapsed time since the last interaction. A clock that reads earlier
    /// than the stored stamp counts as zero idle time.
    pub fn idle_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_ms)
    }
}
