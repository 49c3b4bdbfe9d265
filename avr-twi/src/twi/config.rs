use super::Wait;

/// What `page_read` stores in the last slot of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Terminator {
    /// Overwrite the last received byte with `0`, so a text buffer is always
    /// NUL-terminated. The final payload byte is lost.
    #[default]
    Nul,
    /// Keep every received byte.
    None,
}

/// What `page_write` does when a data byte is not acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NackPolicy {
    /// Return immediately without a STOP condition. The bus stays owned by
    /// this master until the caller issues `stop()` or a new `start()`.
    #[default]
    LeaveOpen,
    /// Issue STOP before returning.
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// SCL frequency in kHz
    pub frequency_khz: u16,
    pub wait: Wait,
    pub terminator: Terminator,
    pub nack_policy: NackPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frequency_khz: 100,
            wait: Wait::Unbounded,
            terminator: Terminator::Nul,
            nack_policy: NackPolicy::LeaveOpen,
        }
    }
}

impl Config {
    #[inline]
    pub const fn with_frequency(mut self, frequency_khz: u16) -> Self {
        self.frequency_khz = frequency_khz;
        self
    }

    #[inline]
    pub const fn with_wait(mut self, wait: Wait) -> Self {
        self.wait = wait;
        self
    }

    #[inline]
    pub const fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    #[inline]
    pub const fn with_nack_policy(mut self, nack_policy: NackPolicy) -> Self {
        self.nack_policy = nack_policy;
        self
    }
}
