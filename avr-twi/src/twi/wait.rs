/// How long a primitive spins on `TWINT` before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wait {
    /// Spin forever. A stuck bus (SDA or SCL held low) hangs the caller.
    #[default]
    Unbounded,
    /// Poll `TWCR` at most this many times (at least once), then fail with
    /// [`Error::Timeout`](super::Error::Timeout).
    Spins(u32),
}

impl Wait {
    /// Calls `poll` until it returns `true` or the bound runs out.
    #[inline]
    pub(crate) fn spin<P: FnMut() -> bool>(self, mut poll: P) -> bool {
        match self {
            Wait::Unbounded => {
                while !poll() {}
                true
            }
            Wait::Spins(limit) => (0..limit.max(1)).any(|_| poll()),
        }
    }
}
