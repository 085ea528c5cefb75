//! The opaque start argument forwarded from host to worker.

/// Machine word the host passes to a worker process at launch.
///
/// The value crosses two boundaries unmodified: host → worker entry
/// export, then worker → engine entry point. Its meaning is defined
/// entirely by the loaded engine library; the shim never inspects it.
/// The raw word is only exposed at the FFI boundary via
/// [`StartArgument::as_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StartArgument(usize);

impl StartArgument {
    /// Argument used when the host has nothing to convey.
    pub const ZERO: Self = Self(0);

    /// Wraps the raw word received from the host.
    #[must_use]
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw word for forwarding across the entry ABI.
    #[must_use]
    pub const fn as_raw(self) -> usize {
        self.0
    }
}

impl From<usize> for StartArgument {
    fn from(raw: usize) -> Self {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::StartArgument;

    #[test]
    fn round_trips_the_raw_word() {
        assert_eq!(StartArgument::from_raw(42).as_raw(), 42);
        assert_eq!(StartArgument::ZERO.as_raw(), 0);
    }
}
