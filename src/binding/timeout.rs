//! Host timeout policy.
//!
//! The engine only knows "seconds, 0 = forever". Hosts speak a richer
//! language: no timeout given, "cache forever", or "do not cache at all".

/// Timeout requested by a host-level caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeout {
    /// Use the configured default TTL
    #[default]
    Default,
    /// Never expire
    Never,
    /// Expire after this many seconds; 0 means the value is not cached
    Seconds(u64),
}

impl Timeout {
    /// Resolves to an engine TTL, or `None` when the value must not be stored.
    pub fn resolve(self, default_ttl: u64) -> Option<u64> {
        match self {
            Timeout::Default => Some(default_ttl),
            Timeout::Never => Some(0),
            Timeout::Seconds(0) => None,
            Timeout::Seconds(secs) => Some(secs),
        }
    }
}

impl From<Option<u64>> for Timeout {
    /// `None` is the "no expiry" marker used by request bodies carrying `null`.
    fn from(value: Option<u64>) -> Self {
        match value {
            Some(secs) => Timeout::Seconds(secs),
            None => Timeout::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(Timeout::Default.resolve(60), Some(60));
        assert_eq!(Timeout::Never.resolve(60), Some(0));
        assert_eq!(Timeout::Seconds(0).resolve(60), None);
        assert_eq!(Timeout::Seconds(5).resolve(60), Some(5));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Timeout::from(None), Timeout::Never);
        assert_eq!(Timeout::from(Some(3)), Timeout::Seconds(3));
    }
}
