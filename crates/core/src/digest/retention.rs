//! Which raw bytes are stored next to a digest set.
//!
//! Small payloads are kept inline; larger ones are identified but not
//! archived unless the caller asks for the full content.

/// Payloads strictly shorter than this are retained by default.
pub const RETAIN_THRESHOLD: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    threshold: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self { threshold: RETAIN_THRESHOLD }
    }
}

impl RetentionPolicy {
    /// Size of the prefix a streaming reader must buffer before it can decide.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Whether content of `len` bytes is stored.
    pub fn retains(&self, len: u64, persist_full: bool) -> bool {
        persist_full || len < self.threshold as u64
    }

    /// The bytes to store alongside the digest, or `None` when nothing is kept.
    pub fn retain<'a>(&self, bytes: &'a [u8], persist_full: bool) -> Option<&'a [u8]> {
        self.retains(bytes.len() as u64, persist_full).then_some(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_threshold_boundary() {
        let policy = RetentionPolicy::default();
        assert!(policy.retains(0, false));
        assert!(policy.retains(255, false));
        assert!(!policy.retains(256, false));
        assert!(policy.retains(256, true));
        assert!(policy.retains(u64::MAX, true));
    }

    #[test]
    fn test_empty_is_retained() {
        let policy = RetentionPolicy::default();
        assert_eq!(policy.retain(b"", false), Some(&b""[..]));
    }

    proptest! {
        #[test]
        fn prop_retain_without_force(data in prop::collection::vec(any::<u8>(), 0..600)) {
            let policy = RetentionPolicy::default();
            let kept = policy.retain(&data, false);
            if data.len() < RETAIN_THRESHOLD {
                prop_assert_eq!(kept, Some(&data[..]));
            } else {
                prop_assert_eq!(kept, None);
            }
        }

        #[test]
        fn prop_retain_with_force(data in prop::collection::vec(any::<u8>(), 0..600)) {
            let policy = RetentionPolicy::default();
            prop_assert_eq!(policy.retain(&data, true), Some(&data[..]));
        }
    }
}
