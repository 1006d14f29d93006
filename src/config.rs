//! Limits applied to a single encode or decode call.

/// Hard ceiling on container nesting.
pub const MAX_CONTAINER_DEPTH: usize = 500;

/// Hard ceiling on the element count of any sequence, map or string.
pub const MAX_SEQUENCE_LENGTH: usize = (1 << 31) - 1;

/// Per-call codec limits.
///
/// Both limits can only be lowered below the hard ceilings; larger values are
/// clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_container_depth: usize,
    max_sequence_length: usize,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum container depth.
    pub fn with_max_container_depth(mut self, depth: usize) -> Self {
        self.max_container_depth = depth.min(MAX_CONTAINER_DEPTH);
        self
    }

    /// Sets the maximum length accepted for sequences, maps, strings and byte strings.
    pub fn with_max_sequence_length(mut self, len: usize) -> Self {
        self.max_sequence_length = len.min(MAX_SEQUENCE_LENGTH);
        self
    }

    pub fn max_container_depth(&self) -> usize {
        self.max_container_depth
    }

    pub fn max_sequence_length(&self) -> usize {
        self.max_sequence_length
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_container_depth: MAX_CONTAINER_DEPTH,
            max_sequence_length: MAX_SEQUENCE_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_container_depth(), 500);
        assert_eq!(config.max_sequence_length(), 2147483647);
    }

    #[test]
    fn test_limits_are_clamped() {
        let config = Config::new()
            .with_max_container_depth(10_000)
            .with_max_sequence_length(usize::MAX);
        assert_eq!(config.max_container_depth(), MAX_CONTAINER_DEPTH);
        assert_eq!(config.max_sequence_length(), MAX_SEQUENCE_LENGTH);

        let config = Config::new().with_max_container_depth(3);
        assert_eq!(config.max_container_depth(), 3);
    }
}
