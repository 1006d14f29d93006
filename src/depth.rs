//! Container depth tracking shared by the encoder and decoder.

use crate::error::{Error, Result};

/// Counts how deeply the current call is nested inside containers.
///
/// Every struct, tuple, sequence, map, option and enum variant enters one level on the
/// way in and leaves it on the way out.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DepthGuard {
    current: usize,
    max: usize,
}

impl DepthGuard {
    pub(crate) fn new(max: usize) -> Self {
        DepthGuard { current: 0, max }
    }

    /// Enters one nesting level, failing once the ceiling is passed.
    pub(crate) fn enter(&mut self) -> Result<()> {
        if self.current >= self.max {
            return Err(Error::MaxContainerDepthExceeded(self.max));
        }
        self.current += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        debug_assert!(self.current > 0, "unbalanced container depth");
        self.current = self.current.saturating_sub(1);
    }

    /// Drops every open level.
    pub(crate) fn reset(&mut self) {
        self.current = 0;
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> usize {
        self.current
    }
}
