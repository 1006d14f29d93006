//! Canonical map key ordering.
//!
//! Map entries are ordered by the bytes of their encoded keys. The encoder
//! sorts with [`compare_keys`] and the decoder validates with [`KeyOrder`],
//! which uses the same comparison.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::ops::Range;

/// Unsigned lexicographic comparison of two encoded keys.
pub fn compare_keys(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// Tracks the previously decoded key of a map and rejects any key that is not
/// strictly greater than it.
#[derive(Debug, Default)]
pub struct KeyOrder {
    previous: Option<Range<usize>>,
}

impl KeyOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the key at `current` in `buf` against the previous key.
    pub fn check(&mut self, buf: &[u8], current: Range<usize>) -> Result<()> {
        if let Some(previous) = &self.previous {
            if compare_keys(&buf[previous.clone()], &buf[current.clone()]) != Ordering::Less {
                return Err(Error::UnorderedMapKeys);
            }
        }
        self.previous = Some(current);
        Ok(())
    }
}

/// Sorts encoded entries into canonical order, rejecting duplicate keys.
pub(crate) fn sort_entries(entries: &mut [(Vec<u8>, Vec<u8>)]) -> Result<()> {
    entries.sort_by(|a, b| compare_keys(&a.0, &b.0));
    if entries
        .windows(2)
        .any(|pair| compare_keys(&pair[0].0, &pair[1].0) == Ordering::Equal)
    {
        return Err(Error::UnorderedMapKeys);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare_keys(&[0x01], &[0x01, 0x00]), Ordering::Less);
        assert_eq!(compare_keys(&[0x02], &[0x01, 0xFF]), Ordering::Greater);
        assert_eq!(compare_keys(&[0x80], &[0x7F]), Ordering::Greater);
    }

    #[test]
    fn test_increasing_keys_accepted() {
        // Three one-byte keys laid out back to back.
        let buf = [0x01, 0x02, 0x03];
        let mut order = KeyOrder::new();
        order.check(&buf, 0..1).unwrap();
        order.check(&buf, 1..2).unwrap();
        order.check(&buf, 2..3).unwrap();
    }

    #[test]
    fn test_decreasing_keys_rejected() {
        let buf = [0x02, 0x01];
        let mut order = KeyOrder::new();
        order.check(&buf, 0..1).unwrap();
        assert!(matches!(
            order.check(&buf, 1..2),
            Err(Error::UnorderedMapKeys)
        ));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let buf = [0x01, 0x61, 0x01, 0x61];
        let mut order = KeyOrder::new();
        order.check(&buf, 0..2).unwrap();
        assert!(matches!(
            order.check(&buf, 2..4),
            Err(Error::UnorderedMapKeys)
        ));
    }

    #[test]
    fn test_sort_entries() {
        let mut entries = vec![
            (vec![0x01, 0x62], vec![1]),
            (vec![0x01, 0x61], vec![2]),
        ];
        sort_entries(&mut entries).unwrap();
        assert_eq!(entries[0].0, vec![0x01, 0x61]);

        let mut dupes = vec![(vec![0x01], vec![1]), (vec![0x01], vec![2])];
        assert!(matches!(
            sort_entries(&mut dupes),
            Err(Error::UnorderedMapKeys)
        ));
    }
}
