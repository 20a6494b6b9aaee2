//! Deterministic workload partitioning across nodes.
//!
//! A sweep is spread over several machines by running one driver per node,
//! each on its own contiguous slice of the dataset list. Slices never overlap,
//! so the shared results directory needs no locking.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Index range of slice `index` when `len` items are split into `parts` slices.
///
/// Slice lengths are `len / parts` or one more; the first `len % parts`
/// slices receive the extra item.
fn slice_bounds(len: usize, parts: usize, index: usize) -> Range<usize> {
    let base = len / parts;
    let extra = len % parts;
    let start = index * base + index.min(extra);
    let size = base + usize::from(index < extra);
    start..start + size
}

/// Split `items` into `parts` contiguous, order-preserving slices.
///
/// Returns an empty vector when `parts` is zero. When `parts > items.len()`
/// the trailing slices are empty.
pub fn divide<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    if parts == 0 {
        return Vec::new();
    }
    (0..parts)
        .map(|index| &items[slice_bounds(items.len(), parts, index)])
        .collect()
}

/// Which node of how many this driver instance is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAssignment {
    /// Total number of nodes sharing the sweep
    pub total: usize,
    /// This node's 0-based index
    pub index: usize,
}

impl Default for NodeAssignment {
    fn default() -> Self {
        Self { total: 1, index: 0 }
    }
}

impl NodeAssignment {
    pub fn new(total: usize, index: usize) -> Self {
        Self { total, index }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total == 0 {
            return Err(ConfigError::NoNodes);
        }
        if self.index >= self.total {
            return Err(ConfigError::NodeIndexOutOfRange {
                index: self.index,
                total: self.total,
            });
        }
        Ok(())
    }

    /// This node's slice of `items`.
    pub fn select<'a, T>(&self, items: &'a [T]) -> Result<&'a [T], ConfigError> {
        self.validate()?;
        Ok(&items[slice_bounds(items.len(), self.total, self.index)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_even() {
        let items = [1, 2, 3, 4, 5, 6];
        let slices = divide(&items, 3);
        assert_eq!(slices, vec![&[1, 2][..], &[3, 4][..], &[5, 6][..]]);
    }

    #[test]
    fn test_divide_extra_goes_to_earlier_slices() {
        let items = [1, 2, 3, 4, 5, 6, 7];
        let slices = divide(&items, 3);
        assert_eq!(slices, vec![&[1, 2, 3][..], &[4, 5][..], &[6, 7][..]]);
    }

    #[test]
    fn test_divide_more_parts_than_items() {
        let items = ["a", "b"];
        let slices = divide(&items, 4);
        assert_eq!(slices.len(), 4);
        assert_eq!(slices[0], &["a"][..]);
        assert_eq!(slices[1], &["b"][..]);
        assert!(slices[2].is_empty());
        assert!(slices[3].is_empty());
    }

    #[test]
    fn test_divide_zero_parts() {
        let items = [1, 2, 3];
        assert!(divide(&items, 0).is_empty());
    }

    #[test]
    fn test_select_matches_divide() {
        let items: Vec<u32> = (0..61).collect();
        let slices = divide(&items, 4);
        for (index, slice) in slices.iter().enumerate() {
            let node = NodeAssignment::new(4, index);
            assert_eq!(node.select(&items).unwrap(), *slice);
        }
    }

    #[test]
    fn test_select_rejects_out_of_range_index() {
        let node = NodeAssignment::new(4, 4);
        assert_eq!(
            node.select(&[1, 2, 3]),
            Err(ConfigError::NodeIndexOutOfRange { index: 4, total: 4 })
        );
    }

    #[test]
    fn test_select_rejects_zero_nodes() {
        let node = NodeAssignment::new(0, 0);
        assert_eq!(node.validate(), Err(ConfigError::NoNodes));
    }
}
