use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Per-puzzle record of which pieces have been solved: index `i` is true iff
/// question `i` has been answered correctly since the last reset.
///
/// Serializes transparently as a JSON array of booleans, which is also the
/// persisted wire format. No operation un-reveals a single piece, so the
/// revealed count is monotone between [`RevealMask::clear`] calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevealMask(Vec<bool>);

impl RevealMask {
    pub fn new(len: usize) -> Self {
        Self(vec![false; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Out-of-range indices read as unrevealed.
    pub fn is_revealed(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Marks `index` revealed, reporting whether anything changed.
    /// Out-of-range indices are ignored.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.0.get_mut(index) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.0.iter().filter(|&&revealed| revealed).count()
    }

    pub fn all_revealed(&self) -> bool {
        self.0.iter().all(|&revealed| revealed)
    }

    /// First unrevealed index in grid order.
    pub fn first_unrevealed(&self) -> Option<usize> {
        self.0.iter().position(|&revealed| !revealed)
    }

    pub fn clear(&mut self) {
        self.0.fill(false);
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }
}
