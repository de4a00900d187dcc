//! Hex-word scoring of node addresses.

use crate::crypto::{Address, ADDRESS_LEN};

/// Byte pairs that read as English words in hex.
pub const HEX_WORDS: [[u8; 2]; 8] = [
    [0xba, 0xbe],
    [0xbe, 0xad],
    [0xbe, 0xef],
    [0xde, 0xad],
    [0xde, 0xaf],
    [0xde, 0xed],
    [0xfa, 0xce],
    [0xfe, 0xed],
];

/// First scanned offset; the leading two bytes are prefix and ones count.
const SCAN_START: usize = 2;

/// End of the scanned region (exclusive). Only the first half of the address is scored.
const SCAN_END: usize = ADDRESS_LEN / 2;

/// Highest count [`WordScorer::count`] can return.
pub const MAX_WORD_HITS: usize = (SCAN_END - SCAN_START) / 2;

/// Counts aligned hex words in the first half of an address.
#[derive(Debug, Clone, Copy)]
pub struct WordScorer {
    words: &'static [[u8; 2]],
}

impl WordScorer {
    /// Creates a scorer over a custom word table.
    pub const fn new(words: &'static [[u8; 2]]) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &'static [[u8; 2]] {
        self.words
    }

    /// Counts the 2-byte windows at offsets 2, 4, ... below half the address
    /// length that match a word in the table.
    #[inline]
    pub fn count(&self, address: &Address) -> usize {
        let bytes = address.as_bytes();
        (SCAN_START..SCAN_END)
            .step_by(2)
            .filter(|&idx| self.words.contains(&[bytes[idx], bytes[idx + 1]]))
            .count()
    }
}

impl Default for WordScorer {
    fn default() -> Self {
        Self::new(&HEX_WORDS)
    }
}
