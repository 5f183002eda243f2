use std::fmt;
use std::hash::{Hash, Hasher as StdHasher};

use serde::{Serialize, Serializer};

/// Number of 32-bit words in a [`Digest`].
pub const DIGEST_WORDS: usize = 5;

/// Width of a [`Digest`] in bytes (160 bits).
pub const DIGEST_BYTES: usize = DIGEST_WORDS * 4;

/// An immutable 160-bit content fingerprint.
///
/// Equality compares every word; two logically equal state values always
/// produce identical digests. The `Hash` impl feeds the XOR fold of the words
/// instead of rehashing the content.
#[derive(Clone, Copy, Eq)]
pub struct Digest {
    words: [u32; DIGEST_WORDS],
}

impl Digest {
    /// Builds a digest from the leading [`DIGEST_BYTES`] of a hash output.
    pub(crate) fn from_prefix(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() >= DIGEST_BYTES);
        let mut words = [0u32; DIGEST_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self { words }
    }

    /// The digest as raw bytes, in the order they were produced.
    pub fn to_bytes(&self) -> [u8; DIGEST_BYTES] {
        let mut bytes = [0u8; DIGEST_BYTES];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.words.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// XOR fold of the digest words.
    pub fn fold(&self) -> u32 {
        self.words[0] ^ self.words[1] ^ self.words[2] ^ self.words[3] ^ self.words[4]
    }
}

// Hashes are near-uniformly random, so the first word almost always settles it.
impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.words[0] == other.words[0]
            && self.words[1] == other.words[1]
            && self.words[2] == other.words[2]
            && self.words[3] == other.words[3]
            && self.words[4] == other.words[4]
    }
}

impl Hash for Digest {
    fn hash<H: StdHasher>(&self, state: &mut H) {
        state.write_u32(self.fold());
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
