use sha2::{Digest as _, Sha256};

use super::digest::{Digest, DIGEST_BYTES};

/// A reusable incremental hash.
///
/// Appends are order-sensitive. [`Hasher::finish_and_reset`] is the only way to
/// get a [`Digest`] out, and it leaves the accumulator empty for the next use.
/// A hasher belongs to one computation at a time; pass it by `&mut`.
#[derive(Default)]
pub struct Hasher {
    inner: Sha256,
}

impl Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a 32-bit signed integer as little-endian bytes.
    pub fn append_i32(&mut self, value: i32) {
        self.inner.update(value.to_le_bytes());
    }

    /// Appends a 32-bit unsigned integer as little-endian bytes.
    pub fn append_u32(&mut self, value: u32) {
        self.inner.update(value.to_le_bytes());
    }

    /// Appends an offset or length, widened to 64 bits so the encoding does
    /// not depend on the target's pointer width.
    pub fn append_usize(&mut self, value: usize) {
        self.inner.update((value as u64).to_le_bytes());
    }

    /// Appends character data as raw UTF-8 bytes.
    pub fn append_str(&mut self, text: &str) {
        self.inner.update(text.as_bytes());
    }

    /// Appends a child digest, composing it into the running hash.
    pub fn append_digest(&mut self, digest: &Digest) {
        self.inner.update(digest.to_bytes());
    }

    /// Finalizes the running hash into a [`Digest`] and resets the accumulator.
    pub fn finish_and_reset(&mut self) -> Digest {
        let output = self.inner.finalize_reset();
        Digest::from_prefix(&output[..DIGEST_BYTES])
    }
}

impl std::fmt::Debug for Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Hasher { .. }")
    }
}
