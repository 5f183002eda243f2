//! # Content Hashing
//!
//! Fixed-width fingerprints used as structural-equality witnesses for parse
//! state, and the incremental hasher that produces them.
//!
//! The hasher runs SHA-256 and keeps the leading 160 bits of each output.

pub mod digest;
pub mod hasher;

pub use digest::{Digest, DIGEST_BYTES};
pub use hasher::Hasher;
