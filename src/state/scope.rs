//! Scope tokens: one unique [`Digest`] per state kind.
//!
//! Tokens come from a process-wide counter that is incremented atomically and
//! never reset. Each kind mints its token lazily on first use and keeps it for
//! the life of the process. The counter is the only mutable global in the crate.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::hashing::{Digest, Hasher};

static NEXT_SCOPE: AtomicU32 = AtomicU32::new(0);

/// Mints a fresh scope token. `kind` is only used for logging.
pub fn mint(kind: &'static str) -> Digest {
    let id = NEXT_SCOPE.fetch_add(1, Ordering::SeqCst) + 1;
    let mut hasher = Hasher::new();
    hasher.append_u32(id);
    let token = hasher.finish_and_reset();
    tracing::trace!(kind, id, %token, "minted scope token");
    token
}
