//! Bounded pool of keyed MAC contexts.
//!
//! Keying an HMAC context hashes the key into the inner and outer pads; the
//! pool keeps already-keyed contexts around so a signature only pays for the
//! payload. A context is reset before it goes back into the pool, so no
//! partial state from one computation is ever seen by the next.

use crossbeam_queue::ArrayQueue;
use hmac::digest::Reset;
use hmac::Mac;

/// Contexts retained per algorithm instance
const POOL_CAPACITY: usize = 16;

pub(crate) struct MacPool<M> {
    prototype: M,
    idle: ArrayQueue<M>,
}

impl<M> MacPool<M>
where
    M: Mac + Reset + Clone,
{
    pub(crate) fn new(prototype: M) -> Self {
        Self {
            prototype,
            idle: ArrayQueue::new(POOL_CAPACITY),
        }
    }

    /// Run `f` with a keyed context checked out from the pool.
    pub(crate) fn with_mac<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        let mut mac = self.idle.pop().unwrap_or_else(|| self.prototype.clone());
        let out = f(&mut mac);
        Mac::reset(&mut mac);
        // a full pool just drops the context
        let _ = self.idle.push(mac);
        out
    }

    #[cfg(test)]
    pub(crate) fn idle_len(&self) -> usize {
        self.idle.len()
    }
}
