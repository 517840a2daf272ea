//! Uniform replay buffer for DDPG.
//!
//! - **Ring buffer** semantics: fixed capacity, oldest transition evicted first
//! - **Uniform sampling** of distinct transitions within one call
//! - **Seeded** RNG so identical contents give identical draws across runs
//!
//! The buffer is owned by the policy controller and only touched from its
//! thread, so it carries no synchronization of its own.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use super::transition::Transition;

// ============================================================================
// Ring Buffer (Internal)
// ============================================================================

/// Ring buffer with O(1) insert and random access.
///
/// Overwrites oldest elements when capacity is reached.
#[derive(Debug)]
struct RingBuffer<T> {
    /// Storage vector.
    buffer: Vec<T>,
    /// Capacity of the buffer.
    capacity: usize,
    /// Next position to write (circular). Once full this is also the oldest item.
    write_pos: usize,
}

impl<T> RingBuffer<T> {
    fn new(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
            write_pos: 0,
        }
    }

    /// Push an item, overwriting the oldest if full.
    fn push(&mut self, item: T) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(item);
        } else {
            self.buffer[self.write_pos] = item;
        }
        self.write_pos = (self.write_pos + 1) % self.capacity;
    }

    #[inline]
    fn get(&self, idx: usize) -> &T {
        debug_assert!(idx < self.buffer.len(), "Index out of bounds: {} >= {}", idx, self.buffer.len());
        &self.buffer[idx]
    }

    #[inline]
    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.write_pos = 0;
    }

    /// Iterate from oldest to newest.
    fn iter(&self) -> impl Iterator<Item = &T> {
        let split = if self.buffer.len() < self.capacity {
            0
        } else {
            self.write_pos
        };
        self.buffer[split..].iter().chain(self.buffer[..split].iter())
    }
}

// ============================================================================
// Replay Buffer
// ============================================================================

/// Fixed-capacity FIFO store of transitions with uniform minibatch sampling.
#[derive(Debug)]
pub struct ReplayBuffer {
    storage: RingBuffer<Transition>,
    rng: StdRng,
}

impl ReplayBuffer {
    /// Create an empty buffer.
    ///
    /// # Panics
    /// If `capacity` is zero.
    pub fn new(capacity: usize, seed: u64) -> Self {
        assert!(capacity > 0, "replay buffer capacity must be positive");
        Self {
            storage: RingBuffer::new(capacity),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Insert a transition, evicting the oldest one when full.
    pub fn add(&mut self, transition: Transition) {
        self.storage.push(transition);
    }

    /// Insert transitions in order.
    pub fn add_batch(&mut self, transitions: impl IntoIterator<Item = Transition>) {
        for transition in transitions {
            self.storage.push(transition);
        }
    }

    /// Draw `batch_size` distinct transitions uniformly at random.
    ///
    /// Draws are without replacement inside one call; separate calls are
    /// independent and may return the same transitions again.
    ///
    /// # Panics
    /// If `batch_size > self.len()`. Callers check [`len`](Self::len) first.
    pub fn sample(&mut self, batch_size: usize) -> Vec<Transition> {
        let len = self.storage.len();
        assert!(
            batch_size <= len,
            "cannot sample {} transitions from a replay buffer holding {}",
            batch_size,
            len
        );

        index::sample(&mut self.rng, len, batch_size)
            .into_iter()
            .map(|idx| self.storage.get(idx).clone())
            .collect()
    }

    /// Current number of transitions.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    /// Maximum number of transitions held.
    pub fn capacity(&self) -> usize {
        self.storage.capacity
    }

    /// Fill fraction (0.0 to 1.0).
    pub fn utilization(&self) -> f32 {
        self.storage.len() as f32 / self.storage.capacity as f32
    }

    /// Drop all transitions. The RNG state is kept.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Iterate transitions from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.storage.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
