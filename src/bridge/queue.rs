//! Bounded FIFO of trades waiting for the MT5 agent to poll them
//!
//! ```text
//! producer ── try_enqueue() ──▶ [ ArrayQueue ] ──▶ try_dequeue() ── consumer
//!                  │                                   │
//!                  └─ Err(trade) when full             └─ None when empty
//! ```
//!
//! Both sides are non-blocking. A full queue hands the trade back to the
//! caller instead of waiting or evicting older entries.

use crossbeam_queue::ArrayQueue;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::common::types::Trade;

/// Pending trade capacity used when none is configured
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Thread-safe bounded trade queue
pub struct TradeQueue {
    queue: ArrayQueue<Trade>,
    /// Trades accepted by `try_enqueue`
    accepted: AtomicU64,
    /// Trades refused because the queue was full
    rejected: AtomicU64,
    /// Trades handed out by `try_dequeue`
    dequeued: AtomicU64,
}

/// Point-in-time queue counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub depth: usize,
    pub capacity: usize,
    pub accepted: u64,
    pub rejected: u64,
    pub dequeued: u64,
}

impl TradeQueue {
    /// Create a queue with the default capacity of 100
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Create a queue holding at most `capacity` trades
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: ArrayQueue::new(capacity),
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            dequeued: AtomicU64::new(0),
        }
    }

    /// Append a trade at the tail without blocking
    ///
    /// Returns the trade back in `Err` when the queue is at capacity.
    pub fn try_enqueue(&self, trade: Trade) -> Result<(), Trade> {
        match self.queue.push(trade) {
            Ok(()) => {
                self.accepted.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(trade) => {
                self.rejected.fetch_add(1, Ordering::Relaxed);
                Err(trade)
            }
        }
    }

    /// Remove the oldest trade without blocking
    pub fn try_dequeue(&self) -> Option<Trade> {
        let trade = self.queue.pop()?;
        self.dequeued.fetch_add(1, Ordering::Relaxed);
        Some(trade)
    }

    /// Current number of pending trades
    pub fn size(&self) -> usize {
        self.queue.len()
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            depth: self.size(),
            capacity: self.capacity(),
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            dequeued: self.dequeued.load(Ordering::Relaxed),
        }
    }
}

impl Default for TradeQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::TradeAction;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    fn trade(id: &str) -> Trade {
        Trade {
            id: id.to_string(),
            base_id: id.to_string(),
            time: Utc::now().into(),
            action: TradeAction::Buy,
            quantity: 1.0,
            price: 100.0,
            total_quantity: 1,
            contract_num: 1,
        }
    }

    #[test]
    fn test_fills_to_capacity_then_rejects() {
        let queue = TradeQueue::new();

        for i in 0..DEFAULT_QUEUE_CAPACITY {
            assert!(queue.try_enqueue(trade(&format!("t{i}"))).is_ok());
            assert_eq!(queue.size(), i + 1);
        }
        assert!(queue.is_full());

        let rejected = queue.try_enqueue(trade("overflow")).unwrap_err();
        assert_eq!(rejected.id, "overflow");
        assert_eq!(queue.size(), DEFAULT_QUEUE_CAPACITY);

        let stats = queue.stats();
        assert_eq!(stats.accepted, 100);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.dequeued, 0);
    }

    #[test]
    fn test_empty_dequeue() {
        let queue = TradeQueue::new();
        assert!(queue.try_dequeue().is_none());
        assert_eq!(queue.size(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fifo_with_interleaving() {
        let queue = TradeQueue::with_capacity(4);

        queue.try_enqueue(trade("a")).unwrap();
        queue.try_enqueue(trade("b")).unwrap();
        assert_eq!(queue.try_dequeue().unwrap().id, "a");
        queue.try_enqueue(trade("c")).unwrap();
        queue.try_enqueue(trade("d")).unwrap();
        assert_eq!(queue.try_dequeue().unwrap().id, "b");
        queue.try_enqueue(trade("e")).unwrap();

        let drained: Vec<String> = std::iter::from_fn(|| queue.try_dequeue())
            .map(|t| t.id)
            .collect();
        assert_eq!(drained, vec!["c", "d", "e"]);
    }

    #[test]
    fn test_space_frees_after_dequeue() {
        let queue = TradeQueue::with_capacity(1);
        queue.try_enqueue(trade("a")).unwrap();
        assert!(queue.try_enqueue(trade("b")).is_err());

        queue.try_dequeue().unwrap();
        assert!(queue.try_enqueue(trade("b")).is_ok());
    }

    #[test]
    fn test_concurrent_producers_and_consumers_lose_nothing() {
        const PRODUCERS: usize = 8;
        const PER_PRODUCER: usize = 200;

        let queue = Arc::new(TradeQueue::with_capacity(16));
        let mut producers = Vec::new();

        for p in 0..PRODUCERS {
            let queue = Arc::clone(&queue);
            producers.push(thread::spawn(move || {
                let mut accepted = Vec::new();
                for i in 0..PER_PRODUCER {
                    let id = format!("p{p}-{i}");
                    if queue.try_enqueue(trade(&id)).is_ok() {
                        accepted.push(id);
                    }
                }
                accepted
            }));
        }

        let consumer_queue = Arc::clone(&queue);
        let consumer = thread::spawn(move || {
            let mut seen = Vec::new();
            let mut idle_rounds = 0;
            while idle_rounds < 10_000 {
                match consumer_queue.try_dequeue() {
                    Some(t) => {
                        seen.push(t.id);
                        idle_rounds = 0;
                    }
                    None => {
                        idle_rounds += 1;
                        thread::yield_now();
                    }
                }
            }
            seen
        });

        let mut enqueued: HashMap<String, usize> = HashMap::new();
        for handle in producers {
            for id in handle.join().unwrap() {
                *enqueued.entry(id).or_default() += 1;
            }
        }

        let mut dequeued: HashMap<String, usize> = HashMap::new();
        for id in consumer.join().unwrap() {
            *dequeued.entry(id).or_default() += 1;
        }
        while let Some(t) = queue.try_dequeue() {
            *dequeued.entry(t.id).or_default() += 1;
        }

        assert_eq!(enqueued, dequeued);
        let stats = queue.stats();
        assert_eq!(stats.accepted as usize, enqueued.values().sum::<usize>());
        assert_eq!(stats.accepted + stats.rejected, (PRODUCERS * PER_PRODUCER) as u64);
    }
}
