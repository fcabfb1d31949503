// src/crawl/frontier.rs
// =============================================================================
// The work queue of the crawl.
//
// Two collections that always change together:
// - VecDeque: URLs waiting to be fetched, oldest first (breadth-first order)
// - HashSet: every URL that has ever been queued
//
// push() checks the set and inserts in the same call, so a URL can enter the
// queue at most once per run, no matter how many pages link to it.
// =============================================================================

use std::collections::{HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    seen: HashSet<String>,
}

impl Frontier {
    // A frontier holding only the seed
    pub fn new(seed: &str) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed.to_string());
        frontier
    }

    // Queues `url` unless it was queued before. Returns true if it was new.
    pub fn push(&mut self, url: String) -> bool {
        if !self.seen.insert(url.clone()) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    // Takes up to `max` URLs off the front of the queue
    pub fn next_batch(&mut self, max: usize) -> Vec<String> {
        let take = max.min(self.queue.len());
        self.queue.drain(..take).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
