// src/crawl/frontier.rs
// =============================================================================
// The frontier (URLs waiting to be fetched) and the visited set (every URL
// ever discovered), kept together in one struct.
//
// How it works:
// 1. The seed goes into both the queue and the visited set
// 2. Every discovered URL goes through `insert_if_new`
// 3. Only URLs that were not in the visited set are queued
//
// Because the check and the insert are one HashSet::insert call, a URL can
// never be queued twice, which is what makes cyclic sites terminate.
//
// Rust concepts:
// - HashSet::insert returns false if the value was already present
// - VecDeque: push_back + pop_front = FIFO queue = breadth-first order
// =============================================================================

use std::collections::{HashSet, VecDeque};

use crate::links::NormalizedUrl;

/// A URL waiting to be fetched, and how many link hops it is from the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    pub url: NormalizedUrl,
    pub depth: usize,
}

#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<QueuedUrl>,
    visited: HashSet<NormalizedUrl>,
}

impl Frontier {
    /// Creates a frontier that already contains (and has visited) the seed.
    pub fn seeded(seed: NormalizedUrl) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
        };
        frontier.insert_if_new(seed, 0);
        frontier
    }

    /// Marks `url` as discovered and queues it, unless it was seen before.
    ///
    /// Returns true if the URL was new.
    pub fn insert_if_new(&mut self, url: NormalizedUrl, depth: usize) -> bool {
        if !self.visited.insert(url.clone()) {
            return false;
        }
        self.queue.push_back(QueuedUrl { url, depth });
        true
    }

    /// Takes the oldest queued URL (breadth-first).
    pub fn pop(&mut self) -> Option<QueuedUrl> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs still waiting to be fetched
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of URLs discovered so far (fetched or queued)
    pub fn discovered(&self) -> usize {
        self.visited.len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not `if !visited.contains(&url) { visited.insert(url) }`?
//    - That is two steps: a read, then a write
//    - With several fetches running, two of them could both see "not there"
//      and both queue the same page
//    - insert() does the check and the write in one call and tells us which
//      case happened
//
// 2. Why is the seed marked as visited immediately?
//    - A page that links back to the home page must not queue it again
//
// 3. Who owns the frontier?
//    - The crawl engine, for the whole crawl
//    - Nothing else gets a reference to it, so no locking is needed
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::{resolve, Origin};

    fn url(path: &str) -> NormalizedUrl {
        let (origin, seed) = Origin::from_seed("https://example.com/").unwrap();
        resolve(path, &seed, &origin).unwrap().unwrap()
    }

    #[test]
    fn test_seeded_frontier() {
        let mut frontier = Frontier::seeded(url("/"));
        assert_eq!(frontier.discovered(), 1);
        assert_eq!(frontier.pending(), 1);

        let first = frontier.pop().unwrap();
        assert_eq!(first.url, url("/"));
        assert_eq!(first.depth, 0);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_insert_if_new_deduplicates() {
        let mut frontier = Frontier::seeded(url("/"));
        assert!(frontier.insert_if_new(url("/a"), 1));
        assert!(!frontier.insert_if_new(url("/a"), 1));
        assert!(!frontier.insert_if_new(url("/a#section"), 2));
        assert!(!frontier.insert_if_new(url("/"), 1));
        assert_eq!(frontier.pending(), 2);
    }

    #[test]
    fn test_visited_set_never_shrinks() {
        let mut frontier = Frontier::seeded(url("/"));
        frontier.insert_if_new(url("/a"), 1);
        while frontier.pop().is_some() {}

        // popping drains the queue but the URLs stay visited
        assert_eq!(frontier.discovered(), 2);
        assert!(!frontier.insert_if_new(url("/a"), 1));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::seeded(url("/"));
        frontier.insert_if_new(url("/b"), 1);
        frontier.insert_if_new(url("/a"), 1);

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop())
            .map(|q| q.url.as_str().to_string())
            .collect();
        assert_eq!(
            order,
            vec![
                "https://example.com/",
                "https://example.com/b",
                "https://example.com/a"
            ]
        );
    }
}
