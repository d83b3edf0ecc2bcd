//! Location-keyed note log backing route chat.
//!
//! Unlike the feature dataset this log grows while serving, so it is guarded
//! by a mutex. Each exchange holds the lock only for one lookup and append.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::geo::{Point, RouteNote};

/// Notes posted so far, grouped by location in posting order.
///
/// Nothing is ever evicted: the log lives as long as the process and its
/// memory grows with every note posted.
#[derive(Debug, Default)]
pub struct NoteLog {
    notes: Mutex<HashMap<Point, Vec<RouteNote>>>,
}

impl NoteLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every earlier note at `note.location`, then append `note`.
    ///
    /// The note stays in the log for the rest of the process lifetime, so
    /// repeated posts at one location return ever longer replies.
    pub fn exchange(&self, note: RouteNote) -> Vec<RouteNote> {
        let mut notes = self.lock();
        let at_location = notes.entry(note.location).or_default();
        let earlier = at_location.clone();
        at_location.push(note);
        earlier
    }

    /// Notes currently stored at `location`.
    pub fn at(&self, location: Point) -> Vec<RouteNote> {
        self.lock().get(&location).cloned().unwrap_or_default()
    }

    /// Total number of stored notes.
    pub fn len(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Point, Vec<RouteNote>>> {
        // A panic mid-exchange cannot leave a half-written entry behind.
        self.notes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_returns_only_earlier_notes_at_location() {
        let log = NoteLog::new();
        let here = Point::new(0, 1);
        let there = Point::new(1, 0);

        assert!(log.exchange(RouteNote::new(here, "first")).is_empty());
        assert!(log.exchange(RouteNote::new(there, "elsewhere")).is_empty());

        let earlier = log.exchange(RouteNote::new(here, "second"));
        assert_eq!(earlier, vec![RouteNote::new(here, "first")]);

        let earlier = log.exchange(RouteNote::new(here, "third"));
        let messages: Vec<_> = earlier.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);

        assert_eq!(log.len(), 4);
        assert_eq!(log.at(there).len(), 1);
    }

    #[test]
    fn repeated_posts_are_all_kept() {
        let log = NoteLog::new();
        let spot = Point::new(5, 5);

        for round in 0..20 {
            let earlier = log.exchange(RouteNote::new(spot, "same words"));
            assert_eq!(earlier.len(), round);
            assert_eq!(log.len(), round + 1);
        }
        assert_eq!(log.at(spot).len(), 20);
    }

    #[test]
    fn concurrent_exchanges_lose_nothing() {
        let log = std::sync::Arc::new(NoteLog::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for j in 0..50 {
                        log.exchange(RouteNote::new(Point::new(i % 2, 0), format!("{i}-{j}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(log.len(), 400);
    }
}
