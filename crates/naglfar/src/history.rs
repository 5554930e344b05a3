//! In-memory navigation provider
//!
//! A history stack for hosts without a browser: servers, CLIs and tests.

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::controller::{LocationListener, NavigationProvider};
use crate::location::Location;

#[derive(Debug)]
struct Entries {
    stack: Vec<Location>,
    index: usize,
}

/// History stack kept in memory
///
/// Listeners are notified synchronously, after the stack is updated, on the
/// thread that changed it.
pub struct MemoryHistory {
    entries: Mutex<Entries>,
    listeners: RwLock<Vec<LocationListener>>,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: Mutex::new(Entries {
                stack: vec![Location::parse(initial)],
                index: 0,
            }),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Number of entries in the stack
    pub fn len(&self) -> usize {
        self.entries.lock().stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().stack.is_empty()
    }

    pub fn index(&self) -> usize {
        self.entries.lock().index
    }

    pub fn entries(&self) -> Vec<Location> {
        self.entries.lock().stack.clone()
    }

    pub fn back(&self) -> bool {
        self.go(-1)
    }

    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Moves through the stack like a browser's back and forward buttons
    ///
    /// Returns false, without notifying, when the target is out of range.
    pub fn go(&self, delta: isize) -> bool {
        let location = {
            let mut entries = self.entries.lock();
            let Some(target) = entries.index.checked_add_signed(delta) else {
                return false;
            };
            if target >= entries.stack.len() || target == entries.index {
                return false;
            }
            entries.index = target;
            entries.stack[target].clone()
        };

        self.notify(location);
        true
    }

    fn notify(&self, location: Location) {
        let listeners = self.listeners.read().clone();
        debug!(path = %location.href(), listeners = listeners.len(), "history changed");
        for listener in listeners {
            listener(location.clone());
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl NavigationProvider for MemoryHistory {
    fn location(&self) -> Location {
        let entries = self.entries.lock();
        entries.stack[entries.index].clone()
    }

    /// Drops any forward entries, then appends
    fn push(&self, path: &str) {
        let location = Location::parse(path);
        {
            let mut entries = self.entries.lock();
            let next = entries.index + 1;
            entries.stack.truncate(next);
            entries.stack.push(location.clone());
            entries.index = next;
        }
        self.notify(location);
    }

    fn replace(&self, path: &str) {
        let location = Location::parse(path);
        {
            let mut entries = self.entries.lock();
            let index = entries.index;
            entries.stack[index] = location.clone();
        }
        self.notify(location);
    }

    fn listen(&self, listener: LocationListener) {
        self.listeners.write().push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn hrefs(history: &MemoryHistory) -> Vec<String> {
        history.entries().iter().map(Location::href).collect()
    }

    #[test]
    fn test_push_replace_and_listeners() {
        let history = MemoryHistory::new("/start?a=1");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        history.listen(Arc::new(move |location: Location| sink.lock().push(location.href())));

        history.push("/a/lion");
        history.replace("/a/tiger?x=2#top");

        assert_eq!(hrefs(&history), vec!["/start?a=1", "/a/tiger?x=2"]);
        assert_eq!(*seen.lock(), vec!["/a/lion", "/a/tiger?x=2"]);
        assert_eq!(history.location().search, "?x=2");
    }

    #[test]
    fn test_back_forward_and_truncation() {
        let history = MemoryHistory::default();
        history.push("/one");
        history.push("/two");

        assert!(history.back());
        assert_eq!(history.location().pathname, "/one");
        assert!(history.forward());
        assert!(!history.forward());

        history.go(-2);
        history.push("/three");
        assert_eq!(hrefs(&history), vec!["/", "/three"]);
        assert_eq!(history.index(), 1);
        assert!(!history.go(-5));
    }
}
