//! Per-container bookkeeping for debounced re-rendering.
//!
//! The timer type is generic: the browser side stores a cancelling timer handle
//! (dropping it cancels), tests store plain integers.

/// Render bookkeeping owned by one container.
#[derive(Debug)]
pub struct RenderState<T> {
    last_width: Option<f64>,
    pending: Option<T>,
}

impl<T> Default for RenderState<T> {
    fn default() -> Self {
        Self {
            last_width: None,
            pending: None,
        }
    }
}

impl<T> RenderState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new pending timer, handing back the one it supersedes.
    ///
    /// At most one timer is pending per container.
    pub fn schedule(&mut self, timer: T) -> Option<T> {
        self.pending.replace(timer)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Note the width a pass is about to render at.
    pub fn record_width(&mut self, width: f64) {
        self.last_width = Some(width);
    }

    /// Called when the pending timer fires. Returns whether a pass should run,
    /// which is only when `width` differs from the last rendered one.
    pub fn fire(&mut self, width: f64) -> (Option<T>, bool) {
        let timer = self.pending.take();
        if self.last_width == Some(width) {
            return (timer, false);
        }
        self.last_width = Some(width);
        (timer, true)
    }
}

/// Container-keyed store of state records.
///
/// Keys compare by identity of the container they name; lookups are linear,
/// which suits the handful of containers a page carries.
#[derive(Debug)]
pub struct Registry<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq, V> Registry<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` for `key`, returning the record it replaces.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Forget `key`, handing back its record.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives a state the way the resize listener does and counts passes.
    struct Harness {
        state: RenderState<u32>,
        next_timer: u32,
        cancelled: Vec<u32>,
        passes: usize,
    }

    impl Harness {
        fn new(initial_width: f64) -> Self {
            let mut state = RenderState::new();
            state.record_width(initial_width);
            Self {
                state,
                next_timer: 0,
                cancelled: Vec::new(),
                passes: 1,
            }
        }

        fn resize(&mut self) {
            self.next_timer += 1;
            if let Some(old) = self.state.schedule(self.next_timer) {
                self.cancelled.push(old);
            }
        }

        fn quiesce(&mut self, width: f64) {
            let (timer, run) = self.state.fire(width);
            assert_eq!(timer, Some(self.next_timer));
            if run {
                self.passes += 1;
            }
        }
    }

    #[test]
    fn test_burst_coalesces_to_one_pass() {
        let mut h = Harness::new(800.0);
        h.resize();
        h.resize();
        h.resize();
        assert_eq!(h.cancelled, vec![1, 2]);
        h.quiesce(640.0);
        assert_eq!(h.passes, 2);
        assert_eq!(h.state.cancel(), None);
    }

    #[test]
    fn test_unchanged_width_suppressed() {
        let mut h = Harness::new(800.0);
        h.resize();
        h.quiesce(800.0);
        assert_eq!(h.passes, 1);
        h.resize();
        h.quiesce(800.0);
        assert_eq!(h.passes, 1);
    }

    #[test]
    fn test_width_tracked_across_passes() {
        let mut h = Harness::new(800.0);
        h.resize();
        h.quiesce(500.0);
        h.resize();
        h.quiesce(500.0);
        h.resize();
        h.quiesce(800.0);
        assert_eq!(h.passes, 3);
    }

    #[test]
    fn test_cancel_clears_pending() {
        let mut state: RenderState<u32> = RenderState::new();
        assert!(state.schedule(7).is_none());
        assert_eq!(state.cancel(), Some(7));
        assert_eq!(state.cancel(), None);
    }

    #[test]
    fn test_registry_replaces_by_key() {
        let mut reg: Registry<&str, u32> = Registry::new();
        assert!(reg.insert("map", 1).is_none());
        assert!(reg.insert("other", 5).is_none());
        assert_eq!(reg.insert("map", 2), Some(1));
        *reg.get_mut(&"map").unwrap() += 10;
        assert_eq!(reg.remove(&"map"), Some(12));
        assert!(reg.get_mut(&"map").is_none());
        assert_eq!(reg.remove(&"map"), None);
        assert_eq!(reg.get_mut(&"other"), Some(&mut 5));
    }
}
