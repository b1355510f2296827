/// Result of a non-blocking cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheRead<T> {
    /// Last known value, still considered current.
    Fresh(T),
    /// Last known value, invalidated and due for a refetch.
    Stale(T),
    /// Nothing has been loaded for this key yet.
    Pending,
}

impl<T> CacheRead<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            CacheRead::Fresh(v) | CacheRead::Stale(v) => Some(v),
            CacheRead::Pending => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            CacheRead::Fresh(v) | CacheRead::Stale(v) => Some(v),
            CacheRead::Pending => None,
        }
    }

    pub fn needs_fetch(&self) -> bool {
        !matches!(self, CacheRead::Fresh(_))
    }
}

/// A single cache slot.
///
/// `generation` is bumped whenever a newer value or fetch supersedes the
/// in-flight one; fetch results carrying an older generation are dropped.
/// While a mutation is pending no fetch result is stored, so the optimistic
/// value stays visible until the mutation settles.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    value: Option<T>,
    stale: bool,
    pending_mutations: usize,
    generation: u64,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            value: None,
            stale: false,
            pending_mutations: 0,
            generation: 0,
        }
    }
}

impl<T: Clone> CacheEntry<T> {
    pub fn read(&self) -> CacheRead<T> {
        match (&self.value, self.stale) {
            (None, _) => CacheRead::Pending,
            (Some(v), false) => CacheRead::Fresh(v.clone()),
            (Some(v), true) => CacheRead::Stale(v.clone()),
        }
    }

    /// Replaces the value unconditionally and supersedes in-flight fetches.
    pub fn write(&mut self, value: T) {
        self.generation += 1;
        self.store(value);
    }

    /// Applies `f` to the cached value in place. Returns false when nothing is cached.
    pub fn update<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.value.as_mut() {
            Some(v) => {
                f(v);
                self.generation += 1;
                true
            }
            None => false,
        }
    }

    pub fn invalidate(&mut self) {
        if self.value.is_some() {
            self.stale = true;
        }
    }

    /// Starts a fetch, superseding any fetch already in flight.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Drops the result of every fetch currently in flight.
    pub fn cancel_fetches(&mut self) {
        self.generation += 1;
    }

    /// Stores a fetch result unless the fetch was superseded or a mutation
    /// is pending on this slot.
    pub fn complete_fetch(&mut self, generation: u64, value: T) -> bool {
        if generation != self.generation || self.is_pending() {
            return false;
        }
        self.store(value);
        true
    }

    /// Drops the value but keeps the generation and pending count, so
    /// in-flight fetches stay superseded.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.value = None;
        self.stale = false;
    }

    pub fn mark_pending(&mut self) {
        self.pending_mutations += 1;
    }

    pub fn settle_pending(&mut self) {
        self.pending_mutations = self.pending_mutations.saturating_sub(1);
    }

    pub fn is_pending(&self) -> bool {
        self.pending_mutations > 0
    }

    fn store(&mut self, value: T) {
        self.value = Some(value);
        self.stale = false;
    }
}
