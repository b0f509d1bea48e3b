use std::collections::HashSet;

/// Track identifiers already mirrored during this process lifetime.
///
/// Grows monotonically: entries are never removed, and the only way to start
/// over is a restart followed by [`DedupCache::seed_from`]. Mutation requires
/// `&mut self`, so whoever owns the cache serializes check-then-add.
#[derive(Debug, Default, Clone)]
pub struct DedupCache {
    ids: HashSet<String>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn add(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    /// Adds `id` unless present. Returns `true` when the caller now owns the
    /// insertion of this track.
    pub fn insert_if_absent(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.to_string())
    }

    pub fn seed_from<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
