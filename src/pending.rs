use std::sync::Arc;

use dashmap::DashSet;

/// Ids with a mutation currently in flight.
#[derive(Clone, Default)]
pub struct PendingSet {
    ids: Arc<DashSet<String>>,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `id`, or returns `None` if it is already claimed. The claim is
    /// released when the guard drops.
    pub fn try_begin<'a>(&'a self, id: &'a str) -> Option<PendingGuard<'a>> {
        if self.ids.insert(id.to_string()) {
            Some(PendingGuard { ids: &self.ids, id })
        } else {
            None
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Claimed ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().map(|id| id.key().clone()).collect();
        ids.sort();
        ids
    }
}

pub struct PendingGuard<'a> {
    ids: &'a DashSet<String>,
    id: &'a str,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.ids.remove(self.id);
    }
}
