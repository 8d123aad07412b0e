use crate::database::{NamePredicate, TagStore};
use crate::error::TagError;
use crate::models::Tag;
use crate::utils::pattern::like_matches;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MemoryState {
    next_id: u64,
    tags: Vec<Tag>,
}

/// In-process tag storage with the same presence and uniqueness rules as the
/// SQL table. Counts the calls made against it.
#[derive(Default)]
pub struct MemoryTagStore {
    state: Mutex<MemoryState>,
    queries: AtomicUsize,
    creates: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `names`, stored verbatim.
    pub fn with_tags<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        {
            let mut state = store.lock();
            for name in names {
                state.next_id += 1;
                let id = state.next_id;
                state.tags.push(Tag::new(id, name));
            }
        }
        store
    }

    /// Simulate an outage: every call fails with an infrastructure error
    /// until switched back.
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    pub fn query_calls(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn names(&self) -> Vec<String> {
        self.lock().tags.iter().map(|t| t.name.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // The state holds no invariants a panicking writer could break halfway.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_available(&self) -> Result<(), TagError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TagError::Infrastructure("memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TagStore for MemoryTagStore {
    async fn query(&self, predicate: &NamePredicate) -> Result<Vec<Tag>, TagError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;

        let patterns = predicate.patterns();
        let state = self.lock();
        Ok(state
            .tags
            .iter()
            .filter(|tag| patterns.iter().any(|p| like_matches(p, &tag.name)))
            .cloned()
            .collect())
    }

    async fn create(&self, name: &str) -> Result<Tag, TagError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;

        if name.trim().is_empty() {
            return Err(TagError::blank_name());
        }

        let mut state = self.lock();
        // Mirrors a unique index on a case-insensitive collation.
        let folded = name.to_lowercase();
        if state.tags.iter().any(|t| t.name.to_lowercase() == folded) {
            return Err(TagError::Conflict(name.to_string()));
        }
        state.next_id += 1;
        let tag = Tag::new(state.next_id, name);
        state.tags.push(tag.clone());
        log::debug!("Created tag '{}' with id {}", tag.name, tag.id);
        Ok(tag)
    }

    async fn count(&self) -> Result<u64, TagError> {
        self.ensure_available()?;
        Ok(self.lock().tags.len() as u64)
    }
}
