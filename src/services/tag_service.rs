use crate::database::{NamePredicate, TagStore};
use crate::error::TagError;
use crate::models::Tag;
use crate::services::taggable::Taggable;
use crate::utils::normalization::normalize;
use log;
use std::collections::HashSet;
use std::sync::Arc;

/// Maps raw tag names to persisted tags, creating the ones that don't exist.
///
/// Holds no state of its own beyond the store handle. Nothing here locks,
/// retries or wraps calls in a transaction; the store's uniqueness constraint
/// decides races between concurrent creators.
#[derive(Clone)]
pub struct TagResolver {
    store: Arc<dyn TagStore>,
}

impl TagResolver {
    pub fn new(store: Arc<dyn TagStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn TagStore> {
        &self.store
    }

    /// Tags whose name equals the normalized `raw`, ignoring case.
    pub async fn named(&self, raw: &str) -> Result<Vec<Tag>, TagError> {
        self.store.query(&NamePredicate::Named(normalize(raw))).await
    }

    pub async fn named_any<S: AsRef<str>>(&self, raws: &[S]) -> Result<Vec<Tag>, TagError> {
        if raws.is_empty() {
            return Ok(Vec::new());
        }
        let names = raws.iter().map(|r| normalize(r.as_ref())).collect();
        self.store.query(&NamePredicate::NamedAny(names)).await
    }

    /// Tags whose name contains the normalized `raw`, ignoring case.
    pub async fn named_like(&self, raw: &str) -> Result<Vec<Tag>, TagError> {
        self.store.query(&NamePredicate::NamedLike(normalize(raw))).await
    }

    pub async fn named_like_any<S: AsRef<str>>(&self, raws: &[S]) -> Result<Vec<Tag>, TagError> {
        if raws.is_empty() {
            return Ok(Vec::new());
        }
        let names = raws.iter().map(|r| normalize(r.as_ref())).collect();
        self.store.query(&NamePredicate::NamedLikeAny(names)).await
    }

    /// The existing tag named like `raw`, or a freshly created one.
    ///
    /// A concurrent caller may create the same name between the lookup and
    /// the insert; that surfaces as [`TagError::Conflict`] and is not retried.
    pub async fn find_or_create_by_name(&self, raw: &str) -> Result<Tag, TagError> {
        let name = normalize(raw);
        if let Some(existing) = self.named(&name).await?.into_iter().next() {
            return Ok(existing);
        }

        log::debug!("No tag named '{}', creating it", name);
        self.store.create(&name).await
    }

    /// Resolve a batch of raw names with one lookup and one insert per
    /// missing name.
    ///
    /// The result lists the tags that already existed, in the order storage
    /// returned them, followed by the newly created ones in request order. It
    /// does not follow the overall request order. Creates are not atomic: if
    /// one fails, the ones before it stay persisted.
    pub async fn find_or_create_all_by_name<S: AsRef<str>>(
        &self,
        raws: &[S],
    ) -> Result<Vec<Tag>, TagError> {
        if raws.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = raws.iter().map(|r| normalize(r.as_ref())).collect();
        let existing = self
            .store
            .query(&NamePredicate::NamedAny(names.clone()))
            .await?;

        // Keyed case-insensitively, like the lookup matches.
        let mut seen: HashSet<String> = existing.iter().map(|t| match_key(&t.name)).collect();
        let missing: Vec<&String> = names
            .iter()
            .filter(|name| seen.insert(match_key(name)))
            .collect();

        log::debug!(
            "Resolving {} tag names: {} found, {} to create",
            names.len(),
            existing.len(),
            missing.len()
        );

        let mut created = Vec::with_capacity(missing.len());
        for name in missing {
            created.push(self.store.create(name).await?);
        }

        let mut tags = existing;
        tags.extend(created);
        Ok(tags)
    }

    /// Resolve `raws` and hand the tags to `record`. Linking the record to
    /// its tags is left to the record's owner.
    pub async fn tag_record<T, S>(&self, record: &mut T, raws: &[S]) -> Result<(), TagError>
    where
        T: Taggable,
        S: AsRef<str>,
    {
        let tags = self.find_or_create_all_by_name(raws).await?;
        record.accept_tags(tags);
        Ok(())
    }
}

fn match_key(name: &str) -> String {
    normalize(name).to_lowercase()
}
