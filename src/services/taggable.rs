use crate::models::Tag;

/// A record that can carry tags.
///
/// Implementors only expose and accept tag identities; storing the links
/// between a record and its tags stays with the record's own persistence.
pub trait Taggable {
    /// Ids of the tags currently attached.
    fn tag_ids(&self) -> Vec<u64>;

    /// Replace the attached tags with `tags`.
    fn accept_tags(&mut self, tags: Vec<Tag>);

    fn is_tagged_with(&self, tag: &Tag) -> bool {
        self.tag_ids().contains(&tag.id)
    }
}
