//! Tags
//!
//! Sorted, de-duplicated string tags used to label menu items and to filter the menu.

use std::cmp::Ordering;

use smallvec::SmallVec;

/// A set of string tags backed by a sorted `SmallVec<[String; 5]>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Tags {
    tags: SmallVec<[String; 5]>,
}

impl Tags {
    /// Create a tag set, sorting and removing duplicates.
    #[must_use]
    pub fn new(tags: SmallVec<[String; 5]>) -> Self {
        let mut collection = Self { tags };

        collection.tags.sort();
        collection.tags.dedup();

        collection
    }

    /// Create a tag set from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::new(tags.iter().map(ToString::to_string).collect())
    }

    /// An empty tag set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the tag is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.position(tag).is_ok()
    }

    /// Returns true if the two sets share at least one tag.
    pub fn intersects(&self, other: &Self) -> bool {
        // Both sides are sorted, so walk them together.
        let mut left = self.tags.iter();
        let mut right = other.tags.iter();
        let mut left_tag = left.next();
        let mut right_tag = right.next();

        while let (Some(left_tag_ref), Some(right_tag_ref)) = (left_tag, right_tag) {
            match left_tag_ref.cmp(right_tag_ref) {
                Ordering::Equal => return true,
                Ordering::Less => left_tag = left.next(),
                Ordering::Greater => right_tag = right.next(),
            }
        }

        false
    }

    /// Add a tag, keeping the set sorted.
    pub fn add(&mut self, tag: &str) {
        if let Err(pos) = self.position(tag) {
            self.tags.insert(pos, tag.to_string());
        }
    }

    /// Remove a tag if present.
    pub fn remove(&mut self, tag: &str) {
        if let Ok(pos) = self.position(tag) {
            self.tags.remove(pos);
        }
    }

    /// Add the tag if absent, remove it if present. Returns true if the tag is now present.
    pub fn toggle(&mut self, tag: &str) -> bool {
        match self.position(tag) {
            Ok(pos) => {
                self.tags.remove(pos);
                false
            }
            Err(pos) => {
                self.tags.insert(pos, tag.to_string());
                true
            }
        }
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Returns true if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    fn position(&self, tag: &str) -> Result<usize, usize> {
        self.tags.binary_search_by(|probe| probe.as_str().cmp(tag))
    }
}

impl<'a> FromIterator<&'a str> for Tags {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_and_dedups() {
        let tags = Tags::from_strs(&["meat", "classic", "meat"]);

        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["classic", "meat"]);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn contains_finds_present_tags() {
        let tags = Tags::from_strs(&["vegetarian", "classic"]);

        assert!(tags.contains("classic"));
        assert!(!tags.contains("spicy"));
    }

    #[test]
    fn intersects_requires_a_shared_tag() {
        let pizza = Tags::from_strs(&["spicy", "meat"]);

        assert!(pizza.intersects(&Tags::from_strs(&["meat", "vegetarian"])));
        assert!(!pizza.intersects(&Tags::from_strs(&["vegetarian"])));
        assert!(!pizza.intersects(&Tags::empty()));
    }

    #[test]
    fn add_and_remove_keep_order() {
        let mut tags = Tags::from_strs(&["meat"]);

        tags.add("classic");
        tags.add("spicy");
        tags.add("classic");

        assert_eq!(
            tags.iter().collect::<Vec<_>>(),
            vec!["classic", "meat", "spicy"]
        );

        tags.remove("meat");
        tags.remove("missing");

        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["classic", "spicy"]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut tags = Tags::empty();

        assert!(tags.toggle("premium"));
        assert!(tags.contains("premium"));
        assert!(!tags.toggle("premium"));
        assert!(tags.is_empty());
    }

    #[test]
    fn collects_from_str_iterator() {
        let tags: Tags = ["white", "vegetarian", "white"].into_iter().collect();

        assert_eq!(tags, Tags::from_strs(&["vegetarian", "white"]));
    }
}
