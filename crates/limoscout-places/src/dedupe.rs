use std::collections::HashSet;

/// Insertion-ordered set of place identifiers.
///
/// Owned by the run and threaded through discovery by `&mut`;
/// [`as_slice`](Self::as_slice) yields identifiers in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct PlaceIdSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl PlaceIdSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `place_id`. Returns `true` if it was not already present.
    /// Blank identifiers are ignored.
    pub fn insert(&mut self, place_id: &str) -> bool {
        if place_id.is_empty() || self.seen.contains(place_id) {
            return false;
        }
        self.seen.insert(place_id.to_owned());
        self.order.push(place_id.to_owned());
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}
