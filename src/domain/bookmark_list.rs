// src/domain/bookmark_list.rs
use crate::domain::bookmark::{Bookmark, BookmarkId};
use tracing::{instrument, trace};

/// Ordered bookmark collection. List position is the only ranking signal;
/// each record's `order` is kept equal to its index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkList {
    items: Vec<Bookmark>,
}

impl BookmarkList {
    /// Takes the records in display order and renumbers them.
    pub fn new(items: Vec<Bookmark>) -> Self {
        let mut list = Self { items };
        list.renumber();
        list
    }

    pub fn as_slice(&self) -> &[Bookmark] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<BookmarkId> {
        self.items.iter().map(|b| b.id).collect()
    }

    pub fn get(&self, id: BookmarkId) -> Option<&Bookmark> {
        self.items.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BookmarkId) -> Option<&mut Bookmark> {
        self.items.iter_mut().find(|b| b.id == id)
    }

    pub fn position(&self, id: BookmarkId) -> Option<usize> {
        self.items.iter().position(|b| b.id == id)
    }

    /// True when another record (not `except`) already uses `name`, ignoring case.
    pub fn name_taken(&self, name: &str, except: Option<BookmarkId>) -> bool {
        self.items
            .iter()
            .filter(|b| Some(b.id) != except)
            .any(|b| b.has_name(name))
    }

    /// Fresh id derived from the creation timestamp, bumped past the
    /// current maximum when the clock has not advanced far enough. When the
    /// maximum is already `BookmarkId::MAX` the lowest free id is used.
    pub fn next_id(&self, now_millis: i64) -> BookmarkId {
        match self.items.iter().map(|b| b.id).max() {
            Some(max) if max >= now_millis => max
                .checked_add(1)
                .unwrap_or_else(|| smallest_unused_id(|id| self.get(id).is_some())),
            _ => now_millis,
        }
    }

    /// Append at the end
    pub fn push(&mut self, mut bookmark: Bookmark) {
        bookmark.order = self.items.len();
        self.items.push(bookmark);
    }

    /// Remove by id and close the order gap
    pub fn remove(&mut self, id: BookmarkId) -> Option<Bookmark> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);
        self.renumber();
        Some(removed)
    }

    /// Move `source` to the index `target` occupies right now.
    ///
    /// Returns false without touching the list when the ids are equal or
    /// either one is absent.
    #[instrument(skip(self), level = "trace")]
    pub fn move_to(&mut self, source: BookmarkId, target: BookmarkId) -> bool {
        if source == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(source), self.position(target)) else {
            return false;
        };

        let moved = self.items.remove(from);
        self.items.insert(to, moved);
        self.renumber();
        trace!(from, to, "moved bookmark");
        true
    }

    fn renumber(&mut self) {
        for (index, bookmark) in self.items.iter_mut().enumerate() {
            bookmark.order = index;
        }
    }
}

/// Lowest positive id for which `taken` is false
pub fn smallest_unused_id(taken: impl Fn(BookmarkId) -> bool) -> BookmarkId {
    (1..BookmarkId::MAX).find(|id| !taken(*id)).unwrap_or(BookmarkId::MAX)
}

impl From<BookmarkList> for Vec<Bookmark> {
    fn from(list: BookmarkList) -> Self {
        list.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookmark::BookmarkBuilder;
    use rstest::*;

    fn bookmark(id: BookmarkId, name: &str) -> Bookmark {
        BookmarkBuilder::default()
            .id(id)
            .name(name)
            .url(format!("https://{}.example", name.to_lowercase()))
            .icon("🔖")
            .build()
            .unwrap()
    }

    #[fixture]
    fn abc() -> BookmarkList {
        BookmarkList::new(vec![bookmark(1, "A"), bookmark(2, "B"), bookmark(3, "C")])
    }

    fn orders(list: &BookmarkList) -> Vec<usize> {
        list.iter().map(|b| b.order).collect()
    }

    #[rstest]
    #[case(1, 3, vec![2, 3, 1])]
    #[case(3, 1, vec![3, 1, 2])]
    #[case(1, 2, vec![2, 1, 3])]
    #[case(2, 1, vec![2, 1, 3])]
    #[case(2, 3, vec![1, 3, 2])]
    fn given_two_ids_when_move_to_then_source_takes_target_position(
        mut abc: BookmarkList,
        #[case] source: BookmarkId,
        #[case] target: BookmarkId,
        #[case] expected: Vec<BookmarkId>,
    ) {
        let target_index = abc.position(target).unwrap();

        assert!(abc.move_to(source, target));

        assert_eq!(abc.ids(), expected);
        assert_eq!(abc.position(source), Some(target_index));
        assert_eq!(orders(&abc), vec![0, 1, 2]);
    }

    #[rstest]
    #[case(2, 2)]
    #[case(9, 1)]
    #[case(1, 9)]
    fn given_equal_or_missing_ids_when_move_to_then_noop(
        mut abc: BookmarkList,
        #[case] source: BookmarkId,
        #[case] target: BookmarkId,
    ) {
        let before = abc.clone();
        assert!(!abc.move_to(source, target));
        assert_eq!(abc, before);
    }

    #[rstest]
    fn given_middle_record_when_remove_then_order_gap_closed(mut abc: BookmarkList) {
        let removed = abc.remove(2).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(abc.ids(), vec![1, 3]);
        assert_eq!(orders(&abc), vec![0, 1]);
        assert!(abc.remove(2).is_none());
    }

    #[rstest]
    fn given_name_in_other_case_when_name_taken_then_true(abc: BookmarkList) {
        assert!(abc.name_taken("a", None));
        assert!(abc.name_taken("B", None));
        assert!(!abc.name_taken("D", None));
        assert!(!abc.name_taken("a", Some(1)));
        assert!(abc.name_taken("a", Some(2)));
    }

    #[test]
    fn given_ids_ahead_of_clock_when_next_id_then_max_plus_one() {
        let list = BookmarkList::new(vec![bookmark(5_000, "A"), bookmark(9_000, "B")]);
        assert_eq!(list.next_id(1_000), 9_001);
        assert_eq!(list.next_id(9_000), 9_001);
        assert_eq!(list.next_id(12_345), 12_345);
        assert_eq!(BookmarkList::default().next_id(42), 42);
    }

    #[test]
    fn given_max_id_when_next_id_then_lowest_free_id() {
        let list = BookmarkList::new(vec![bookmark(1, "A"), bookmark(BookmarkId::MAX, "B")]);
        assert_eq!(list.next_id(1_000), 2);
    }

    #[test]
    fn given_gaps_when_smallest_unused_id_then_first_gap() {
        assert_eq!(smallest_unused_id(|id| [1, 2, 4].contains(&id)), 3);
        assert_eq!(smallest_unused_id(|_| false), 1);
    }

    #[rstest]
    fn given_new_bookmark_when_push_then_last_with_order(mut abc: BookmarkList) {
        abc.push(bookmark(4, "D"));
        assert_eq!(abc.ids(), vec![1, 2, 3, 4]);
        assert_eq!(abc.get(4).unwrap().order, 3);
    }
}
