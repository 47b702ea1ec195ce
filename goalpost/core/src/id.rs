use std::collections::HashSet;

/// Identity of a task or goal: its creation time in epoch milliseconds.
pub type ItemId = u64;

/// Picks an id for a new item from the current time, stepping past the
/// newest existing id when two items are created within one millisecond.
pub(crate) fn next_id(existing: impl IntoIterator<Item = ItemId>) -> ItemId {
    let stamp = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
    let taken: HashSet<ItemId> = existing.into_iter().collect();
    match taken.iter().max() {
        Some(&newest) if newest >= stamp => successor(newest, &taken),
        _ => stamp,
    }
}

/// Gives every repeated id after its first occurrence a fresh one past the
/// newest id, returning how many were changed.
pub(crate) fn reassign_duplicates<'a>(ids: impl IntoIterator<Item = &'a mut ItemId>) -> usize {
    let ids: Vec<&mut ItemId> = ids.into_iter().collect();
    let mut taken: HashSet<ItemId> = HashSet::with_capacity(ids.len());
    let duplicates: Vec<&mut ItemId> = ids.into_iter().filter(|id| !taken.insert(**id)).collect();

    let count = duplicates.len();
    for id in duplicates {
        let newest = taken.iter().max().copied().unwrap_or_default();
        let fresh = successor(newest, &taken);
        taken.insert(fresh);
        *id = fresh;
    }
    count
}

/// `newest + 1`, or the lowest free id once the id space is exhausted at the top.
fn successor(newest: ItemId, taken: &HashSet<ItemId>) -> ItemId {
    newest.checked_add(1).unwrap_or_else(|| {
        (0..=ItemId::MAX)
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_id_is_current_timestamp() {
        let before = chrono::Utc::now().timestamp_millis() as u64;

        let existing: [ItemId; 0] = [];

        let id = next_id(existing);

        assert!(id >= before);
    }

    #[test]
    fn steps_past_ids_from_the_future() {
        let far_future = u64::MAX / 2;

        assert_eq!(next_id([3, far_future, 7]), far_future + 1);
    }

    #[test]
    fn wraps_to_lowest_free_id_at_the_top_of_the_range() {
        assert_eq!(next_id([ItemId::MAX]), 0);
        assert_eq!(next_id([ItemId::MAX, 0, 1]), 2);
    }

    #[test]
    fn duplicate_ids_are_renumbered_after_the_first() {
        let mut ids = [5, 9, 5, 9, 2];

        let changed = reassign_duplicates(ids.iter_mut());

        assert_eq!(changed, 2);
        assert_eq!(ids, [5, 9, 10, 11, 2]);
    }

    #[test]
    fn unique_ids_are_left_alone() {
        let mut ids = [3, 1, 2];

        assert_eq!(reassign_duplicates(ids.iter_mut()), 0);
        assert_eq!(ids, [3, 1, 2]);
    }

    #[test]
    fn duplicate_of_max_id_does_not_overflow() {
        let mut ids = [ItemId::MAX, ItemId::MAX];

        reassign_duplicates(ids.iter_mut());

        assert_eq!(ids, [ItemId::MAX, 0]);
    }
}
