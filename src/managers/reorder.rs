//! Positional helpers for drag-and-drop.
//!
//! A drag works on a filtered view of a larger list. The helpers here move
//! items inside such a view while every item outside it keeps its slot.

/// Removes the item at `from` and reinserts it at `to`, clamping `to` to the
/// list end. Returns `false` without touching the list when `from` is out of range.
pub fn splice_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    true
}

/// Indices into `items` of the elements matching `pred`, in list order.
pub fn subsequence_slots<T>(items: &[T], pred: impl Fn(&T) -> bool) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| pred(item))
        .map(|(i, _)| i)
        .collect()
}

/// Position in the full list at which an item must be inserted so that it
/// lands at `index` within the subsequence occupying `slots`.
///
/// Past the end of the subsequence the item goes right after its last
/// member; an empty subsequence appends to the list.
pub fn insertion_point(slots: &[usize], index: usize, list_len: usize) -> usize {
    match slots.get(index) {
        Some(&slot) => slot,
        None => slots.last().map(|&last| last + 1).unwrap_or(list_len),
    }
}
