use rand::Rng;

use super::store::ItemStore;
use crate::core::{
    StudyItem,
    StudySelection,
};

/// Builds a shuffled deck of the pooled items matching `selection`.
pub fn build_deck<R: Rng>(
    store: &ItemStore,
    selection: &StudySelection,
    rng: &mut R,
) -> Vec<StudyItem> {
    if selection.is_empty() {
        return Vec::new();
    }

    let matching: Vec<StudyItem> =
        store.items().iter().filter(|item| selection.matches(item)).cloned().collect();

    insertion_shuffle(matching, |upper| rng.random_range(0..upper))
}

/// Appends items one at a time, swapping each newly appended item at index `i`
/// with the slot chosen by `pick(i)`, which must return a value in `[0, i)`.
/// Nothing is picked for the first item. This is not a uniform permutation: an
/// item never swaps with itself once it has predecessors.
pub fn insertion_shuffle<T>(items: Vec<T>, mut pick: impl FnMut(usize) -> usize) -> Vec<T> {
    let mut deck = Vec::with_capacity(items.len());

    for (i, item) in items.into_iter().enumerate() {
        deck.push(item);
        if i == 0 {
            continue;
        }

        let swap_index = pick(i);
        debug_assert!(swap_index < i);
        deck.swap(swap_index, i);
    }

    deck
}
