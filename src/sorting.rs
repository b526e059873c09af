//! In-place ordering for the catalog. Two unrelated algorithms behind the
//! same call shape: a gap-sequence insertion sort keyed on leading track
//! numbers and a last-pivot quicksort keyed on stripped titles. Neither
//! is stable; entries with equal keys may change relative order.

/// Gap-sequence insertion sort: gaps halve from `len / 2` down to 1, and
/// each gap pass insertion-sorts the elements spaced by that gap.
pub fn shell_sort<T, K, F>(items: &mut [T], key: F)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let total = items.len();
    let mut gap = total / 2;
    while gap > 0 {
        for i in gap..total {
            let probe_key = key(&items[i]);
            let mut j = i;
            while j >= gap && key(&items[j - gap]) > probe_key {
                items.swap(j, j - gap);
                j -= gap;
            }
        }
        gap /= 2;
    }
}

/// Recursive quicksort with a last-element pivot and a single
/// left-to-right partition scan.
pub fn quick_sort<T, K, F>(items: &mut [T], key: F)
where
    K: Ord,
    F: Fn(&T) -> K + Copy,
{
    if items.len() > 1 {
        quick_sort_range(items, 0, items.len() - 1, key);
    }
}

fn quick_sort_range<T, K, F>(items: &mut [T], left: usize, right: usize, key: F)
where
    K: Ord,
    F: Fn(&T) -> K + Copy,
{
    if left >= right {
        return;
    }
    let pivot = partition(items, left, right, key);
    // pivot can be 0 when every element sorts after the pivot value.
    if pivot > left {
        quick_sort_range(items, left, pivot - 1, key);
    }
    if pivot < right {
        quick_sort_range(items, pivot + 1, right, key);
    }
}

fn partition<T, K, F>(items: &mut [T], left: usize, right: usize, key: F) -> usize
where
    K: Ord,
    F: Fn(&T) -> K + Copy,
{
    let pivot_key = key(&items[right]);
    let mut boundary = left;
    for probe in left..right {
        if key(&items[probe]) < pivot_key {
            items.swap(boundary, probe);
            boundary += 1;
        }
    }
    items.swap(boundary, right);
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song;
    use proptest::prelude::*;

    #[test]
    fn shell_sort_orders_by_leading_number() {
        let mut names = vec!["01 Intro.mp3", "03 Outro.mp3", "02 Mid.mp3"];
        shell_sort(&mut names, |name| song::track_number(name));
        assert_eq!(names, vec!["01 Intro.mp3", "02 Mid.mp3", "03 Outro.mp3"]);
    }

    #[test]
    fn shell_sort_places_unnumbered_names_first() {
        let mut names = vec!["05 Last.mp3", "Loose.mp3", "01 First.mp3"];
        shell_sort(&mut names, |name| song::track_number(name));
        assert_eq!(names[0], "Loose.mp3");
        assert_eq!(names[2], "05 Last.mp3");
    }

    #[test]
    fn quick_sort_orders_by_stripped_title() {
        let mut names = vec!["(2) Beta.mp3", "(1) Alpha.mp3"];
        quick_sort(&mut names, |name| song::sort_title(name).to_string());
        assert_eq!(names, vec!["(1) Alpha.mp3", "(2) Beta.mp3"]);
    }

    #[test]
    fn quick_sort_handles_pivot_at_both_ends() {
        let mut ascending = vec![1, 2, 3, 4, 5];
        quick_sort(&mut ascending, |n| *n);
        assert_eq!(ascending, vec![1, 2, 3, 4, 5]);

        let mut descending = vec![5, 4, 3, 2, 1];
        quick_sort(&mut descending, |n| *n);
        assert_eq!(descending, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn both_sorts_accept_empty_and_single() {
        let mut empty: Vec<u32> = Vec::new();
        shell_sort(&mut empty, |n| *n);
        quick_sort(&mut empty, |n| *n);

        let mut single = vec![7u32];
        shell_sort(&mut single, |n| *n);
        quick_sort(&mut single, |n| *n);
        assert_eq!(single, vec![7]);
    }

    proptest! {
        #[test]
        fn shell_sort_leaves_adjacent_keys_ordered(mut values in proptest::collection::vec(0u32..1000, 0..64)) {
            shell_sort(&mut values, |n| *n);
            prop_assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        }

        #[test]
        fn quick_sort_leaves_adjacent_keys_ordered(mut values in proptest::collection::vec(".{0,12}", 0..64)) {
            quick_sort(&mut values, |s| s.clone());
            prop_assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        }

        #[test]
        fn sorts_are_permutations(values in proptest::collection::vec(0u32..50, 0..64)) {
            let mut shelled = values.clone();
            shell_sort(&mut shelled, |n| *n);
            let mut quicked = values.clone();
            quick_sort(&mut quicked, |n| *n);

            let mut expected = values;
            expected.sort_unstable();
            prop_assert_eq!(&shelled, &expected);
            prop_assert_eq!(&quicked, &expected);
        }
    }
}
