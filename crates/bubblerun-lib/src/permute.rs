//! Candidate route generation with a fixed head.
//!
//! Fixing the first element splits the full permutation space into one
//! independent shard per head, which is what the exhaustive search hands to
//! each worker.

use itertools::Itertools;

/// Lazily enumerate `head` followed by every permutation of `items`.
///
/// Elements equal to `head` are removed from `items` before permuting, so the
/// head never appears twice. For `n` systems in total (head included) this
/// yields exactly `(n - 1)!` candidates. Each call starts a fresh enumeration.
pub fn permute<'a, T>(head: &'a T, items: &'a [T]) -> impl Iterator<Item = Vec<T>> + 'a
where
    T: PartialEq + Clone,
{
    let rest: Vec<&'a T> = items.iter().filter(|item| *item != head).collect();
    let len = rest.len();
    rest.into_iter().permutations(len).map(move |tail| {
        let mut candidate = Vec::with_capacity(tail.len() + 1);
        candidate.push(head.clone());
        candidate.extend(tail.into_iter().cloned());
        candidate
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixes_the_requested_head() {
        let routes: Vec<_> = permute(&1, &[1, 2, 3]).collect();
        assert_eq!(routes, vec![vec![1, 2, 3], vec![1, 3, 2]]);

        let routes: Vec<_> = permute(&2, &[1, 2, 3]).collect();
        assert_eq!(routes, vec![vec![2, 1, 3], vec![2, 3, 1]]);
    }

    #[test]
    fn lone_head_yields_single_candidate() {
        let routes: Vec<_> = permute(&7, &[7]).collect();
        assert_eq!(routes, vec![vec![7]]);

        let routes: Vec<Vec<i32>> = permute(&7, &[]).collect();
        assert_eq!(routes, vec![vec![7]]);
    }

    #[test]
    fn restarts_on_every_call() {
        let items = ['a', 'b', 'c', 'd'];
        let first = permute(&'a', &items).count();
        let second = permute(&'a', &items).count();
        assert_eq!(first, 6);
        assert_eq!(first, second);
    }
}
