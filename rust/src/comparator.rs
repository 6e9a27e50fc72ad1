//! Key ordering for the tree engine.
//!
//! Every ordered container is parameterized by a [`Comparator`]. `NaturalOrder`
//! uses the key's `Ord` implementation and is the default; any
//! `Fn(&K, &K) -> Ordering` closure can be passed instead. The comparator must
//! describe a strict total order and answer consistently for the lifetime of
//! the container.

use std::cmp::Ordering;

/// A total order over keys of type `K`.
pub trait Comparator<K: ?Sized> {
    /// Compare two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their `Ord` implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare("b", "a"), Ordering::Greater);
    }

    #[test]
    fn test_closure_comparator() {
        let descending = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(descending.compare(&1, &2), Ordering::Greater);
        assert_eq!(descending.compare(&2, &2), Ordering::Equal);
    }
}
