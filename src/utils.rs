//! Utility functions for the crate.

use core::cmp::Ordering;

/// Return the index and value of the minimum value in the given slice of values.
///
/// NAN values are ordered as greater than all other values.
///
/// This will return `None` if the given slice is empty.
pub(crate) fn arg_min<T: PartialOrd + Copy>(values: &[T]) -> Option<(usize, T)> {
    values
        .iter()
        .enumerate()
        .min_by(|&(_, l), &(_, r)| l.partial_cmp(r).unwrap_or(Ordering::Greater))
        .map(|(i, v)| (i, *v))
}

/// Return the index and value of the maximum value in the given slice of values.
///
/// NAN values are ordered as smaller than all other values.
///
/// This will return `None` if the given slice is empty.
pub(crate) fn arg_max<T: PartialOrd + Copy>(values: &[T]) -> Option<(usize, T)> {
    values
        .iter()
        .enumerate()
        .max_by(|&(_, l), &(_, r)| l.partial_cmp(r).unwrap_or(Ordering::Less))
        .map(|(i, v)| (i, *v))
}

#[cfg(test)]
mod tests {
    use super::{arg_max, arg_min};

    #[test]
    fn extrema() {
        let values = [3.0_f64, 1.0, 4.0, 1.5];
        assert_eq!(arg_min(&values), Some((1, 1.0)));
        assert_eq!(arg_max(&values), Some((2, 4.0)));

        let empty: [f64; 0] = [];
        assert_eq!(arg_min(&empty), None);
        assert_eq!(arg_max(&empty), None);
    }
}
