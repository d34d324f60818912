//! A wrapper struct for implementing `Ord` on `PartialOrd` distance values
//! while carrying a payload that is ignored for ordering purposes.

/// A `MaxItem<A, T>` is ordered in the same way as `T`, except that
/// incomparable items are treated as less than any other item. The type
/// parameter `A` stores auxiliary data alongside the distance value.
pub(crate) struct MaxItem<A, T: PartialOrd>(pub A, pub T);

impl<A, T: PartialOrd> PartialEq for MaxItem<A, T> {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

impl<A, T: PartialOrd> Eq for MaxItem<A, T> {}

impl<A, T: PartialOrd> PartialOrd for MaxItem<A, T> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<A, T: PartialOrd> Ord for MaxItem<A, T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.1.partial_cmp(&other.1).unwrap_or(core::cmp::Ordering::Less)
    }
}
