/// Extends vectors to behave as insertion-ordered sets
///
/// Level energies are floats, so they can not go into a `HashSet` or
/// `BTreeSet` directly. The lists involved are short, so a linear check keeps
/// the order in which values were first seen.
pub trait UniqueExt<T> {
    /// Push a value only if an equal value is not already present
    ///
    /// Returns `true` if the value was added.
    ///
    /// ```rust
    /// # use rnlib_utils::UniqueExt;
    /// let mut levels = vec![0.0, 140.511];
    /// assert!(!levels.push_unique(0.0));
    /// assert!(levels.push_unique(142.6836));
    /// assert_eq!(levels, vec![0.0, 140.511, 142.6836]);
    /// ```
    fn push_unique(&mut self, value: T) -> bool;

    /// Push every value not already present, in order
    ///
    /// Returns the number of values added.
    ///
    /// ```rust
    /// # use rnlib_utils::UniqueExt;
    /// let mut levels = vec![0.0];
    /// assert_eq!(levels.extend_unique([0.0, 140.511, 0.0]), 1);
    /// assert_eq!(levels, vec![0.0, 140.511]);
    /// ```
    fn extend_unique<I: IntoIterator<Item = T>>(&mut self, values: I) -> usize;
}

impl<T: PartialEq> UniqueExt<T> for Vec<T> {
    fn push_unique(&mut self, value: T) -> bool {
        if self.contains(&value) {
            false
        } else {
            self.push(value);
            true
        }
    }

    fn extend_unique<I: IntoIterator<Item = T>>(&mut self, values: I) -> usize {
        values
            .into_iter()
            .map(|v| self.push_unique(v))
            .filter(|added| *added)
            .count()
    }
}
