//! Random selection helpers.

use rand::Rng;
use rand::seq::SliceRandom;

/// Picks one element uniformly at random.
///
/// Returns `None` for an empty slice instead of failing.
///
/// # Example
///
/// ```
/// use mcfly_fixtures::random::random_value;
///
/// let sizes = ["S", "M", "L"];
/// assert!(sizes.contains(random_value(&sizes).unwrap()));
///
/// let empty: [u8; 0] = [];
/// assert_eq!(random_value(&empty), None);
/// ```
pub fn random_value<T>(items: &[T]) -> Option<&T> {
	random_value_with(&mut rand::thread_rng(), items)
}

/// Same as [`random_value`], drawing from the given generator.
pub fn random_value_with<'a, T, R>(rng: &mut R, items: &'a [T]) -> Option<&'a T>
where
	R: Rng + ?Sized,
{
	items.choose(rng)
}
