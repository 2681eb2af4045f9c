//! Bounded sampling of array elements.

use rand::Rng;
use rand::seq::SliceRandom;

/// How many elements of an array participate in inference.
pub const SAMPLE_CAP: usize = 100;

/// Select at most [`SAMPLE_CAP`] elements: the whole input when it fits,
/// otherwise a random non-repeating choice (shuffle, then truncate). The
/// caller injects the random source so runs are reproducible under a seed.
pub fn sample<T, R: Rng>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    if items.len() <= SAMPLE_CAP {
        return items;
    }
    items.shuffle(rng);
    items.truncate(SAMPLE_CAP);
    items
}
