use rand::Rng;

/// Shuffle `items` in place with the Fisher–Yates algorithm.
///
/// Walks from the last index down to 1, swapping each element with one drawn
/// uniformly from `[0, i]`, so every ordering is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
