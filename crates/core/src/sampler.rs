use rand::Rng;

/// Shuffle `items` in place with Fisher–Yates: every permutation is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Draw up to `limit` distinct items of `bank` in random order.
///
/// Returns a shuffled copy truncated to `min(limit, bank.len())`; `bank` is left untouched.
/// A `limit` of zero or less yields nothing.
#[must_use]
pub fn sample<T: Clone, R: Rng + ?Sized>(bank: &[T], limit: i64, rng: &mut R) -> Vec<T> {
    let limit = match usize::try_from(limit) {
        Ok(0) | Err(_) => return Vec::new(),
        Ok(n) => n,
    };

    let mut picked = bank.to_vec();
    shuffle(&mut picked, rng);
    picked.truncate(limit);
    picked
}
