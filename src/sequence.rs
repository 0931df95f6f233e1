use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build a practice sequence of `length` items drawn from `pool`.
///
/// The first item is uniform over the pool; every later item is uniform over
/// the pool minus the immediately preceding item, so the same target never
/// appears twice in a row. When excluding the previous item empties the
/// candidate set (a one-element pool) the whole pool is used instead.
/// Repeats at distance two or more are allowed.
///
/// An empty pool is a caller contract violation; pools are static, non-empty
/// constants and are not defended against here.
pub fn generate(pool: &[String], length: usize) -> Vec<String> {
    generate_with_rng(&mut rand::thread_rng(), pool, length)
}

/// Same as [`generate`] but with an explicit random source, so tests can
/// drive a seeded [`StdRng`].
pub fn generate_with_rng<R: Rng>(rng: &mut R, pool: &[String], length: usize) -> Vec<String> {
    let mut items: Vec<String> = Vec::with_capacity(length);

    for _ in 0..length {
        let candidates: Vec<&String> = match items.last() {
            Some(prev) => {
                let filtered: Vec<&String> = pool.iter().filter(|w| *w != prev).collect();
                if filtered.is_empty() {
                    pool.iter().collect()
                } else {
                    filtered
                }
            }
            None => pool.iter().collect(),
        };

        let pick = candidates[rng.gen_range(0..candidates.len())];
        items.push(pick.clone());
    }

    items
}

/// Seeded convenience used by deterministic tests.
pub fn generate_seeded(seed: u64, pool: &[String], length: usize) -> Vec<String> {
    generate_with_rng(&mut StdRng::seed_from_u64(seed), pool, length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn pool(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_generate_length() {
        let p = pool(&["a", "b", "c"]);
        assert_eq!(generate(&p, 0).len(), 0);
        assert_eq!(generate(&p, 1).len(), 1);
        assert_eq!(generate(&p, 25).len(), 25);
    }

    #[test]
    fn test_items_come_from_pool() {
        let p = pool(&["나무", "하늘", "바다"]);
        for item in generate(&p, 50) {
            assert!(p.contains(&item));
        }
    }

    #[test]
    fn test_no_adjacent_repeats() {
        let p = pool(&["a", "b"]);
        for seed in 0..20 {
            let seq = generate_seeded(seed, &p, 10);
            for (prev, next) in seq.iter().tuple_windows() {
                assert_ne!(prev, next, "adjacent repeat in {seq:?}");
            }
        }
    }

    #[test]
    fn test_single_element_pool_exempt_from_no_repeat() {
        let p = pool(&["x"]);
        assert_eq!(generate(&p, 5), vec!["x", "x", "x", "x", "x"]);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let p = pool(&["a", "b", "c", "d"]);
        assert_eq!(generate_seeded(7, &p, 30), generate_seeded(7, &p, 30));
    }

    #[test]
    fn test_two_element_pool_alternates() {
        // With one element excluded each step, a two-element pool must
        // strictly alternate after the first pick.
        let p = pool(&["a", "b"]);
        let seq = generate_seeded(3, &p, 12);
        for (prev, next) in seq.iter().tuple_windows() {
            assert_ne!(prev, next);
        }
        let distinct: Vec<_> = seq.iter().unique().collect();
        assert_eq!(distinct.len(), 2);
    }
}
