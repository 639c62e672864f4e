use rand::Rng;

/// Probabilistic cache hit/miss oracle
///
/// Holds configuration only; every decision is a single draw from the
/// random source the caller passes in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheModel {
    hit_probability: f64,
    miss_penalty: u64,
}

impl CacheModel {
    pub fn new(hit_probability: f64, miss_penalty: u64) -> Self {
        Self {
            hit_probability,
            miss_penalty,
        }
    }

    /// Draw one value from `rng` and report whether it is a hit
    pub fn is_hit<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen::<f64>() < self.hit_probability
    }

    /// Extra delay charged per miss
    pub fn miss_penalty(&self) -> u64 {
        self.miss_penalty
    }

    pub fn hit_probability(&self) -> f64 {
        self.hit_probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_certain_hit_and_certain_miss() {
        let mut rng = StdRng::seed_from_u64(7);
        let always = CacheModel::new(1.0, 3);
        let never = CacheModel::new(0.0, 3);
        for _ in 0..1000 {
            assert!(always.is_hit(&mut rng));
            assert!(!never.is_hit(&mut rng));
        }
        assert_eq!(always.miss_penalty(), 3);
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let cache = CacheModel::new(0.5, 1);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let left: Vec<bool> = (0..64).map(|_| cache.is_hit(&mut a)).collect();
        let right: Vec<bool> = (0..64).map(|_| cache.is_hit(&mut b)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_hit_rate_tracks_probability() {
        let cache = CacheModel::new(0.8, 2);
        let mut rng = StdRng::seed_from_u64(1);
        let hits = (0..10_000).filter(|_| cache.is_hit(&mut rng)).count();
        assert!((7_500..8_500).contains(&hits), "hits = {}", hits);
    }
}
