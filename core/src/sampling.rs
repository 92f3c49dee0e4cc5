use crate::prelude::{SiteError, SiteResult};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform integer sampler shared by every generator.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns an integer uniformly distributed in `[min, max]`.
    pub fn sample_int(&mut self, min: u32, max: u32) -> SiteResult<u32> {
        if min > max {
            return Err(SiteError::InvalidRange { min, max });
        }
        Ok(self.rng.gen_range(min..=max))
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_int_stays_within_inclusive_bounds() {
        let mut sampler = RandomSampler::seeded(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let value = sampler.sample_int(2, 5).unwrap();
            assert!((2..=5).contains(&value));
            seen_min |= value == 2;
            seen_max |= value == 5;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn sample_int_degenerate_range_returns_bound() {
        let mut sampler = RandomSampler::seeded(1);
        assert_eq!(sampler.sample_int(0, 0).unwrap(), 0);
    }

    #[test]
    fn sample_int_rejects_inverted_range() {
        let mut sampler = RandomSampler::seeded(1);
        let err = sampler.sample_int(9, 3).unwrap_err();
        assert!(matches!(err, SiteError::InvalidRange { min: 9, max: 3 }));
    }

    #[test]
    fn seeded_samplers_repeat() {
        let mut a = RandomSampler::seeded(42);
        let mut b = RandomSampler::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.sample_int(0, 1000).unwrap(), b.sample_int(0, 1000).unwrap());
        }
    }
}
