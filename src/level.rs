use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level bands must have strictly ascending upper bounds")]
    UnorderedBands,
    #[error("levels must not decrease from one band to the next")]
    DecreasingLevels,
    #[error("the linear tail needs a non-zero step")]
    ZeroStep,
}

/// Items learned below `below` map to `level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelBand {
    pub below: u32,
    pub level: u32,
}

/// Step function from words learned to learner level: explicit bands up to
/// a cutoff, then one extra level per `tail_step` items with no upper bound.
#[derive(Debug, Clone)]
pub struct LevelPolicy {
    bands: Vec<LevelBand>,
    tail_level: u32,
    tail_step: u32,
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self {
            bands: vec![
                LevelBand { below: 30, level: 1 },
                LevelBand { below: 60, level: 2 },
                LevelBand { below: 100, level: 3 },
                LevelBand { below: 150, level: 4 },
                LevelBand { below: 200, level: 5 },
            ],
            tail_level: 6,
            tail_step: 50,
        }
    }
}

impl LevelPolicy {
    pub fn new(
        bands: Vec<LevelBand>,
        tail_level: u32,
        tail_step: u32,
    ) -> Result<Self, LevelError> {
        if tail_step == 0 {
            return Err(LevelError::ZeroStep);
        }
        if bands.windows(2).any(|w| w[0].below >= w[1].below) {
            return Err(LevelError::UnorderedBands);
        }
        let levels = bands.iter().map(|b| b.level).chain(std::iter::once(tail_level));
        let mut prev = 0;
        for level in levels {
            if level < prev {
                return Err(LevelError::DecreasingLevels);
            }
            prev = level;
        }
        Ok(Self { bands, tail_level, tail_step })
    }

    fn tail_start(&self) -> u32 {
        self.bands.last().map_or(0, |b| b.below)
    }

    pub fn level_for(&self, words_learned: u32) -> u32 {
        if let Some(band) = self.bands.iter().find(|b| words_learned < b.below) {
            return band.level;
        }
        self.tail_level + (words_learned - self.tail_start()) / self.tail_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_band_edges() {
        let policy = LevelPolicy::default();
        let cases = [
            (0, 1), (29, 1), (30, 2), (59, 2), (60, 3), (99, 3), (100, 4),
            (149, 4), (150, 5), (199, 5), (200, 6), (249, 6), (250, 7), (1000, 22),
        ];
        for (words, level) in cases {
            assert_eq!(policy.level_for(words), level, "words_learned = {}", words);
        }
    }

    #[test]
    fn test_level_is_monotonic() {
        let policy = LevelPolicy::default();
        let mut prev = policy.level_for(0);
        for n in 1..600 {
            let level = policy.level_for(n);
            assert!(level >= prev);
            prev = level;
        }
    }

    #[test]
    fn test_custom_policy() {
        let policy = LevelPolicy::new(vec![LevelBand { below: 10, level: 1 }], 2, 10).unwrap();
        assert_eq!(policy.level_for(9), 1);
        assert_eq!(policy.level_for(10), 2);
        assert_eq!(policy.level_for(35), 4);

        let tail_only = LevelPolicy::new(Vec::new(), 1, 30).unwrap();
        assert_eq!(tail_only.level_for(0), 1);
        assert_eq!(tail_only.level_for(30), 2);
    }

    #[test]
    fn test_invalid_policies() {
        let unordered = vec![LevelBand { below: 50, level: 1 }, LevelBand { below: 20, level: 2 }];
        assert_eq!(LevelPolicy::new(unordered, 3, 10).unwrap_err(), LevelError::UnorderedBands);

        let decreasing = vec![LevelBand { below: 10, level: 3 }, LevelBand { below: 20, level: 2 }];
        assert_eq!(LevelPolicy::new(decreasing, 4, 10).unwrap_err(), LevelError::DecreasingLevels);

        assert_eq!(LevelPolicy::new(Vec::new(), 1, 0).unwrap_err(), LevelError::ZeroStep);
    }
}
