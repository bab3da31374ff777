use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random generation strategy over an injectable random source.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator<R = SmallRng> {
    rng: R,
}

impl<R: Rng> RandomMinefieldGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomMinefieldGenerator<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> MinefieldGenerator for RandomMinefieldGenerator<R> {
    fn generate(&mut self, config: GameConfig) -> MineLayout {
        let mines = sample_positions(config, &mut self.rng);
        log::debug!(
            "Placed {} mines on a {}x{} board",
            mines.len(),
            config.rows(),
            config.cols()
        );

        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        for pos in mines {
            mine_mask[pos.to_nd_index()] = true;
        }

        MineLayout {
            counts: counts_within(&mine_mask, config.size()),
            mine_mask,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_layout_matches_config() {
        let config = Difficulty::Expert.config();
        let layout = RandomMinefieldGenerator::seeded(1).generate(config);

        assert_eq!(layout.game_config(), config);
        assert_eq!(layout.mine_positions().len(), 99);
    }

    #[test]
    fn borrowed_rng_can_drive_generation() {
        let mut rng = SmallRng::seed_from_u64(9);
        let config = GameConfig::new(4, 4, 5).unwrap();

        let first = RandomMinefieldGenerator::new(&mut rng).generate(config);
        let second = RandomMinefieldGenerator::new(&mut rng).generate(config);

        assert_eq!(first.mine_count(), 5);
        assert_eq!(second.mine_count(), 5);
    }
}
