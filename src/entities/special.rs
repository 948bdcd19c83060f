use tracing::info;

use super::projectile::{Bullet, FreeBullet};
use crate::config::{CUTSCENE_FRAME_BUDGET, SPECIAL_USES};
use crate::cutscene::Cutscene;
use crate::error::GameError;

/// Limited-use screen clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Special {
    pub lives: u8,
    pub frame_budget: u32,
}

impl Default for Special {
    fn default() -> Self {
        Self::new(SPECIAL_USES, CUTSCENE_FRAME_BUDGET)
    }
}

impl Special {
    /// Creates the ability with `lives` uses and a cutscene frame budget
    pub fn new(lives: u8, frame_budget: u32) -> Self {
        Self {
            lives,
            frame_budget,
        }
    }

    /// True while at least one use remains
    pub fn is_available(&self) -> bool {
        self.lives > 0
    }

    /// Spends one use: plays the cutscene, then empties both enemy bullet
    /// collections. Returns `false` without side effects once exhausted.
    pub fn activate<C: Cutscene + ?Sized>(
        &mut self,
        cutscene: &mut C,
        bullets: &mut Vec<Bullet>,
        free_bullets: &mut Vec<FreeBullet>,
    ) -> Result<bool, GameError> {
        if !self.is_available() {
            return Ok(false);
        }
        self.lives -= 1;
        let report = cutscene.play(self.frame_budget)?;
        info!(
            lives_left = self.lives,
            frames = report.frames_shown,
            truncated = report.truncated,
            cleared = bullets.len() + free_bullets.len(),
            "special activated"
        );
        bullets.clear();
        free_bullets.clear();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cutscene::{CutsceneReport, NoCutscene};
    use crate::entities::projectile::Rgb;
    use crate::geometry::Vector;

    struct CountingCutscene {
        plays: u32,
        last_budget: u32,
    }

    impl Cutscene for CountingCutscene {
        fn play(&mut self, frame_budget: u32) -> Result<CutsceneReport, GameError> {
            self.plays += 1;
            self.last_budget = frame_budget;
            Ok(CutsceneReport {
                frames_shown: frame_budget,
                truncated: false,
            })
        }
    }

    fn free_bullet() -> FreeBullet {
        FreeBullet::new(100.0, 100.0, Vector::new(0.0, 1.0), Rgb::WHITE, 5.0)
    }

    #[test]
    fn test_last_use_clears_and_then_noops() {
        let mut special = Special::new(1, 30);
        let mut cutscene = CountingCutscene {
            plays: 0,
            last_budget: 0,
        };
        let mut bullets = Vec::new();
        let mut free_bullets = vec![free_bullet(), free_bullet()];

        assert!(special.activate(&mut cutscene, &mut bullets, &mut free_bullets).unwrap());
        assert_eq!(special.lives, 0);
        assert!(free_bullets.is_empty());
        assert_eq!(cutscene.plays, 1);
        assert_eq!(cutscene.last_budget, 30);

        free_bullets.push(free_bullet());
        assert!(!special.activate(&mut cutscene, &mut bullets, &mut free_bullets).unwrap());
        assert_eq!(special.lives, 0);
        assert_eq!(free_bullets.len(), 1);
        assert_eq!(cutscene.plays, 1);
    }

    #[test]
    fn test_default_has_three_uses() {
        let mut special = Special::default();
        let mut bullets = Vec::new();
        let mut free_bullets = Vec::new();
        for expected in (0..3).rev() {
            special
                .activate(&mut NoCutscene, &mut bullets, &mut free_bullets)
                .unwrap();
            assert_eq!(special.lives, expected);
        }
        assert!(!special.is_available());
    }
}
