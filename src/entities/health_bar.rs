use crate::config::{HEALTH_BAR_WIDTH, SCRIPT_PHASE_HIGH, SCRIPT_PHASE_LOW};

/// Colour band of the health bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Green,
    Yellow,
    Red,
}

/// Snapshot of the encounter's health, rebuilt every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthBar {
    pub health: i32,
    pub max: i32,
    /// Outer width of the bar; the fill is drawn inside a 2-unit border.
    pub width: f32,
    pub victory: bool,
}

impl HealthBar {
    /// Builds the bar for the given health; a non-positive max counts as 1
    pub fn new(health: i32, max: i32) -> Self {
        Self {
            health,
            max: max.max(1),
            width: HEALTH_BAR_WIDTH,
            victory: health <= 0,
        }
    }

    /// Current health as a fraction of max
    pub fn ratio(&self) -> f32 {
        self.health as f32 / self.max as f32
    }

    /// Width of the filled part, never negative.
    pub fn fill_width(&self) -> f32 {
        ((self.width - 4.0) * self.ratio()).max(0.0)
    }

    /// Green above 60%, yellow down to 30% exclusive, red at or below 30%
    pub fn band(&self) -> HealthBand {
        let ratio = self.ratio();
        if ratio <= SCRIPT_PHASE_LOW {
            HealthBand::Red
        } else if ratio <= SCRIPT_PHASE_HIGH {
            HealthBand::Yellow
        } else {
            HealthBand::Green
        }
    }

    /// The scripted bullet timeline only runs inside the yellow band.
    pub fn in_script_phase(&self) -> bool {
        self.band() == HealthBand::Yellow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_victory_at_or_below_zero() {
        assert!(HealthBar::new(0, 200).victory);
        assert!(HealthBar::new(-10, 200).victory);
        assert!(!HealthBar::new(1, 200).victory);
    }

    #[test]
    fn test_bands() {
        assert_eq!(HealthBar::new(200, 200).band(), HealthBand::Green);
        assert_eq!(HealthBar::new(121, 200).band(), HealthBand::Green);
        assert_eq!(HealthBar::new(120, 200).band(), HealthBand::Yellow);
        assert_eq!(HealthBar::new(61, 200).band(), HealthBand::Yellow);
        assert_eq!(HealthBar::new(60, 200).band(), HealthBand::Red);
        assert_eq!(HealthBar::new(0, 200).band(), HealthBand::Red);
    }

    #[test]
    fn test_script_phase_window() {
        assert!(!HealthBar::new(130, 200).in_script_phase());
        assert!(HealthBar::new(120, 200).in_script_phase());
        assert!(HealthBar::new(70, 200).in_script_phase());
        assert!(!HealthBar::new(60, 200).in_script_phase());
    }

    #[test]
    fn test_fill_width_clamped() {
        assert_eq!(HealthBar::new(200, 200).fill_width(), 196.0);
        assert_eq!(HealthBar::new(100, 200).fill_width(), 98.0);
        assert_eq!(HealthBar::new(-30, 200).fill_width(), 0.0);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_fill_never_negative_or_overfull(health in -500i32..=200) {
                let bar = HealthBar::new(health, 200);
                prop_assert!(bar.fill_width() >= 0.0);
                prop_assert!(bar.fill_width() <= bar.width - 4.0);
                prop_assert_eq!(bar.victory, health <= 0);
            }
        }
    }
}
