use rand::Rng;

use crate::config::{
    ENEMY_DESCENT_SPEED, ENEMY_FIRE_INTERVAL_MAX, ENEMY_FIRE_INTERVAL_MIN, ENEMY_HEIGHT,
    ENEMY_WIDTH,
};
use crate::geometry::{Field, Rect, Vector};

/// Movement phase of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Descending,
    Holding,
}

/// The encounter boss: descends, stops and fires aimed bullets
#[derive(Debug, Clone)]
pub struct Enemy {
    pub rect: Rect,
    pub velocity: Vector,
    /// Centre depth past which the enemy stops descending.
    pub stop_depth: f32,
    /// Ticks between aimed shots while holding.
    pub fire_interval: u64,
    pub state: EnemyState,
}

impl Enemy {
    /// Spawns centred at the top edge with a random stop depth in
    /// `[height / 4 - 50, height / 4]` and a random firing interval.
    pub fn spawn<R: Rng>(field: &Field, rng: &mut R) -> Self {
        let quarter = field.height / 4.0;
        let stop_depth = rng.random_range((quarter - 50.0)..=quarter).floor();
        let fire_interval = rng.random_range(ENEMY_FIRE_INTERVAL_MIN..=ENEMY_FIRE_INTERVAL_MAX);
        Self::new(field.width / 2.0, 0.0, stop_depth, fire_interval)
    }

    /// Creates a descending enemy centred at `(cx, cy)`
    pub fn new(cx: f32, cy: f32, stop_depth: f32, fire_interval: u64) -> Self {
        Self {
            rect: Rect::from_center(cx, cy, ENEMY_WIDTH, ENEMY_HEIGHT),
            velocity: Vector::new(0.0, ENEMY_DESCENT_SPEED),
            stop_depth,
            fire_interval: fire_interval.max(1),
            state: EnemyState::Descending,
        }
    }

    /// Switches to holding the first time the centre is past the stop depth,
    /// then moves.
    pub fn update(&mut self) {
        if self.state == EnemyState::Descending && self.rect.center_y() > self.stop_depth {
            self.velocity.y = 0.0;
            self.state = EnemyState::Holding;
        }
        self.rect.translate(self.velocity);
    }

    /// True once the enemy has stopped descending
    pub fn is_holding(&self) -> bool {
        self.state == EnemyState::Holding
    }

    /// Only a holding enemy fires, and only on multiples of its interval.
    pub fn should_fire(&self, tick: u64) -> bool {
        self.is_holding() && tick.is_multiple_of(self.fire_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spawn_ranges() {
        let field = Field::new(600.0, 700.0);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let enemy = Enemy::spawn(&field, &mut rng);
            assert_eq!(enemy.rect.center(), (300.0, 0.0));
            assert!((125.0..=175.0).contains(&enemy.stop_depth));
            assert!((50..=300).contains(&enemy.fire_interval));
            assert_eq!(enemy.state, EnemyState::Descending);
        }
    }

    #[test]
    fn test_descends_then_holds_once() {
        let mut enemy = Enemy::new(300.0, 0.0, 125.0, 50);
        let mut transitions = 0;
        let mut previous = enemy.state;
        for _ in 0..100 {
            enemy.update();
            if enemy.state != previous {
                transitions += 1;
                previous = enemy.state;
            }
        }
        assert_eq!(transitions, 1);
        assert!(enemy.is_holding());
        // 0, 6, ..., 126: the update that sees 126 > 125 stops the enemy there
        assert_eq!(enemy.rect.center_y(), 126.0);
    }

    #[test]
    fn test_transition_tick_is_first_past_depth() {
        let mut enemy = Enemy::new(300.0, 0.0, 125.0, 50);
        for _ in 0..21 {
            enemy.update();
            assert_eq!(enemy.state, EnemyState::Descending);
        }
        assert_eq!(enemy.rect.center_y(), 126.0);
        enemy.update();
        assert_eq!(enemy.state, EnemyState::Holding);
        assert_eq!(enemy.velocity.y, 0.0);
    }

    #[test]
    fn test_fires_only_while_holding() {
        let mut enemy = Enemy::new(300.0, 0.0, 125.0, 50);
        assert!(!enemy.should_fire(0));
        assert!(!enemy.should_fire(100));

        enemy.state = EnemyState::Holding;
        assert!(enemy.should_fire(0));
        assert!(enemy.should_fire(100));
        assert!(!enemy.should_fire(101));
    }
}
