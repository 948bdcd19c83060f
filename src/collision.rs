//! Per-tick collision resolution.
//!
//! Rules run in a fixed order and the order matters:
//!
//! 1. beams against enemies (beams consumed, encounter damaged)
//! 2. player against aimed bullets (loss)
//! 3. player against free bullets (loss)
//! 4. encounter health at or below zero (win)
//!
//! A lethal hit therefore beats a killing beam landing in the same tick.

use crate::config::BEAM_DAMAGE;
use crate::entities::{Beam, Bullet, Enemy, FreeBullet, HealthBar, MatchOutcome, Mover};
use crate::geometry::Rect;

/// Everything collision resolution decided for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Indices of enemies struck by at least one beam.
    pub enemies_hit: Vec<usize>,
    /// Health to subtract from the encounter.
    pub damage: i32,
    pub outcome: Option<MatchOutcome>,
}

/// Removes every beam touching an enemy and returns the indices of the
/// enemies that were touched, each at most once.
pub fn beams_vs_enemies(beams: &mut Vec<Beam>, enemies: &[Enemy]) -> Vec<usize> {
    let hit: Vec<usize> = enemies
        .iter()
        .enumerate()
        .filter(|(_, enemy)| beams.iter().any(|beam| beam.rect.overlaps(&enemy.rect)))
        .map(|(idx, _)| idx)
        .collect();
    if !hit.is_empty() {
        beams.retain(|beam| !enemies.iter().any(|enemy| beam.rect.overlaps(&enemy.rect)));
    }
    hit
}

/// Removes every projectile overlapping `target`; true if there was one.
pub fn take_hits<T: Mover>(target: &Rect, projectiles: &mut Vec<T>) -> bool {
    let before = projectiles.len();
    projectiles.retain(|p| !p.rect().overlaps(target));
    projectiles.len() != before
}

/// Applies the four rules in order. `health` is the encounter health before
/// this tick's beam damage.
pub fn resolve(
    player: &Rect,
    enemies: &[Enemy],
    beams: &mut Vec<Beam>,
    bullets: &mut Vec<Bullet>,
    free_bullets: &mut Vec<FreeBullet>,
    health: i32,
    max_health: i32,
) -> Resolution {
    let enemies_hit = beams_vs_enemies(beams, enemies);
    let damage = BEAM_DAMAGE * enemies_hit.len() as i32;

    let outcome = if take_hits(player, bullets) || take_hits(player, free_bullets) {
        Some(MatchOutcome::Lost)
    } else if HealthBar::new(health - damage, max_health).victory {
        Some(MatchOutcome::Won)
    } else {
        None
    };

    Resolution {
        enemies_hit,
        damage,
        outcome,
    }
}
