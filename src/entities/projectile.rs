use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::{
    BEAM_HEIGHT, BEAM_SPEED, BEAM_WIDTH, BULLET_RADIUS_MAX, BULLET_RADIUS_MIN, BULLET_SPEED,
};
use crate::error::GameError;
use crate::geometry::{Field, Rect, Vector, direction_to, is_inside};

/// Plain RGB colour, mapped to a terminal colour by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// Colours an aimed bullet may be drawn in.
pub const BULLET_PALETTE: [Rgb; 6] = [
    Rgb(255, 0, 0),
    Rgb(0, 255, 0),
    Rgb(0, 0, 255),
    Rgb(255, 255, 0),
    Rgb(255, 0, 255),
    Rgb(0, 255, 255),
];

/// Anything that travels in a straight line and disappears once it leaves
/// the field.
pub trait Mover {
    fn rect(&self) -> &Rect;
    fn rect_mut(&mut self) -> &mut Rect;
    fn velocity(&self) -> Vector;
    fn speed(&self) -> f32;

    fn advance(&mut self) {
        let step = self.velocity().scaled(self.speed());
        self.rect_mut().translate(step);
    }

    fn in_field(&self, field: &Field) -> bool {
        is_inside(self.rect(), field)
    }
}

/// Moves every item one step and drops those no longer fully inside `field`.
pub fn advance_and_cull<T: Mover>(items: &mut Vec<T>, field: &Field) {
    for item in items.iter_mut() {
        item.advance();
    }
    items.retain(|item| item.in_field(field));
}

/// Enemy shot aimed at where the player stood when it was fired.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub rect: Rect,
    pub velocity: Vector,
    pub color: Rgb,
    pub radius: f32,
    pub speed: f32,
}

impl Bullet {
    /// Fires from just below `shooter` towards `target` with a random size
    /// and colour.
    pub fn aimed<R: Rng>(
        shooter: &Rect,
        target: &Rect,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let velocity = direction_to(shooter, target)?;
        let radius = rng.random_range(BULLET_RADIUS_MIN..=BULLET_RADIUS_MAX) as f32;
        let color = *BULLET_PALETTE.choose(rng).unwrap_or(&Rgb::WHITE);
        let cx = shooter.center_x();
        let cy = shooter.center_y() + shooter.height / 2.0;
        Ok(Self {
            rect: Rect::from_center(cx, cy, radius * 2.0, radius * 2.0),
            velocity,
            color,
            radius,
            speed: BULLET_SPEED,
        })
    }
}

impl Mover for Bullet {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn velocity(&self) -> Vector {
        self.velocity
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

/// Scripted bullet with an explicit origin, heading, colour and size.
#[derive(Debug, Clone)]
pub struct FreeBullet {
    pub rect: Rect,
    pub velocity: Vector,
    pub color: Rgb,
    pub radius: f32,
    pub speed: f32,
    /// Ticks to wait before moving. Carried for scripts that stagger
    /// volleys; the built-in timeline leaves it at zero.
    pub wait_time: u32,
}

impl FreeBullet {
    /// Creates a bullet centred at `(cx, cy)` moving at the default bullet speed
    pub fn new(cx: f32, cy: f32, velocity: Vector, color: Rgb, radius: f32) -> Self {
        Self {
            rect: Rect::from_center(cx, cy, radius * 2.0, radius * 2.0),
            velocity,
            color,
            radius,
            speed: BULLET_SPEED,
            wait_time: 0,
        }
    }

    /// Holds the bullet in place for `ticks` ticks before it starts moving
    pub fn set_wait_time(&mut self, ticks: u32) {
        self.wait_time = ticks;
    }
}

impl Mover for FreeBullet {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn velocity(&self) -> Vector {
        self.velocity
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn advance(&mut self) {
        if self.wait_time > 0 {
            self.wait_time -= 1;
            return;
        }
        let step = self.velocity.scaled(self.speed);
        self.rect.translate(step);
    }
}

/// Player shot travelling straight up.
#[derive(Debug, Clone)]
pub struct Beam {
    pub rect: Rect,
    pub velocity: Vector,
    pub speed: f32,
}

impl Beam {
    /// Spawns one shooter-height above the shooter's centre.
    pub fn fired_from(shooter: &Rect) -> Self {
        let velocity = Vector::new(0.0, -1.0);
        let cx = shooter.center_x() + shooter.width * velocity.x;
        let cy = shooter.center_y() + shooter.height * velocity.y;
        Self {
            rect: Rect::from_center(cx, cy, BEAM_WIDTH, BEAM_HEIGHT),
            velocity,
            speed: BEAM_SPEED,
        }
    }
}

impl Mover for Beam {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn velocity(&self) -> Vector {
        self.velocity
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field() -> Field {
        Field::new(600.0, 700.0)
    }

    #[test]
    fn test_aimed_bullet_heads_for_target() {
        let mut rng = StdRng::seed_from_u64(7);
        let shooter = Rect::from_center(300.0, 100.0, 90.0, 60.0);
        let target = Rect::from_center(300.0, 600.0, 50.0, 50.0);
        let bullet = Bullet::aimed(&shooter, &target, &mut rng).unwrap();

        assert_eq!(bullet.velocity, Vector::new(0.0, 1.0));
        assert_eq!(bullet.rect.center(), (300.0, 130.0));
        assert!((10.0..=50.0).contains(&bullet.radius));
        assert!(BULLET_PALETTE.contains(&bullet.color));
        assert_eq!(bullet.speed, 6.0);
    }

    #[test]
    fn test_aimed_bullet_rejects_coincident_centres() {
        let mut rng = StdRng::seed_from_u64(7);
        let rect = Rect::from_center(300.0, 300.0, 50.0, 50.0);
        assert!(Bullet::aimed(&rect, &rect, &mut rng).is_err());
    }

    #[test]
    fn test_beam_spawns_above_shooter_and_climbs() {
        let shooter = Rect::from_center(300.0, 600.0, 50.0, 50.0);
        let mut beam = Beam::fired_from(&shooter);
        assert_eq!(beam.rect.center(), (300.0, 550.0));
        beam.advance();
        assert_eq!(beam.rect.center(), (300.0, 540.0));
    }

    #[test]
    fn test_free_bullet_moves_at_scaled_speed() {
        let mut bullet = FreeBullet::new(25.0, 50.0, Vector::new(0.0, 0.5), Rgb::WHITE, 25.0);
        bullet.advance();
        assert_eq!(bullet.rect.center(), (25.0, 53.0));
    }

    #[test]
    fn test_free_bullet_wait_time_holds_position() {
        let mut bullet = FreeBullet::new(100.0, 100.0, Vector::new(1.0, 0.0), Rgb::WHITE, 5.0);
        bullet.set_wait_time(2);
        bullet.advance();
        bullet.advance();
        assert_eq!(bullet.rect.center(), (100.0, 100.0));
        bullet.advance();
        assert_eq!(bullet.rect.center(), (106.0, 100.0));
    }

    #[test]
    fn test_cull_removes_leaving_entities() {
        let f = field();
        let mut beams = vec![
            Beam::fired_from(&Rect::from_center(300.0, 600.0, 50.0, 50.0)),
            // Top edge at 5: one step of 10 takes it out
            Beam {
                rect: Rect::new(100.0, 5.0, 20.0, 40.0),
                velocity: Vector::new(0.0, -1.0),
                speed: 10.0,
            },
        ];
        advance_and_cull(&mut beams, &f);
        assert_eq!(beams.len(), 1);
        assert_eq!(beams[0].rect.center(), (300.0, 540.0));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_survivors_are_inside_field(
                starts in prop::collection::vec((30.0f32..570.0, 30.0f32..670.0, 0.0f32..std::f32::consts::TAU), 1..40),
                steps in 1usize..200
            ) {
                let f = field();
                let mut bullets: Vec<FreeBullet> = starts
                    .into_iter()
                    .map(|(x, y, a)| FreeBullet::new(x, y, Vector::from_angle(a), Rgb::WHITE, 10.0))
                    .collect();
                for _ in 0..steps {
                    advance_and_cull(&mut bullets, &f);
                    for b in &bullets {
                        prop_assert!(is_inside(&b.rect, &f));
                    }
                }
            }
        }
    }
}
