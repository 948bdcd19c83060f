use crate::geometry::Rect;

/// Short two-frame flash left where a beam struck.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub center: (f32, f32),
    pub life: i32,
    pub frame: usize,
}

impl Explosion {
    /// Creates an explosion centred on `rect`
    pub fn at(rect: &Rect, life: i32) -> Self {
        Self {
            center: rect.center(),
            life,
            frame: 0,
        }
    }

    /// Counts the life down, flipping the frame every 10 ticks. Floor
    /// division, so the final tick at life -1 shows the second frame.
    pub fn update(&mut self) {
        self.life -= 1;
        self.frame = self.life.div_euclid(10).rem_euclid(2) as usize;
    }

    /// Finished once life drops below zero
    pub fn is_dead(&self) -> bool {
        self.life < 0
    }

    /// Character drawn for the current frame
    pub fn glyph(&self) -> &'static str {
        match self.frame {
            0 => "*",
            _ => "+",
        }
    }
}

/// Steps every explosion and drops the finished ones.
pub fn update_explosions(explosions: &mut Vec<Explosion>) {
    for explosion in explosions.iter_mut() {
        explosion.update();
    }
    explosions.retain(|e| !e.is_dead());
}
