use crate::config::{PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH};
use crate::geometry::{Field, Rect, Vector, is_inside};

/// The four held movement keys sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    /// Net unit-grid direction of the pressed keys; opposite keys cancel.
    pub fn net(&self) -> (i8, i8) {
        let mut dx = 0;
        let mut dy = 0;
        if self.up {
            dy -= 1;
        }
        if self.down {
            dy += 1;
        }
        if self.left {
            dx -= 1;
        }
        if self.right {
            dx += 1;
        }
        (dx, dy)
    }
}

/// One of the eight orientations the player sprite can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::East,
        Facing::NorthEast,
        Facing::North,
        Facing::NorthWest,
        Facing::West,
        Facing::SouthWest,
        Facing::South,
        Facing::SouthEast,
    ];

    /// Maps a non-zero grid direction to its facing.
    pub fn from_delta(dx: i8, dy: i8) -> Option<Facing> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Facing::East),
            (1, -1) => Some(Facing::NorthEast),
            (0, -1) => Some(Facing::North),
            (-1, -1) => Some(Facing::NorthWest),
            (-1, 0) => Some(Facing::West),
            (-1, 1) => Some(Facing::SouthWest),
            (0, 1) => Some(Facing::South),
            (1, 1) => Some(Facing::SouthEast),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Reaction poses shown over the normal sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Joy,
    Sad,
}

impl Pose {
    /// Sprite text for the pose
    pub fn glyph(self) -> &'static str {
        match self {
            Pose::Joy => "\\(^o^)/",
            Pose::Sad => "(;_;)",
        }
    }
}

/// Sprite per facing, indexed by `Facing as usize`.
#[derive(Debug, Clone)]
pub struct OrientationTable {
    sprites: [&'static str; 8],
}

impl OrientationTable {
    pub fn new() -> Self {
        let mut sprites = [""; 8];
        for facing in Facing::ALL {
            sprites[facing.index()] = match facing {
                Facing::East => "(>'>)",
                Facing::NorthEast => "(^'>)",
                Facing::North => "(^'^)",
                Facing::NorthWest => "(<'^)",
                Facing::West => "(<'<)",
                Facing::SouthWest => "(<'v)",
                Facing::South => "(v'v)",
                Facing::SouthEast => "(v'>)",
            };
        }
        Self { sprites }
    }

    /// Sprite text for `facing`
    pub fn sprite(&self, facing: Facing) -> &'static str {
        self.sprites[facing.index()]
    }
}

impl Default for OrientationTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The player-controlled bird
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub facing: Facing,
    pub speed: f32,
    /// Reaction pose shown until the player next turns.
    pub pose: Option<Pose>,
    orientations: OrientationTable,
}

impl Player {
    /// Creates a player facing east, centred at `(cx, cy)`
    pub fn new(cx: f32, cy: f32) -> Self {
        Self {
            rect: Rect::from_center(cx, cy, PLAYER_WIDTH, PLAYER_HEIGHT),
            facing: Facing::East,
            speed: PLAYER_SPEED,
            pose: None,
            orientations: OrientationTable::new(),
        }
    }

    /// Moves by the summed key directions. A move that would leave the field
    /// on either axis is undone entirely. Returns whether the player moved.
    pub fn apply_input(&mut self, keys: MoveKeys, field: &Field) -> bool {
        let (dx, dy) = keys.net();
        let delta = Vector::new(dx as f32, dy as f32).scaled(self.speed);
        self.rect.translate(delta);
        let moved = if is_inside(&self.rect, field) {
            !delta.is_zero()
        } else {
            self.rect.translate(delta.scaled(-1.0));
            false
        };

        if let Some(facing) = Facing::from_delta(dx, dy) {
            self.facing = facing;
            self.pose = None;
        }
        moved
    }

    /// Shows `pose` until the next movement input
    pub fn change_pose(&mut self, pose: Pose) {
        self.pose = Some(pose);
    }

    pub fn sprite(&self) -> &'static str {
        match self.pose {
            Some(pose) => pose.glyph(),
            None => self.orientations.sprite(self.facing),
        }
    }
}
