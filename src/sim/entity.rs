//! Shared entity vocabulary
//!
//! Everything that walks the track (the player, enemies and spell
//! projectiles) is a [`Body`] plus a small state machine built from the
//! enums below.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::HitRect;
use crate::consts::GRAVITY_STEP;
use crate::{normalize, pixels_to_units};

/// Facing / travel direction along the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Closed set of actions shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Idle,
    Walk,
    Attack,
    Roll,
    Jump,
    Block,
    DamagedFront,
    DamagedBack,
    Victory,
    Dying,
}

impl Action {
    pub fn is_damaged(self) -> bool {
        matches!(self, Action::DamagedFront | Action::DamagedBack)
    }
}

/// Discrete speed tier while airborne or rolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Speed {
    #[default]
    Still,
    Slow,
    Fast,
}

/// Colour tag deciding which attack direction hurts an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Colour {
    #[default]
    None,
    Red,
    Blue,
}

/// Intended visual feedback for the renderer
///
/// The simulation only decides *what* should be shown; compositing the
/// effect onto sprites is left to whoever draws the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlashCode {
    #[default]
    None,
    /// Spawn fade-in, alpha climbs from 0 towards opaque
    FadeIn { alpha: u8 },
    /// Took damage
    Hit,
    /// Attack bounced off the enemy's colour
    Deflected(Colour),
    /// Death fade-out; the entity is gone once `remaining` reaches 0
    Fading { remaining: u16 },
}

/// Hit-box dimensions relative to the sprite's top-left corner (right-facing)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxSpec {
    pub const fn new(width: f32, height: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::new(offset_x, offset_y),
        }
    }

    /// A box that could never collide with anything
    pub fn is_degenerate(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

/// Position, vertical arc and movement parameters of one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Track position in world units, always in `[0, C)`
    pub x: f32,
    /// Vertical offset, 0 on the ground, negative while airborne
    pub y: f32,
    pub gravity_accel: f32,
    /// Pixels moved per step
    pub speed: f32,
    /// Sprite width/height in pixels
    pub sprite: Vec2,
}

impl Body {
    pub fn new(x: f32, sprite: Vec2, speed: f32) -> Self {
        Self {
            x: normalize(x),
            y: 0.0,
            gravity_accel: 0.0,
            speed,
            sprite,
        }
    }

    /// Move one step at the current speed
    #[inline]
    pub fn step(&mut self, direction: Direction) {
        self.move_pixels(direction, self.speed);
    }

    /// Move an arbitrary pixel distance, wrapping across the seam
    pub fn move_pixels(&mut self, direction: Direction, pixels: f32) {
        self.x = normalize(self.x + direction.sign() * pixels_to_units(pixels));
    }

    /// Pull an airborne body down; grounded bodies are pinned to 0
    pub fn gravity(&mut self) {
        if self.y >= 0.0 {
            self.gravity_accel = 0.0;
            self.y = 0.0;
            return;
        }
        self.gravity_accel += GRAVITY_STEP;
        self.y += self.gravity_accel;
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.y >= 0.0
    }

    /// Place a box in render space; left-facing mirrors the horizontal offset
    pub fn place(&self, facing: Direction, spec: &BoxSpec) -> HitRect {
        let sprite_left = self.x - self.sprite.x / 2.0;
        let left = match facing {
            Direction::Right => sprite_left + spec.offset.x,
            Direction::Left => sprite_left + (self.sprite.x - spec.size.x - spec.offset.x),
        };
        let top = self.y - self.sprite.y + spec.offset.y;
        HitRect::new(left, top, spec.size.x, spec.size.y)
    }
}
