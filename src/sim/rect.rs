//! Render-space rectangles for hit boxes
//!
//! A hit box is an axis-aligned rectangle in render space:
//! - x: world units along the track (`[0, C)` for the entity anchor)
//! - y: vertical offset, negative is up, the ground is at 0
//!
//! Near the seam a rectangle can poke past 0 or past C. The part that
//! pokes out is mirrored to the opposite end of the track so that
//! collision tests are symmetric across the wrap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CIRCUMFERENCE, SEAM_BAND};

/// Axis-aligned rectangle (origin at top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HitRect {
    pub origin: Vec2,
    pub size: Vec2,
}

/// Band just below x = 0
pub const NEGATIVE_BAND: HitRect = HitRect {
    origin: Vec2::new(-SEAM_BAND, -SEAM_BAND),
    size: Vec2::new(SEAM_BAND, SEAM_BAND),
};

/// Band just above x = C
pub const POSITIVE_BAND: HitRect = HitRect {
    origin: Vec2::new(CIRCUMFERENCE, -SEAM_BAND),
    size: Vec2::new(SEAM_BAND, SEAM_BAND),
};

impl HitRect {
    /// A rectangle with no collidable surface
    pub const EMPTY: HitRect = HitRect {
        origin: Vec2::ZERO,
        size: Vec2::ZERO,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    /// True when the rectangle has no area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Strict overlap test; touching edges and empty rectangles never intersect
    pub fn intersects(&self, other: &HitRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Overlapping region of two rectangles, if any
    pub fn intersection(&self, other: &HitRect) -> Option<HitRect> {
        if !self.intersects(other) {
            return None;
        }
        let min = self.origin.max(other.origin);
        let max = Vec2::new(self.right(), self.bottom()).min(Vec2::new(other.right(), other.bottom()));
        Some(HitRect {
            origin: min,
            size: max - min,
        })
    }

    /// Mirror of the part of this rectangle that crosses the seam
    ///
    /// The slice inside the positive band is moved to start at x = 0; the
    /// slice inside the negative band is moved to end at x = C. Returns
    /// `None` when the rectangle touches neither band.
    pub fn seam_mirror(&self) -> Option<HitRect> {
        let mut mirror = None;

        if let Some(mut overlap) = self.intersection(&POSITIVE_BAND) {
            overlap.origin.x = 0.0;
            mirror = Some(overlap);
        }

        if let Some(mut overlap) = self.intersection(&NEGATIVE_BAND) {
            overlap.origin.x = CIRCUMFERENCE - overlap.size.x;
            mirror = Some(overlap);
        }

        mirror
    }

    /// Primary rectangle plus its seam mirror, if it has one
    pub fn with_mirror(self) -> WrappedRect {
        WrappedRect {
            primary: self,
            mirror: self.seam_mirror(),
        }
    }
}

/// A hit box together with its seam mirror
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WrappedRect {
    pub primary: HitRect,
    pub mirror: Option<HitRect>,
}

impl WrappedRect {
    /// No collidable surface at all
    pub const EMPTY: WrappedRect = WrappedRect {
        primary: HitRect::EMPTY,
        mirror: None,
    };

    /// Iterate the primary rectangle and the mirror
    pub fn parts(&self) -> impl Iterator<Item = &HitRect> {
        std::iter::once(&self.primary).chain(self.mirror.as_ref())
    }

    /// Number of part pairs that overlap, counting every primary/mirror combination
    pub fn overlap_count(&self, other: &WrappedRect) -> usize {
        self.parts()
            .map(|a| other.parts().filter(|b| a.intersects(b)).count())
            .sum()
    }

    /// True when any part of either side overlaps
    pub fn intersects(&self, other: &WrappedRect) -> bool {
        self.overlap_count(other) > 0
    }
}
