//! Cursor hit testing against the last completed frame's projected card
//! quads.

use glam::Vec2;
use smallvec::SmallVec;

/// Projected screen corners for one module card.
#[derive(Clone, Debug)]
pub struct CardQuad {
    pub id: String,
    pub corners: [Vec2; 4],
}

/// Ephemeral frame output: module id → projected corners, in registration
/// order. Rebuilt on every completed frame; when a frame is skipped,
/// consumers keep the previous frame's bounds rather than fall back to
/// defaults.
#[derive(Clone, Debug, Default)]
pub struct CardBounds {
    quads: SmallVec<[CardQuad; 8]>,
}

impl CardBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: &str, corners: [Vec2; 4]) {
        self.quads.push(CardQuad {
            id: id.to_owned(),
            corners,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardQuad> {
        self.quads.iter()
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }
}

/// Which card, if any, contains the cursor. Empty bounds mean "no hit",
/// never an error; a click arriving before the first frame completes simply
/// misses.
pub fn hit_test(cursor: Vec2, bounds: &CardBounds) -> Option<&str> {
    bounds
        .quads
        .iter()
        .find(|q| point_in_quad(cursor, &q.corners))
        .map(|q| q.id.as_str())
}

/// Even-odd crossing-number test: a horizontal ray from `p` toggles parity
/// at each polygon edge it crosses.
#[inline]
pub fn point_in_quad(p: Vec2, corners: &[Vec2; 4]) -> bool {
    let mut inside = false;
    let mut j = corners.len() - 1;
    for i in 0..corners.len() {
        let a = corners[i];
        let b = corners[j];
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
