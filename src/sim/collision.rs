//! Collision detection for discs against each other, cushions and pockets
//!
//! Detection runs once per fixed step over the positions at the start of the
//! step. Everything here is read-only; see `response` for what happens next.

use glam::Vec2;

use super::body::Body;
use super::table::{Table, Wall};

/// Two overlapping balls, `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairContact {
    pub a: usize,
    pub b: usize,
}

/// A ball touching a cushion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    pub body: usize,
    pub wall: Wall,
    /// Closest point on the cushion to the ball center
    pub point: Vec2,
}

/// A ball close enough to a pocket to drop in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PocketCapture {
    pub body: usize,
    pub pocket: usize,
}

/// Everything detected for one step
#[derive(Debug, Clone, Default)]
pub struct Contacts {
    pub walls: Vec<WallContact>,
    pub captures: Vec<PocketCapture>,
    pub pairs: Vec<PairContact>,
}

impl WallContact {
    /// Push direction of the cushion on a ball centered at `center`
    pub fn normal(&self, center: Vec2) -> Vec2 {
        wall_normal(self.wall, center, self.point)
    }
}

/// Overlap test on squared distance (touching counts)
#[inline]
pub fn bodies_overlap(a: &Body, b: &Body) -> bool {
    let reach = a.radius() + b.radius();
    a.pos.distance_squared(b.pos) <= reach * reach
}

/// Direction from the closest cushion point to the ball center, not normalized
///
/// Once the center has crossed the cushion face that vector is zero (or points
/// out of the table), so the cushion's inward axis is used instead.
pub fn wall_normal(wall: Wall, center: Vec2, point: Vec2) -> Vec2 {
    let normal = center - point;
    if normal == Vec2::ZERO || normal.dot(wall.inward()) < 0.0 {
        wall.inward()
    } else {
        normal
    }
}

/// The cushion the ball is driving into, if any
///
/// Only one cushion is reported per ball so a ball wedged in a corner is not
/// corrected twice in the same step. The first touching cushion in detection
/// order that the ball is moving toward wins; when it is moving toward none
/// of them the first touching one is reported so it still gets pushed off.
pub fn detect_wall(body: &Body, table: &Table) -> Option<(Wall, Vec2)> {
    let mut touching = Wall::DETECTION_ORDER.into_iter().filter_map(|wall| {
        let point = table.clamp_to_wall(wall, body.pos);
        (body.pos.distance(point) <= body.radius()).then_some((wall, point))
    });
    let approaching =
        |&(wall, point): &(Wall, Vec2)| body.vel.dot(wall_normal(wall, body.pos, point)) < 0.0;

    let first = touching.next()?;
    if approaching(&first) {
        return Some(first);
    }
    Some(touching.find(approaching).unwrap_or(first))
}

/// Index of the first pocket that captures the ball, if any
pub fn detect_pocket(body: &Body, table: &Table) -> Option<usize> {
    table.pockets.iter().position(|pocket| {
        let reach = pocket.capture_distance(body.radius());
        body.pos.distance_squared(pocket.pos) <= reach * reach
    })
}

/// All overlapping active pairs in ascending `(a, b)` order
pub fn detect_pairs(bodies: &[Body]) -> Vec<PairContact> {
    let mut pairs = Vec::new();
    for (a, first) in bodies.iter().enumerate() {
        if !first.is_active() {
            continue;
        }
        for (b, second) in bodies.iter().enumerate().skip(a + 1) {
            if second.is_active() && bodies_overlap(first, second) {
                pairs.push(PairContact { a, b });
            }
        }
    }
    pairs
}

/// Run every detector over the active balls
pub fn detect(bodies: &[Body], table: &Table) -> Contacts {
    let mut contacts = Contacts::default();
    for (idx, body) in bodies.iter().enumerate() {
        if !body.is_active() {
            continue;
        }
        if let Some((wall, point)) = detect_wall(body, table) {
            contacts.walls.push(WallContact {
                body: idx,
                wall,
                point,
            });
        }
        if let Some(pocket) = detect_pocket(body, table) {
            contacts.captures.push(PocketCapture { body: idx, pocket });
        }
    }
    contacts.pairs = detect_pairs(bodies);
    contacts
}
