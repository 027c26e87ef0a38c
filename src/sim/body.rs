//! Ball bodies and their integration step

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::vertex::colors;
use crate::settings::PhysicsTuning;

/// Explicit "no applied force" argument for [`Body::integrate`]
pub const NO_FORCE: Vec2 = Vec2::ZERO;

/// What a ball is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The player's ball: never eliminated, respotted on a scratch
    Cue,
    /// A ball to be pocketed
    Object,
}

/// A single disc on the table
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    mass: f32,
    radius: f32,
    role: Role,
    active: bool,
}

impl Body {
    /// Create an active ball at rest.
    ///
    /// # Panics
    ///
    /// Panics if `mass` or `radius` is not a finite positive number.
    pub fn new(role: Role, pos: Vec2, mass: f32, radius: f32) -> Self {
        assert!(
            mass > 0.0 && mass.is_finite(),
            "body mass must be finite and positive, got {mass}"
        );
        assert!(
            radius > 0.0 && radius.is_finite(),
            "body radius must be finite and positive, got {radius}"
        );
        let color = match role {
            Role::Cue => colors::CUE_BALL,
            Role::Object => colors::OBJECT_BALL,
        };
        Self {
            pos,
            vel: Vec2::ZERO,
            color,
            mass,
            radius,
            role,
            active: true,
        }
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn is_cue(&self) -> bool {
        self.role == Role::Cue
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True iff either velocity component is non-zero
    pub fn is_moving(&self) -> bool {
        self.vel.x != 0.0 || self.vel.y != 0.0
    }

    /// Remove a pocketed object ball from play until the table is reset
    pub(crate) fn deactivate(&mut self) {
        debug_assert!(!self.is_cue(), "the cue ball is never eliminated");
        self.active = false;
        self.vel = Vec2::ZERO;
        self.color = colors::TRANSPARENT;
    }

    /// Advance one fixed step under `force` plus velocity-proportional drag
    pub fn integrate(&mut self, force: Vec2, dt: f32, tuning: &PhysicsTuning) {
        let accel = force * self.inv_mass() + self.vel * tuning.friction;
        self.vel += accel * dt;

        // Drag decays geometrically and never reaches zero on its own
        if self.vel.x.abs() < tuning.velocity_threshold {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < tuning.velocity_threshold {
            self.vel.y = 0.0;
        }

        self.pos += self.vel * dt;
    }
}
