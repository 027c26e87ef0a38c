//! Pocket Table - rigid-body core of a top-down billiards table
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (bodies, collisions, turn/round state)
//! - `settings`: Data-driven physics and table tuning
//! - `audio`: Maps collision events to sound effect playback requests
//! - `renderer`: Draw-list generation for an external rasterizer

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{AudioSettings, PhysicsTuning, Settings, TableLayout};
pub use sim::{FrameInput, Simulation, TurnPhase};

/// Table configuration defaults
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 15;
    /// Frame deltas above this are clamped (e.g. after a stall)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Table dimensions
    pub const TABLE_WIDTH: f32 = 800.0;
    pub const TABLE_HEIGHT: f32 = 600.0;
    pub const WALL_THICKNESS: f32 = 35.0;
    pub const POCKET_RADIUS: f32 = 35.0;

    /// Ball defaults
    pub const BALL_MASS: f32 = 0.5;
    pub const BALL_RADIUS: f32 = 25.0;
    pub const CUE_START_X: f32 = 200.0;

    /// Velocity-proportional drag (must be negative)
    pub const FRICTION: f32 = -0.75;
    /// Velocity components below this (units/s) snap to zero
    pub const VELOCITY_THRESHOLD: f32 = 5.0;
    /// Coefficient of restitution for ball-ball and ball-wall impacts
    pub const ELASTICITY: f32 = 0.5;

    /// Hit force per pixel of drag
    pub const FORCE_MULTIPLIER: f32 = 75.0;
    /// Upper bound on hit force magnitude
    pub const HITFORCE_LIMIT: f32 = 30000.0;

    /// Overlapping pairs slower than this get pushed apart
    pub const RESTING_SEPARATION_SPEED: f32 = 0.1;
    pub const RESTING_SEPARATION_NUDGE: f32 = 0.5;
    /// Push-out distance after a wall impact
    pub const WALL_NUDGE: f32 = 2.0;

    /// Relative speeds mapped onto [0, 1] impact strength
    pub const IMPACT_SPEED_MIN: f32 = 200.0;
    pub const IMPACT_SPEED_MAX: f32 = 1000.0;

    /// Drag guide line width (pixels)
    pub const GUIDE_THICKNESS: f32 = 3.0;
}

/// Linearly remap `value` from `[in_min, in_max]` to `[out_min, out_max]`, clamped to the output range
#[inline]
pub fn remap_clamped(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let t = (value - in_min) / (in_max - in_min);
    let mapped = out_min + t * (out_max - out_min);
    mapped.clamp(out_min.min(out_max), out_min.max(out_max))
}
