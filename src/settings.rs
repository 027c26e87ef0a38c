//! Table, physics and audio tuning
//!
//! Defaults reproduce the classic 800x600 four-pocket table. Settings can be
//! overridden from a JSON file; any field left out keeps its default.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Integrator, impulse and stepping constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Fixed simulation timestep (seconds)
    pub fixed_dt: f32,
    /// Velocity-proportional drag coefficient (strictly negative)
    pub friction: f32,
    /// Velocity components below this magnitude snap to zero
    pub velocity_threshold: f32,
    /// Coefficient of restitution (0 = inelastic, 1 = elastic)
    pub restitution: f32,
    /// Hit force per unit of drag distance
    pub force_multiplier: f32,
    /// Maximum hit force magnitude
    pub hit_force_limit: f32,
    /// Relative speed below which overlapping balls are pushed apart
    pub resting_separation_speed: f32,
    /// Distance each ball moves when pushed apart
    pub resting_separation_nudge: f32,
    /// Push-out distance after a wall impact
    pub wall_nudge: f32,
    /// Largest frame delta accepted before clamping
    pub max_frame_dt: f32,
    /// Maximum fixed steps run in one frame
    pub max_substeps: u32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            fixed_dt: SIM_DT,
            friction: FRICTION,
            velocity_threshold: VELOCITY_THRESHOLD,
            restitution: ELASTICITY,
            force_multiplier: FORCE_MULTIPLIER,
            hit_force_limit: HITFORCE_LIMIT,
            resting_separation_speed: RESTING_SEPARATION_SPEED,
            resting_separation_nudge: RESTING_SEPARATION_NUDGE,
            wall_nudge: WALL_NUDGE,
            max_frame_dt: MAX_FRAME_DT,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl PhysicsTuning {
    /// Largest distance a ball of `mass` can cover in one step right after a full-strength hit
    pub fn max_step_displacement(&self, mass: f32) -> f32 {
        let top_speed = self.hit_force_limit / mass * self.fixed_dt;
        top_speed * self.fixed_dt
    }
}

/// Table geometry and ball layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    pub width: f32,
    pub height: f32,
    /// Cushion thickness on every side
    pub wall_thickness: f32,
    /// Corner pockets present
    pub pockets: bool,
    pub pocket_radius: f32,
    pub ball_mass: f32,
    pub ball_radius: f32,
    /// Cue start x; the cue always starts on the horizontal center line
    pub cue_start_x: f32,
    /// Object ball positions relative to the cue start
    pub rack_offsets: Vec<Vec2>,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            width: TABLE_WIDTH,
            height: TABLE_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            pockets: true,
            pocket_radius: POCKET_RADIUS,
            ball_mass: BALL_MASS,
            ball_radius: BALL_RADIUS,
            cue_start_x: CUE_START_X,
            rack_offsets: vec![
                Vec2::new(295.0, 0.0),
                Vec2::new(345.0, -35.0),
                Vec2::new(395.0, 0.0),
                Vec2::new(345.0, 35.0),
            ],
        }
    }
}

impl TableLayout {
    pub fn cue_start(&self) -> Vec2 {
        Vec2::new(self.cue_start_x, self.height / 2.0)
    }

    /// Absolute object ball positions, in rack order
    pub fn rack_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        let origin = self.cue_start();
        self.rack_offsets.iter().map(move |offset| origin + *offset)
    }

    /// Whether a ball centered at `pos` sits fully inside the cushions
    fn fits(&self, pos: Vec2) -> bool {
        let lo = self.wall_thickness + self.ball_radius;
        pos.x >= lo
            && pos.x <= self.width - lo
            && pos.y >= lo
            && pos.y <= self.height - lo
    }
}

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsTuning,
    pub table: TableLayout,
    pub audio: AudioSettings,
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings = Self::from_json(&raw)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("failed to parse settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        ensure!(p.fixed_dt > 0.0, "physics.fixed_dt must be positive");
        ensure!(p.friction < 0.0, "physics.friction must be negative");
        ensure!(p.velocity_threshold >= 0.0, "physics.velocity_threshold must be non-negative");
        ensure!(
            (0.0..=1.0).contains(&p.restitution),
            "physics.restitution must lie in [0, 1]"
        );
        ensure!(p.force_multiplier > 0.0, "physics.force_multiplier must be positive");
        ensure!(p.hit_force_limit > 0.0, "physics.hit_force_limit must be positive");
        ensure!(p.max_substeps >= 1, "physics.max_substeps must be at least 1");
        ensure!(
            p.max_frame_dt >= p.fixed_dt,
            "physics.max_frame_dt must not be shorter than fixed_dt"
        );

        let t = &self.table;
        ensure!(t.width > 0.0 && t.height > 0.0, "table dimensions must be positive");
        ensure!(t.wall_thickness >= 0.0, "table.wall_thickness must be non-negative");
        ensure!(
            t.ball_mass > 0.0 && t.ball_mass.is_finite(),
            "table.ball_mass must be positive"
        );
        ensure!(
            t.ball_radius > 0.0 && t.ball_radius.is_finite(),
            "table.ball_radius must be positive"
        );
        if t.pockets {
            ensure!(t.pocket_radius > 0.0, "table.pocket_radius must be positive");
        }
        if !t.fits(t.cue_start()) {
            bail!("cue start {:?} does not fit inside the cushions", t.cue_start());
        }
        for (i, pos) in t.rack_positions().enumerate() {
            if !t.fits(pos) {
                bail!("rack ball {} at {:?} does not fit inside the cushions", i, pos);
            }
        }

        let reach = p.max_step_displacement(t.ball_mass);
        if reach >= t.ball_radius {
            log::warn!(
                "Full-strength hit moves {:.1} units per step (ball radius {:.1}); balls may tunnel",
                reach,
                t.ball_radius
            );
        }
        Ok(())
    }
}
