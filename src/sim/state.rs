//! Session state and the events it emits
//!
//! A `Simulation` owns every ball on the table. Nothing outside the `sim`
//! module mutates balls directly; collaborators feed `FrameInput` in and read
//! positions, flags and events back out.

use glam::Vec2;
use serde::Serialize;

use super::body::{Body, Role};
use super::table::{Table, Wall};
use super::turn::TurnPhase;
use crate::settings::{PhysicsTuning, Settings, TableLayout};

/// Something that happened during a frame, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SimEvent {
    /// The player released a drag; `force` goes to the cue on the next step
    Shot { force: Vec2 },
    /// Two balls collided and an impulse was applied
    BallCollision { a: usize, b: usize, strength: f32 },
    /// A ball bounced off a cushion
    WallHit { body: usize, wall: Wall },
    /// An object ball dropped into a pocket
    Pocketed { body: usize, pocket: usize },
    /// The cue ball dropped into a pocket and was respotted
    Scratch { pocket: usize },
    /// The last object ball was pocketed
    RoundOver,
    /// The rack was rebuilt
    TableReset,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Balls in rack order (cue first)
    pub(crate) bodies: Vec<Body>,
    pub(crate) cue: usize,
    pub(crate) table: Table,
    pub(crate) layout: TableLayout,
    pub(crate) tuning: PhysicsTuning,
    /// Unconsumed simulation time (seconds)
    pub(crate) accumulator: f32,
    pub(crate) game_over: bool,
    /// Cue force waiting for the next fixed step
    pub(crate) pending_hit: Option<Vec2>,
    /// Pointer position where the current drag began
    pub(crate) drag_start: Option<Vec2>,
    /// Last pointer position seen
    pub(crate) pointer: Vec2,
    pub(crate) events: Vec<SimEvent>,
    /// Fixed steps run since the session started
    pub(crate) time_ticks: u64,
}

impl Simulation {
    /// Create a session with the table racked
    ///
    /// Settings are assumed valid; see [`Settings::validate`].
    pub fn new(settings: &Settings) -> Self {
        let (bodies, cue) = rack(&settings.table);
        log::info!(
            "Table {}x{} racked with {} object balls",
            settings.table.width,
            settings.table.height,
            bodies.len() - 1
        );
        Self {
            bodies,
            cue,
            table: Table::from_layout(&settings.table),
            layout: settings.table.clone(),
            tuning: settings.physics.clone(),
            accumulator: 0.0,
            game_over: false,
            pending_hit: None,
            drag_start: None,
            pointer: Vec2::ZERO,
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Rebuild the rack and clear the round-over flag
    pub fn reset(&mut self) {
        let (bodies, cue) = rack(&self.layout);
        self.bodies = bodies;
        self.cue = cue;
        self.game_over = false;
        self.pending_hit = None;
        self.drag_start = None;
        self.events.push(SimEvent::TableReset);
        log::info!("Table reset");
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn cue(&self) -> &Body {
        &self.bodies[self.cue]
    }

    pub fn object_balls(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| !b.is_cue())
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn tuning(&self) -> &PhysicsTuning {
        &self.tuning
    }

    pub fn cue_start(&self) -> Vec2 {
        self.layout.cue_start()
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn turn_phase(&self) -> TurnPhase {
        TurnPhase::of(&self.bodies)
    }

    pub fn is_player_turn(&self) -> bool {
        self.turn_phase().is_player_turn()
    }

    pub fn pending_hit(&self) -> Option<Vec2> {
        self.pending_hit
    }

    /// Drag guide from where the drag began to the current pointer
    pub fn drag_guide(&self) -> Option<(Vec2, Vec2)> {
        self.drag_start.map(|start| (start, self.pointer))
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Build the starting balls; returns them with the cue's index
pub fn rack(layout: &TableLayout) -> (Vec<Body>, usize) {
    let mut bodies = Vec::with_capacity(layout.rack_offsets.len() + 1);
    bodies.push(Body::new(
        Role::Cue,
        layout.cue_start(),
        layout.ball_mass,
        layout.ball_radius,
    ));
    bodies.extend(
        layout
            .rack_positions()
            .map(|pos| Body::new(Role::Object, pos, layout.ball_mass, layout.ball_radius)),
    );
    (bodies, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_racked() {
        let sim = Simulation::new(&Settings::default());
        assert_eq!(sim.bodies().len(), 5);
        assert_eq!(sim.bodies().iter().filter(|b| b.is_cue()).count(), 1);
        assert_eq!(sim.cue().pos, Vec2::new(200.0, 300.0));
        assert_eq!(sim.object_balls().count(), 4);
        assert!(sim.object_balls().all(|b| b.is_active()));
        assert!(sim.is_player_turn());
        assert!(!sim.is_game_over());
        assert_eq!(sim.drag_guide(), None);
    }

    #[test]
    fn test_reset_restores_rack() {
        let mut sim = Simulation::new(&Settings::default());
        sim.bodies[1].deactivate();
        sim.bodies[2].pos = Vec2::new(100.0, 100.0);
        sim.bodies[0].vel = Vec2::new(40.0, 0.0);
        sim.game_over = true;

        sim.reset();

        let fresh = Simulation::new(&Settings::default());
        for (a, b) in sim.bodies().iter().zip(fresh.bodies()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.vel, Vec2::ZERO);
            assert!(a.is_active());
            assert_eq!(a.color, b.color);
        }
        assert!(!sim.is_game_over());
        assert_eq!(sim.drain_events(), vec![SimEvent::TableReset]);
        assert!(sim.events().is_empty());
    }

    #[test]
    fn test_rack_respects_layout() {
        let layout = TableLayout {
            ball_mass: 1.0,
            ball_radius: 30.0,
            ..Default::default()
        };
        let (bodies, cue) = rack(&layout);
        assert_eq!(cue, 0);
        assert!(bodies.iter().all(|b| b.mass() == 1.0 && b.radius() == 30.0));
        assert_eq!(bodies[1].pos, Vec2::new(495.0, 300.0));
    }
}
