//! Fixed timestep stepping and per-frame input handling
//!
//! Each frame: read input (gated by the turn phase), bank the frame time,
//! then run as many fixed steps as the bank covers. Every step is a full
//! detect -> resolve -> integrate pass over the table.

use glam::Vec2;

use super::body::NO_FORCE;
use super::collision::detect;
use super::response::{CaptureOutcome, hit_force, resolve_capture, resolve_pair, resolve_wall};
use super::state::{SimEvent, Simulation};
use super::turn::{TurnPhase, all_objects_pocketed};

/// Input sampled by the host for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Wall-clock time since the previous frame (seconds)
    pub dt: f32,
    /// Pointer position in table coordinates
    pub pointer: Vec2,
    /// Primary button held
    pub pointer_down: bool,
    /// Reset requested this frame (edge-triggered)
    pub reset: bool,
}

/// What a frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Fixed steps run this frame
    pub substeps: u32,
    /// Turn phase after stepping
    pub turn: TurnPhase,
    pub game_over: bool,
}

impl FrameReport {
    pub fn is_player_turn(&self) -> bool {
        self.turn.is_player_turn()
    }
}

/// Run one frame: input, then as many fixed steps as are owed
pub fn frame(sim: &mut Simulation, input: &FrameInput) -> FrameReport {
    let turn = sim.turn_phase();
    handle_input(sim, input, turn);
    let substeps = advance(sim, input.dt);
    FrameReport {
        substeps,
        turn: sim.turn_phase(),
        game_over: sim.game_over,
    }
}

/// Apply reset and drag input. Ignored while balls are rolling.
fn handle_input(sim: &mut Simulation, input: &FrameInput, turn: TurnPhase) {
    if input.reset && turn.is_player_turn() {
        sim.reset();
    }

    if sim.game_over {
        sim.drag_start = None;
        return;
    }

    sim.pointer = input.pointer;
    if input.pointer_down {
        if turn.is_player_turn() && sim.drag_start.is_none() {
            sim.drag_start = Some(input.pointer);
        }
    } else if let Some(start) = sim.drag_start.take() {
        let force = hit_force(start, input.pointer, &sim.tuning);
        if force != Vec2::ZERO {
            log::debug!("Shot released with force {:?}", force);
            sim.pending_hit = Some(force);
            sim.events.push(SimEvent::Shot { force });
        }
    }
}

/// Bank `dt` and run the fixed steps it pays for
///
/// Returns the number of steps run. Stalls are bounded twice over: `dt` is
/// clamped and the step count is capped, with any remaining debt dropped.
pub fn advance(sim: &mut Simulation, dt: f32) -> u32 {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, sim.tuning.max_frame_dt)
    } else {
        0.0
    };
    sim.accumulator += dt;

    let step_dt = sim.tuning.fixed_dt;
    let mut substeps = 0;
    while sim.accumulator >= step_dt && substeps < sim.tuning.max_substeps {
        step(sim);
        sim.accumulator -= step_dt;
        substeps += 1;
    }

    if sim.accumulator >= step_dt {
        log::debug!(
            "Substep cap hit, dropping {:.4}s of simulation time",
            sim.accumulator
        );
        sim.accumulator %= step_dt;
    }
    substeps
}

/// Advance the table by exactly one fixed step
pub fn step(sim: &mut Simulation) {
    let contacts = detect(&sim.bodies, &sim.table);

    for contact in &contacts.walls {
        if resolve_wall(&mut sim.bodies[contact.body], contact, &sim.tuning) {
            sim.events.push(SimEvent::WallHit {
                body: contact.body,
                wall: contact.wall,
            });
        }
    }

    let cue_spot = sim.layout.cue_start();
    for capture in &contacts.captures {
        match resolve_capture(&mut sim.bodies[capture.body], cue_spot) {
            Some(CaptureOutcome::Respotted) => {
                log::debug!("Scratch in pocket {}", capture.pocket);
                sim.events.push(SimEvent::Scratch {
                    pocket: capture.pocket,
                });
            }
            Some(CaptureOutcome::Eliminated) => {
                log::debug!("Ball {} pocketed in {}", capture.body, capture.pocket);
                sim.events.push(SimEvent::Pocketed {
                    body: capture.body,
                    pocket: capture.pocket,
                });
                if !sim.game_over && all_objects_pocketed(&sim.bodies) {
                    sim.game_over = true;
                    sim.events.push(SimEvent::RoundOver);
                    log::info!("All object balls pocketed, round over");
                }
            }
            None => {}
        }
    }

    for pair in &contacts.pairs {
        if let Some(strength) = resolve_pair(&mut sim.bodies, *pair, &sim.tuning) {
            sim.events.push(SimEvent::BallCollision {
                a: pair.a,
                b: pair.b,
                strength,
            });
        }
    }

    // The shot force acts for this one step only
    let hit = sim.pending_hit.take().unwrap_or(NO_FORCE);
    let dt = sim.tuning.fixed_dt;
    for (idx, body) in sim.bodies.iter_mut().enumerate() {
        if !body.is_active() {
            continue;
        }
        let force = if idx == sim.cue { hit } else { NO_FORCE };
        body.integrate(force, dt, &sim.tuning);
    }

    sim.time_ticks += 1;
}
