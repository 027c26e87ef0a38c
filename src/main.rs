//! Pocket Table headless demo
//!
//! Plays a seeded sequence of shots against the simulation until every object
//! ball is pocketed (or a frame budget runs out), then prints a JSON summary.
//!
//! Usage: `pocket-table [settings.json|-] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::Path;

    use anyhow::{Context, Result};
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use serde::Serialize;

    use pocket_table::audio::{AudioMixer, AudioSink, SoundCue};
    use pocket_table::renderer::draw_list;
    use pocket_table::sim::{FrameInput, SimEvent, Simulation, frame};
    use pocket_table::Settings;

    /// Give up after this many frames (about ten minutes at 60 fps)
    const MAX_FRAMES: u32 = 36_000;
    /// Frames spent pulling the cue back before release
    const DRAG_FRAMES: u32 = 3;

    /// Audio backend stand-in: counts what would have been played
    #[derive(Default)]
    struct CountingSink {
        cues: u32,
        loudest: f32,
    }

    impl AudioSink for CountingSink {
        fn play(&mut self, cue: SoundCue) {
            log::trace!("Play {:?} at {:.2}", cue.effect, cue.gain);
            self.cues += 1;
            self.loudest = self.loudest.max(cue.gain);
        }
    }

    #[derive(Debug, Default, Serialize)]
    pub struct Summary {
        seed: u64,
        frames: u32,
        substeps: u64,
        shots: u32,
        ball_collisions: u32,
        cushion_hits: u32,
        pocketed: u32,
        scratches: u32,
        sound_cues: u32,
        loudest_cue: f32,
        round_over: bool,
        balls_left: usize,
    }

    /// A planned shot: where the drag starts and where it is released
    struct Shot {
        start: Vec2,
        end: Vec2,
    }

    /// Aim the cue at a random remaining object ball with a little error
    fn plan_shot(sim: &Simulation, rng: &mut Pcg32) -> Option<Shot> {
        let targets: Vec<Vec2> = sim
            .object_balls()
            .filter(|b| b.is_active())
            .map(|b| b.pos)
            .collect();
        if targets.is_empty() {
            return None;
        }
        let target = targets[rng.random_range(0..targets.len())];
        let cue = sim.cue().pos;
        let aim = (target - cue).try_normalize().unwrap_or(Vec2::X);
        let aim = Vec2::from_angle(rng.random_range(-0.08f32..0.08)).rotate(aim);
        let pull: f32 = rng.random_range(80.0..400.0);
        Some(Shot {
            start: cue,
            end: cue - aim * pull,
        })
    }

    pub fn play(settings: &Settings, seed: u64) -> Summary {
        let mut sim = Simulation::new(settings);
        let mixer = AudioMixer::new(&settings.audio);
        let mut sink = CountingSink::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut summary = Summary {
            seed,
            ..Default::default()
        };

        let mut shot: Option<(Shot, u32)> = None;
        while summary.frames < MAX_FRAMES && !sim.is_game_over() {
            let dt: f32 = rng.random_range(0.010..0.030);
            let mut input = FrameInput {
                dt,
                ..Default::default()
            };

            if shot.is_none() && sim.is_player_turn() {
                shot = plan_shot(&sim, &mut rng).map(|s| (s, 0));
            }
            if let Some((planned, progress)) = shot.as_mut() {
                if *progress <= DRAG_FRAMES {
                    let t = *progress as f32 / DRAG_FRAMES as f32;
                    input.pointer = planned.start.lerp(planned.end, t);
                    input.pointer_down = true;
                    *progress += 1;
                } else {
                    input.pointer = planned.end;
                    shot = None;
                }
            }

            let report = frame(&mut sim, &input);
            summary.frames += 1;
            summary.substeps += u64::from(report.substeps);

            let events = sim.drain_events();
            mixer.dispatch(&events, &mut sink);
            for event in &events {
                match event {
                    SimEvent::Shot { force } => {
                        summary.shots += 1;
                        log::info!("Shot {} with force {:.0}", summary.shots, force.length());
                    }
                    SimEvent::BallCollision { .. } => summary.ball_collisions += 1,
                    SimEvent::WallHit { .. } => summary.cushion_hits += 1,
                    SimEvent::Pocketed { body, pocket } => {
                        summary.pocketed += 1;
                        log::info!("Ball {} pocketed in pocket {}", body, pocket);
                    }
                    SimEvent::Scratch { .. } => {
                        summary.scratches += 1;
                        log::info!("Scratch! Cue ball respotted");
                    }
                    SimEvent::RoundOver | SimEvent::TableReset => {}
                }
            }
        }

        summary.round_over = sim.is_game_over();
        summary.balls_left = draw_list(&sim).balls.len().saturating_sub(1);
        summary.sound_cues = sink.cues;
        summary.loudest_cue = sink.loudest;
        if !summary.round_over {
            log::warn!("Frame budget exhausted with {} balls left", summary.balls_left);
        }
        summary
    }

    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) if path != "-" => Settings::load(Path::new(&path))?,
            _ => Settings::default(),
        };
        let seed = match args.next() {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("invalid seed '{raw}'"))?,
            None => 12345,
        };

        log::info!("Pocket Table demo starting with seed {}", seed);
        let summary = play(&settings, seed);
        log::info!(
            "Finished after {} shots ({} frames, {} steps)",
            summary.shots,
            summary.frames,
            summary.substeps
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    demo::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on wasm
}
