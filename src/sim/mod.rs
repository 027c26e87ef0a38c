//! Deterministic table simulation
//!
//! All physics and rules live here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by ball index)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod response;
pub mod state;
pub mod table;
pub mod tick;
pub mod turn;

pub use body::{Body, NO_FORCE, Role};
pub use collision::{Contacts, PairContact, PocketCapture, WallContact, detect};
pub use response::{CaptureOutcome, hit_force, impact_strength, impulse};
pub use state::{SimEvent, Simulation, rack};
pub use table::{Pocket, Table, Wall};
pub use tick::{FrameInput, FrameReport, advance, frame, step};
pub use turn::{TurnPhase, all_objects_pocketed};
