//! Turn and round state, derived from the balls every frame

use serde::{Deserialize, Serialize};

use super::body::{Body, Role};

/// Whether the player may take a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Every ball at rest; drag input and reset are accepted
    AwaitingShot,
    /// At least one ball still rolling; input is ignored
    BallsInMotion,
}

impl TurnPhase {
    /// Recompute the phase from live ball state
    pub fn of(bodies: &[Body]) -> Self {
        if bodies.iter().any(|b| b.is_active() && b.is_moving()) {
            TurnPhase::BallsInMotion
        } else {
            TurnPhase::AwaitingShot
        }
    }

    #[inline]
    pub fn is_player_turn(self) -> bool {
        self == TurnPhase::AwaitingShot
    }
}

/// True once every object ball has been pocketed
pub fn all_objects_pocketed(bodies: &[Body]) -> bool {
    bodies
        .iter()
        .filter(|b| b.role() == Role::Object)
        .all(|b| !b.is_active())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn rack() -> Vec<Body> {
        vec![
            Body::new(Role::Cue, Vec2::new(200.0, 300.0), 0.5, 25.0),
            Body::new(Role::Object, Vec2::new(495.0, 300.0), 0.5, 25.0),
            Body::new(Role::Object, Vec2::new(545.0, 265.0), 0.5, 25.0),
        ]
    }

    #[test]
    fn test_turn_follows_motion() {
        let mut bodies = rack();
        assert_eq!(TurnPhase::of(&bodies), TurnPhase::AwaitingShot);
        bodies[2].vel = Vec2::new(0.0, 12.0);
        assert_eq!(TurnPhase::of(&bodies), TurnPhase::BallsInMotion);
        assert!(!TurnPhase::of(&bodies).is_player_turn());
        bodies[2].vel = Vec2::ZERO;
        assert!(TurnPhase::of(&bodies).is_player_turn());
    }

    #[test]
    fn test_round_over_ignores_cue() {
        let mut bodies = rack();
        assert!(!all_objects_pocketed(&bodies));
        bodies[1].deactivate();
        assert!(!all_objects_pocketed(&bodies));
        bodies[2].deactivate();
        assert!(all_objects_pocketed(&bodies));
        assert!(bodies[0].is_active());
    }
}
