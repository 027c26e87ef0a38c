//! Impulse-based collision response
//!
//! Impulses act along the unnormalized center-to-contact vector `N`, so the
//! formula divides by `|N|²`. The cue hit is a one-step force computed from
//! the player's drag.

use glam::Vec2;

use super::body::Body;
use super::collision::{PairContact, WallContact, bodies_overlap};
use crate::consts::{IMPACT_SPEED_MAX, IMPACT_SPEED_MIN};
use crate::remap_clamped;
use crate::settings::PhysicsTuning;

/// Impulse magnitude between two bodies along `normal`
///
/// `rel_vel` is A's velocity minus B's. Pass `0.0` as `inv_mass_b` for an
/// immovable object.
#[inline]
pub fn impulse(rel_vel: Vec2, normal: Vec2, inv_mass_a: f32, inv_mass_b: f32, restitution: f32) -> f32 {
    -(1.0 + restitution) * rel_vel.dot(normal) / (normal.length_squared() * (inv_mass_a + inv_mass_b))
}

/// Audio gain for an impact at `rel_speed`, in `[0, 1]`
#[inline]
pub fn impact_strength(rel_speed: f32) -> f32 {
    remap_clamped(rel_speed, IMPACT_SPEED_MIN, IMPACT_SPEED_MAX, 0.0, 1.0)
}

/// Mutable references to two distinct bodies
fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    debug_assert!(a < b, "pair indices must be ascending");
    let (head, tail) = bodies.split_at_mut(b);
    (&mut head[a], &mut tail[0])
}

/// Resolve one ball-ball contact.
///
/// Returns the impact strength when an impulse was applied. Contacts are
/// re-checked against current state first: an earlier resolution in the
/// same step may have pocketed, respotted or separated one of the balls.
pub fn resolve_pair(bodies: &mut [Body], contact: PairContact, tuning: &PhysicsTuning) -> Option<f32> {
    let (a, b) = pair_mut(bodies, contact.a, contact.b);
    if !a.is_active() || !b.is_active() || !bodies_overlap(a, b) {
        return None;
    }

    let normal = b.pos - a.pos;
    let rel_vel = a.vel - b.vel;
    let rel_speed = rel_vel.length();

    // Nearly stationary overlapping pairs would otherwise stay stuck together
    if rel_speed <= tuning.resting_separation_speed {
        let dir = normal.try_normalize().unwrap_or(Vec2::X);
        a.pos -= dir * tuning.resting_separation_nudge;
        b.pos += dir * tuning.resting_separation_nudge;
    }

    let (Some(rel_dir), Some(normal_dir)) = (rel_vel.try_normalize(), normal.try_normalize()) else {
        return None;
    };
    // Already separating
    if rel_dir.dot(normal_dir) <= 0.0 {
        return None;
    }

    let j = impulse(rel_vel, normal, a.inv_mass(), b.inv_mass(), tuning.restitution);
    a.vel += normal * (j * a.inv_mass());
    b.vel -= normal * (j * b.inv_mass());

    log::trace!(
        "ball impact {}-{}: rel speed {:.1}, impulse {:.3}",
        contact.a,
        contact.b,
        rel_speed,
        j
    );
    Some(impact_strength(rel_speed))
}

/// Resolve one ball-cushion contact. Returns true when an impulse was applied.
///
/// The cushion is immovable, so only the ball's mass term remains. The ball
/// is always pushed back off the cushion afterwards.
pub fn resolve_wall(body: &mut Body, contact: &WallContact, tuning: &PhysicsTuning) -> bool {
    let normal = contact.normal(body.pos);
    let approaching = body.vel.dot(normal) < 0.0;
    if approaching {
        let j = impulse(body.vel, normal, body.inv_mass(), 0.0, tuning.restitution);
        body.vel += normal * (j * body.inv_mass());
    }
    body.pos += contact.wall.inward() * tuning.wall_nudge;
    approaching
}

/// What a pocket did to a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Cue ball stopped and put back on its spot
    Respotted,
    /// Object ball taken out of play
    Eliminated,
}

/// Drop a captured ball into its pocket
///
/// Returns `None` if the ball already left play earlier in the step.
pub fn resolve_capture(body: &mut Body, cue_spot: Vec2) -> Option<CaptureOutcome> {
    if !body.is_active() {
        return None;
    }
    if body.is_cue() {
        body.vel = Vec2::ZERO;
        body.pos = cue_spot;
        Some(CaptureOutcome::Respotted)
    } else {
        body.deactivate();
        Some(CaptureOutcome::Eliminated)
    }
}

/// Force applied to the cue ball when a drag from `drag_start` is released at `release`
///
/// Points opposite the drag, capped at the hit force limit.
pub fn hit_force(drag_start: Vec2, release: Vec2, tuning: &PhysicsTuning) -> Vec2 {
    ((release - drag_start) * -tuning.force_multiplier).clamp_length_max(tuning.hit_force_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TableLayout;
    use crate::sim::body::Role;
    use crate::sim::table::{Table, Wall};
    use proptest::prelude::*;

    fn ball(x: f32, y: f32, mass: f32) -> Body {
        Body::new(Role::Object, Vec2::new(x, y), mass, 25.0)
    }

    fn normal_speed(bodies: &[Body]) -> f32 {
        let n = (bodies[1].pos - bodies[0].pos).normalize();
        (bodies[0].vel - bodies[1].vel).dot(n)
    }

    #[test]
    fn test_head_on_equal_masses_keeps_half_relative_speed() {
        let tuning = PhysicsTuning::default();
        let mut bodies = vec![ball(100.0, 100.0, 1.0), ball(148.0, 100.0, 1.0)];
        bodies[0].vel = Vec2::new(400.0, 0.0);
        let before = normal_speed(&bodies);

        let strength = resolve_pair(&mut bodies, PairContact { a: 0, b: 1 }, &tuning);
        assert_eq!(strength, Some(0.25));

        let after = normal_speed(&bodies);
        assert!((after + 0.5 * before).abs() < 1e-3, "before {before}, after {after}");
        assert!((bodies[0].vel.x - 100.0).abs() < 1e-3);
        assert!((bodies[1].vel.x - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_momentum_conserved_with_unequal_masses() {
        let tuning = PhysicsTuning::default();
        let mut bodies = vec![ball(100.0, 100.0, 2.0), ball(140.0, 120.0, 0.5)];
        bodies[0].vel = Vec2::new(300.0, 50.0);
        bodies[1].vel = Vec2::new(-100.0, 0.0);
        let p_before = bodies[0].vel * 2.0 + bodies[1].vel * 0.5;

        assert!(resolve_pair(&mut bodies, PairContact { a: 0, b: 1 }, &tuning).is_some());

        let p_after = bodies[0].vel * 2.0 + bodies[1].vel * 0.5;
        assert!((p_after - p_before).length() < 1e-2);
    }

    #[test]
    fn test_separating_pair_is_left_alone() {
        let tuning = PhysicsTuning::default();
        let mut bodies = vec![ball(100.0, 100.0, 1.0), ball(140.0, 100.0, 1.0)];
        bodies[0].vel = Vec2::new(-50.0, 0.0);
        bodies[1].vel = Vec2::new(50.0, 0.0);
        assert_eq!(resolve_pair(&mut bodies, PairContact { a: 0, b: 1 }, &tuning), None);
        assert_eq!(bodies[0].vel, Vec2::new(-50.0, 0.0));
        assert_eq!(bodies[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_resting_overlap_is_pushed_apart() {
        let tuning = PhysicsTuning::default();
        let mut bodies = vec![ball(100.0, 100.0, 1.0), ball(140.0, 100.0, 1.0)];
        assert_eq!(resolve_pair(&mut bodies, PairContact { a: 0, b: 1 }, &tuning), None);
        assert_eq!(bodies[0].pos, Vec2::new(99.5, 100.0));
        assert_eq!(bodies[1].pos, Vec2::new(140.5, 100.0));
        assert!(!bodies[0].is_moving() && !bodies[1].is_moving());
    }

    #[test]
    fn test_concentric_balls_still_separate() {
        let tuning = PhysicsTuning::default();
        let mut bodies = vec![ball(100.0, 100.0, 1.0), ball(100.0, 100.0, 1.0)];
        assert_eq!(resolve_pair(&mut bodies, PairContact { a: 0, b: 1 }, &tuning), None);
        assert!(bodies[0].pos != bodies[1].pos);
    }

    #[test]
    fn test_stale_contact_is_skipped() {
        let tuning = PhysicsTuning::default();
        let mut bodies = vec![ball(100.0, 100.0, 1.0), ball(300.0, 100.0, 1.0)];
        bodies[0].vel = Vec2::new(100.0, 0.0);
        assert_eq!(resolve_pair(&mut bodies, PairContact { a: 0, b: 1 }, &tuning), None);
        assert_eq!(bodies[0].vel, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_wall_bounce_reverses_normal_component() {
        let tuning = PhysicsTuning::default();
        let table = Table::from_layout(&TableLayout::default());
        let mut body = ball(400.0, 55.0, 0.5);
        body.vel = Vec2::new(120.0, -200.0);
        let contact = WallContact {
            body: 0,
            wall: Wall::Top,
            point: table.clamp_to_wall(Wall::Top, body.pos),
        };

        assert!(resolve_wall(&mut body, &contact, &tuning));
        assert!((body.vel.y - 100.0).abs() < 1e-3);
        assert!((body.vel.x - 120.0).abs() < 1e-3);
        assert_eq!(body.pos, Vec2::new(400.0, 57.0));
    }

    #[test]
    fn test_wall_leaving_ball_only_nudged() {
        let tuning = PhysicsTuning::default();
        let mut body = ball(740.0, 300.0, 0.5);
        body.vel = Vec2::new(-80.0, 0.0);
        let contact = WallContact {
            body: 0,
            wall: Wall::Right,
            point: Vec2::new(765.0, 300.0),
        };
        assert!(!resolve_wall(&mut body, &contact, &tuning));
        assert_eq!(body.vel, Vec2::new(-80.0, 0.0));
        assert_eq!(body.pos, Vec2::new(738.0, 300.0));
    }

    #[test]
    fn test_ball_inside_cushion_band_is_reflected() {
        let tuning = PhysicsTuning::default();
        let mut body = ball(400.0, 570.0, 0.5);
        body.vel = Vec2::new(30.0, 200.0);
        let contact = WallContact {
            body: 0,
            wall: Wall::Bottom,
            point: body.pos,
        };

        assert!(resolve_wall(&mut body, &contact, &tuning));
        assert!((body.vel.y + 100.0).abs() < 1e-3);
        assert!((body.vel.x - 30.0).abs() < 1e-3);
        assert_eq!(body.pos, Vec2::new(400.0, 568.0));
    }

    #[test]
    fn test_capture_respots_cue() {
        let spot = Vec2::new(200.0, 300.0);
        let mut cue = Body::new(Role::Cue, Vec2::new(40.0, 40.0), 0.5, 25.0);
        cue.vel = Vec2::new(-90.0, -90.0);
        assert_eq!(resolve_capture(&mut cue, spot), Some(CaptureOutcome::Respotted));
        assert_eq!(cue.pos, spot);
        assert!(!cue.is_moving());
        assert!(cue.is_active());
    }

    #[test]
    fn test_capture_eliminates_object_once() {
        let spot = Vec2::new(200.0, 300.0);
        let mut body = ball(40.0, 40.0, 0.5);
        assert_eq!(resolve_capture(&mut body, spot), Some(CaptureOutcome::Eliminated));
        assert!(!body.is_active());
        assert_eq!(resolve_capture(&mut body, spot), None);
    }

    #[test]
    fn test_hit_force_opposes_drag() {
        let tuning = PhysicsTuning::default();
        let force = hit_force(Vec2::new(300.0, 300.0), Vec2::new(280.0, 300.0), &tuning);
        assert_eq!(force, Vec2::new(1500.0, 0.0));
    }

    #[test]
    fn test_hit_force_is_capped() {
        let tuning = PhysicsTuning::default();
        let force = hit_force(Vec2::ZERO, Vec2::new(-3000.0, 4000.0), &tuning);
        assert!((force.length() - tuning.hit_force_limit).abs() < 1.0);
        assert!(force.x > 0.0 && force.y < 0.0);
    }

    #[test]
    fn test_impact_strength_range() {
        assert_eq!(impact_strength(0.0), 0.0);
        assert_eq!(impact_strength(1000.0), 1.0);
        assert_eq!(impact_strength(4000.0), 1.0);
        assert!((impact_strength(600.0) - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_equal_mass_restitution(
            speed in 10.0f32..2000.0,
            gap in 1.0f32..49.0,
            angle in -1.2f32..1.2,
        ) {
            let tuning = PhysicsTuning::default();
            let offset = Vec2::from_angle(angle) * gap;
            let mut bodies = vec![ball(400.0, 300.0, 1.0), ball(400.0 + offset.x, 300.0 + offset.y, 1.0)];
            bodies[0].vel = Vec2::new(speed, 0.0);
            let before = normal_speed(&bodies);
            resolve_pair(&mut bodies, PairContact { a: 0, b: 1 }, &tuning);
            let after = normal_speed(&bodies);
            prop_assert!((after + 0.5 * before).abs() < before * 1e-3);
        }
    }
}
