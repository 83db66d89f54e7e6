/// Orbital placement: closed-form angles from the simulated date.
///
/// Planet revolution is computed from the absolute date, never accumulated,
/// so a date jump (pause resume, deep-future override) lands every planet
/// at its geometrically correct position. Moons are the exception: their
/// parent-relative angle is incremental and only advances while unpaused.

use std::f64::consts::TAU;

use glam::Vec3;

use crate::api::types::BodyId;
use crate::core::body::BodyKind;
use crate::core::context::SimContext;

/// Fixed visual spin rate, radians per real second.
const SPIN_RATE: f32 = 0.5;
/// Incremental moon revolution gain.
const MOON_GAIN: f64 = 3.0;

/// Fallback when a body's period metadata is missing or zero.
pub fn period_or_default(period_days: f64) -> f64 {
    if period_days.is_finite() && period_days != 0.0 {
        period_days
    } else {
        365.0
    }
}

/// Date-derived revolution angle for an ordinary body.
pub fn revolution_angle(days_since_epoch: f64, period_days: f64, start_angle: f32) -> f32 {
    let period = period_or_default(period_days);
    // Wrap in f64 before narrowing; after billions of simulated days the
    // unwrapped angle has no f32 precision left.
    let turns = (days_since_epoch / period).rem_euclid(1.0);
    (turns * TAU + start_angle as f64).rem_euclid(TAU) as f32
}

/// The home body's exact-year convention: angle from day-of-year alone.
pub fn home_angle(day_of_year: f64) -> f32 {
    ((day_of_year / 365.25) * TAU).rem_euclid(TAU) as f32
}

/// Place every body for the current simulated date and advance the
/// incremental pieces (moons, belts, spin).
///
/// `unscaled_delta` is real seconds this frame; `scaled_delta` is the
/// fractional simulated days the clock just advanced.
pub fn apply_to_all(ctx: &mut SimContext, unscaled_delta: f32, scaled_delta: f64) {
    let date = ctx.clock.days();
    let day_of_year = ctx.clock.day_of_year();
    let paused = ctx.clock.is_paused();
    let time_scale = ctx.clock.time_scale();

    // Planets, dwarfs, and ephemeral visitors: date-derived positions.
    let mut moons: Vec<(BodyId, BodyId)> = Vec::new();
    for body in ctx.registry.iter_mut() {
        match body.kind {
            BodyKind::Star | BodyKind::Remnant => {
                // Pinned to the system origin.
                body.visual.world_pos = Vec3::ZERO;
            }
            BodyKind::Planet | BodyKind::Dwarf | BodyKind::Ephemeral => {
                let angle = if body.home {
                    home_angle(day_of_year)
                } else {
                    revolution_angle(date, body.orbital_period_days, body.start_angle)
                };
                let d = body.orbital_distance;
                body.visual.world_pos = Vec3::new(angle.cos() * d, 0.0, angle.sin() * d);
            }
            BodyKind::Moon => {
                if let Some(parent) = body.parent {
                    moons.push((body.id, parent));
                }
            }
        }
        // Fixed visual spin, independent of the body's real rotation period.
        let dir = if body.retrograde { -1.0 } else { 1.0 };
        body.spin_angle += unscaled_delta * SPIN_RATE * dir;
    }

    // Moons after their parents, so they orbit this frame's parent position.
    for (moon_id, parent_id) in moons {
        let parent_pos = match ctx.registry.get(parent_id) {
            Some(p) => p.visual.world_pos,
            None => continue,
        };
        if let Some(moon) = ctx.registry.get_mut(moon_id) {
            if !paused {
                moon.local_orbit_angle +=
                    (moon.orbital_speed as f64 * time_scale * scaled_delta * MOON_GAIN) as f32;
            }
            let d = moon.orbital_distance;
            moon.visual.world_pos = parent_pos
                + Vec3::new(
                    moon.local_orbit_angle.cos() * d,
                    0.0,
                    moon.local_orbit_angle.sin() * d,
                );
        }
    }

    // Belts rotate as rigid groups at their own small rates.
    for belt in &mut ctx.belts {
        belt.angle += belt.rate * scaled_delta as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SimConfig;
    use crate::core::body::CelestialBody;
    use crate::core::clock::{OrbitalClock, TimeMode};
    use crate::core::registry::BodyRegistry;

    fn ctx_with(bodies: Vec<CelestialBody>, days: f64) -> SimContext {
        let mut reg = BodyRegistry::new();
        for b in bodies {
            reg.register(b);
        }
        SimContext::new(SimConfig::default(), reg, OrbitalClock::new(days))
    }

    #[test]
    fn zero_period_defaults_to_a_year() {
        assert_eq!(period_or_default(0.0), 365.0);
        assert_eq!(period_or_default(f64::NAN), 365.0);
        assert_eq!(period_or_default(687.0), 687.0);
    }

    #[test]
    fn revolution_is_date_driven_not_accumulated() {
        // Same absolute date gives the same angle no matter how the clock
        // got there.
        let mut clock = OrbitalClock::new(400.0);
        clock.advance(350.0);
        clock.advance(250.0);
        let stepped = revolution_angle(clock.days(), 687.0, 0.3);
        let direct = revolution_angle(1000.0, 687.0, 0.3);
        assert!((direct - stepped).abs() < 1e-6);
    }

    #[test]
    fn home_angle_whole_day_determinism() {
        let mut clock_a = OrbitalClock::new(50.0);
        let mut clock_b = OrbitalClock::new(50.0);
        clock_a.set_mode(TimeMode::Scaled(1.0));
        clock_b.set_mode(TimeMode::Scaled(1.0));

        // One jump of 30 days vs two advances summing to 30 days.
        clock_a.advance(30.0);
        clock_b.advance(12.0);
        clock_b.advance(18.0);

        let a = home_angle(clock_a.day_of_year());
        let b = home_angle(clock_b.day_of_year());
        assert!((a - b).abs() < 1e-6, "{a} vs {b}");
    }

    #[test]
    fn angle_survives_deep_future_dates() {
        let angle = revolution_angle(5.0e11, 365.25, 0.0);
        assert!(angle.is_finite());
        assert!((0.0..std::f64::consts::TAU as f32 + 1e-3).contains(&angle));
    }

    #[test]
    fn planet_placed_at_orbital_distance() {
        let mut reg = BodyRegistry::new();
        let id = reg.next_id();
        reg.register(
            CelestialBody::new(id, "Ares", BodyKind::Planet, 3.0)
                .with_orbit(105.0, 0.8)
                .with_period(687.0, 1.0),
        );
        let mut ctx = SimContext::new(SimConfig::default(), reg, OrbitalClock::new(123.0));
        apply_to_all(&mut ctx, 1.0 / 60.0, 0.1);
        let pos = ctx.registry.get(id).unwrap().visual.world_pos;
        assert!((pos.length() - 105.0).abs() < 1e-3);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn moon_angle_frozen_while_paused() {
        let mut reg = BodyRegistry::new();
        let pid = reg.next_id();
        reg.register(
            CelestialBody::new(pid, "Gaia", BodyKind::Planet, 5.0)
                .with_orbit(80.0, 1.0)
                .with_period(365.25, 1.0)
                .home(),
        );
        let mid = reg.next_id();
        reg.register(
            CelestialBody::new(mid, "Luna", BodyKind::Moon, 1.5)
                .with_orbit(12.0, 1.2)
                .with_parent(pid),
        );
        let mut ctx = SimContext::new(SimConfig::default(), reg, OrbitalClock::new(0.0));
        ctx.clock.set_paused(true);

        apply_to_all(&mut ctx, 1.0 / 60.0, 0.0);
        let first = ctx.registry.get(mid).unwrap().local_orbit_angle;
        apply_to_all(&mut ctx, 1.0 / 60.0, 0.0);
        let second = ctx.registry.get(mid).unwrap().local_orbit_angle;
        assert_eq!(first, second);
    }

    #[test]
    fn moon_tracks_parent_position() {
        let mut reg = BodyRegistry::new();
        let pid = reg.next_id();
        reg.register(
            CelestialBody::new(pid, "Zeus", BodyKind::Planet, 10.0)
                .with_orbit(160.0, 0.6)
                .with_period(4332.6, 0.41),
        );
        let mid = reg.next_id();
        reg.register(
            CelestialBody::new(mid, "Io", BodyKind::Moon, 1.0)
                .with_orbit(18.0, 2.0)
                .with_parent(pid),
        );
        let mut ctx = SimContext::new(SimConfig::default(), reg, OrbitalClock::new(77.0));
        apply_to_all(&mut ctx, 1.0 / 60.0, 0.5);
        let parent = ctx.registry.get(pid).unwrap().visual.world_pos;
        let moon = ctx.registry.get(mid).unwrap().visual.world_pos;
        assert!((moon.distance(parent) - 18.0).abs() < 1e-3);
    }

    #[test]
    fn retrograde_spin_runs_backwards() {
        let mut ctx = ctx_with(vec![], 0.0);
        let id = ctx.registry.next_id();
        ctx.registry.register(
            CelestialBody::new(id, "Eos", BodyKind::Planet, 4.0)
                .with_orbit(60.0, 1.0)
                .with_period(224.7, -243.0)
                .retrograde(),
        );
        apply_to_all(&mut ctx, 1.0, 0.0);
        assert!(ctx.registry.get(id).unwrap().spin_angle < 0.0);
    }

    #[test]
    fn belts_follow_time_scale() {
        let mut ctx = ctx_with(vec![], 0.0);
        let before = ctx.belts[0].angle;
        apply_to_all(&mut ctx, 1.0 / 60.0, 2.0);
        assert!(ctx.belts[0].angle > before);

        // Zero simulated advance leaves belts alone.
        let frozen = ctx.belts[0].angle;
        apply_to_all(&mut ctx, 1.0 / 60.0, 0.0);
        assert_eq!(ctx.belts[0].angle, frozen);
    }
}
