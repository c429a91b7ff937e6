use glam::Vec2;

use crate::config::PlayConfig;
use crate::ecs::components::{Heading, Position, PrevPosition, Target};
use crate::geometry::{self, Viewport};
use crate::species::Species;

/// Advance every critter one tick toward its target.
///
/// A critter inside the arrival threshold only gets a fresh target this
/// tick; it starts moving again on the next one. Everyone else steps
/// `base_speed * speed_multiplier` (capped at the remaining distance) along
/// the seek angle, plus a sideways gait offset, then gets clamped back
/// inside the padded bounds.
pub fn integrate(
    world: &mut hecs::World,
    viewport: Viewport,
    config: &PlayConfig,
    speed_multiplier: f32,
    elapsed: f64,
    rng: &mut fastrand::Rng,
) {
    if !viewport.is_ready() {
        return;
    }
    let padding = config.padding;

    for (_, (species, pos, prev_pos, target, heading)) in world.query_mut::<(
        &Species,
        &mut Position,
        &mut PrevPosition,
        &mut Target,
        &mut Heading,
    )>() {
        // Store previous position for render interpolation
        prev_pos.0 = pos.0;

        let remaining = geometry::distance(pos.0, target.0);
        if remaining < config.arrival_threshold {
            target.0 = geometry::random_point_in_bounds(viewport, padding, rng);
            heading.0 = geometry::heading_to(pos.0, target.0);
            continue;
        }

        let profile = config.profile(*species);
        let angle = geometry::heading_to(pos.0, target.0);
        let forward = Vec2::from_angle(angle);
        let lateral = forward.perp();

        // Never step past the target
        let step = (profile.base_speed * speed_multiplier).min(remaining);
        pos.0 += forward * step + lateral * profile.wobble(elapsed);

        pos.0 = geometry::clamp_to_bounds(pos.0, viewport, padding);
        heading.0 = angle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with(species: Species, pos: Vec2, target: Vec2) -> (hecs::World, hecs::Entity) {
        let mut world = hecs::World::new();
        let e = world.spawn((
            species,
            Position(pos),
            PrevPosition(pos),
            Target(target),
            Heading(0.0),
        ));
        (world, e)
    }

    fn read(world: &hecs::World, e: hecs::Entity) -> (Vec2, Vec2, f32) {
        let pos = world.get::<&Position>(e).unwrap().0;
        let target = world.get::<&Target>(e).unwrap().0;
        let heading = world.get::<&Heading>(e).unwrap().0;
        (pos, target, heading)
    }

    #[test]
    fn steps_toward_target_at_species_speed() {
        let vp = Viewport::new(800.0, 600.0);
        let config = PlayConfig::default();
        let mut rng = fastrand::Rng::with_seed(3);
        let (mut world, e) = world_with(Species::Mouse, Vec2::new(100.0, 300.0), Vec2::new(700.0, 300.0));

        // elapsed = 0 => no wobble
        integrate(&mut world, vp, &config, 1.0, 0.0, &mut rng);
        let (pos, _, heading) = read(&world, e);
        assert!((pos.x - 103.0).abs() < 1e-4);
        assert!((pos.y - 300.0).abs() < 1e-4);
        assert_eq!(heading, 0.0);

        integrate(&mut world, vp, &config, 2.0, 0.0, &mut rng);
        let (pos, _, _) = read(&world, e);
        assert!((pos.x - 109.0).abs() < 1e-4);
    }

    #[test]
    fn arrival_retargets_without_moving() {
        let vp = Viewport::new(800.0, 600.0);
        let config = PlayConfig::default();
        let mut rng = fastrand::Rng::with_seed(11);
        let start = Vec2::new(400.0, 300.0);
        let (mut world, e) = world_with(Species::Fish, start, Vec2::new(410.0, 305.0));

        integrate(&mut world, vp, &config, 1.0, 0.3, &mut rng);
        let (pos, target, heading) = read(&world, e);
        assert_eq!(pos, start);
        assert_ne!(target, Vec2::new(410.0, 305.0));
        assert!(target.x >= 60.0 && target.x <= 740.0);
        assert!(target.y >= 60.0 && target.y <= 540.0);
        assert_eq!(heading, geometry::heading_to(start, target));
    }

    #[test]
    fn wobble_is_perpendicular_to_travel() {
        let vp = Viewport::new(800.0, 600.0);
        let config = PlayConfig::default();
        let mut rng = fastrand::Rng::with_seed(5);
        let (mut world, e) = world_with(Species::Laser, Vec2::new(100.0, 300.0), Vec2::new(700.0, 300.0));

        let elapsed = 0.1;
        integrate(&mut world, vp, &config, 1.0, elapsed, &mut rng);
        let (pos, _, heading) = read(&world, e);
        let expected_lateral = config.profile(Species::Laser).wobble(elapsed);
        assert!((pos.x - 105.0).abs() < 1e-4);
        assert!((pos.y - (300.0 + expected_lateral)).abs() < 1e-4);
        // heading is the seek angle, not the wobbled direction
        assert_eq!(heading, 0.0);
    }

    #[test]
    fn clamps_inside_padding() {
        let vp = Viewport::new(800.0, 600.0);
        let config = PlayConfig::default();
        let mut rng = fastrand::Rng::with_seed(5);
        let (mut world, e) = world_with(Species::Laser, Vec2::new(61.0, 300.0), Vec2::new(-500.0, 300.0));

        integrate(&mut world, vp, &config, 2.0, 0.0, &mut rng);
        let (pos, _, _) = read(&world, e);
        assert_eq!(pos.x, 60.0);
    }

    #[test]
    fn fast_critter_lands_on_target_then_retargets() {
        let vp = Viewport::new(800.0, 600.0);
        let config = PlayConfig::default();
        let mut rng = fastrand::Rng::with_seed(9);
        let goal = Vec2::new(130.0, 300.0);
        let (mut world, e) = world_with(Species::Laser, Vec2::new(100.0, 300.0), goal);

        // 5 px/tick * 10 = 50 px, well past the 30 px gap
        integrate(&mut world, vp, &config, 10.0, 0.0, &mut rng);
        let (pos, target, _) = read(&world, e);
        assert!((pos - goal).length() < 1e-3);
        assert_eq!(target, goal);

        integrate(&mut world, vp, &config, 10.0, 0.0, &mut rng);
        let (pos, target, _) = read(&world, e);
        assert!((pos - goal).length() < 1e-3);
        assert_ne!(target, goal);
    }

    #[test]
    fn idle_when_viewport_not_ready() {
        let config = PlayConfig::default();
        let mut rng = fastrand::Rng::with_seed(5);
        let start = Vec2::new(100.0, 100.0);
        let (mut world, e) = world_with(Species::Fly, start, Vec2::new(300.0, 300.0));
        integrate(&mut world, Viewport::default(), &config, 1.0, 1.0, &mut rng);
        assert_eq!(read(&world, e).0, start);
    }
}
