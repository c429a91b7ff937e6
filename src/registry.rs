use glam::Vec2;

use crate::ecs::components::{ColorVariant, Heading, Position, PrevPosition, Target};
use crate::geometry::{self, Viewport};
use crate::species::Species;

/// Read-only copy of one live critter, handed out to hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prey {
    pub id: hecs::Entity,
    pub species: Species,
    pub position: Vec2,
    pub target: Vec2,
    pub heading: f32,
    pub color: Option<u32>,
}

/// Owns every live critter on the play screen.
///
/// Critters are hecs entities; an id is retired for good once despawned
/// (hecs bumps the generation), so a stale id can never alias a newcomer.
pub struct EntityRegistry {
    pub(crate) world: hecs::World,
    pub(crate) rng: fastrand::Rng,
    viewport: Viewport,
    padding: f32,
}

impl EntityRegistry {
    pub fn new(padding: f32, rng: fastrand::Rng) -> Self {
        Self {
            world: hecs::World::new(),
            rng,
            viewport: Viewport::default(),
            padding,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Adopt new bounds. Live critters (and their targets) are pulled inside.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if !viewport.is_ready() {
            return;
        }
        let padding = self.padding;
        for (_, (pos, target)) in self.world.query_mut::<(&mut Position, &mut Target)>() {
            pos.0 = geometry::clamp_to_bounds(pos.0, viewport, padding);
            target.0 = geometry::clamp_to_bounds(target.0, viewport, padding);
        }
    }

    /// Spawn `count_per_species` critters for each requested species.
    /// Returns nothing until the viewport has a real size.
    pub fn spawn_initial(&mut self, species: &[Species], count_per_species: usize) -> Vec<Prey> {
        if !self.viewport.is_ready() {
            return Vec::new();
        }
        let mut spawned = Vec::with_capacity(species.len() * count_per_species);
        for &kind in species {
            for _ in 0..count_per_species {
                if let Some(prey) = self.spawn_one(kind) {
                    spawned.push(prey);
                }
            }
        }
        log::info!(
            "Spawned {} critters ({} species) in {}x{}",
            spawned.len(),
            species.len(),
            self.viewport.width,
            self.viewport.height
        );
        spawned
    }

    /// Spawn one replacement critter of `species`.
    pub fn respawn(&mut self, species: Species) -> Option<Prey> {
        let prey = self.spawn_one(species)?;
        log::debug!("Respawned {} as {:?}", species.label(), prey.id);
        Some(prey)
    }

    fn spawn_one(&mut self, species: Species) -> Option<Prey> {
        if !self.viewport.is_ready() {
            return None;
        }
        let pos = geometry::random_point_in_bounds(self.viewport, self.padding, &mut self.rng);
        let target = geometry::random_point_in_bounds(self.viewport, self.padding, &mut self.rng);
        let heading = geometry::heading_to(pos, target);
        let color = species.random_color(&mut self.rng);

        let mut builder = hecs::EntityBuilder::new();
        builder.add_bundle((
            species,
            Position(pos),
            PrevPosition(pos),
            Target(target),
            Heading(heading),
        ));
        if let Some(c) = color {
            builder.add(ColorVariant(c));
        }
        let id = self.world.spawn(builder.build());

        Some(Prey {
            id,
            species,
            position: pos,
            target,
            heading,
            color,
        })
    }

    /// Delete a critter. Unknown or already-removed ids are ignored.
    pub fn remove(&mut self, id: hecs::Entity) -> bool {
        self.world.despawn(id).is_ok()
    }

    pub fn get(&self, id: hecs::Entity) -> Option<Prey> {
        let mut query = self
            .world
            .query_one::<(&Species, &Position, &Target, &Heading, Option<&ColorVariant>)>(id)
            .ok()?;
        let (species, pos, target, heading, color) = query.get()?;
        Some(Prey {
            id,
            species: *species,
            position: pos.0,
            target: target.0,
            heading: heading.0,
            color: color.map(|c| c.0),
        })
    }

    /// Current live set.
    pub fn all(&self) -> Vec<Prey> {
        let mut out = Vec::with_capacity(self.len());
        for (id, (species, pos, target, heading, color)) in self
            .world
            .query::<(&Species, &Position, &Target, &Heading, Option<&ColorVariant>)>()
            .iter()
        {
            out.push(Prey {
                id,
                species: *species,
                position: pos.0,
                target: target.0,
                heading: heading.0,
                color: color.map(|c| c.0),
            });
        }
        out
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn count_of(&self, species: Species) -> usize {
        self.world
            .query::<&Species>()
            .iter()
            .filter(|(_, s)| **s == species)
            .count()
    }

    /// Nearest critter within `radius` of `point`.
    pub fn hit_test(&self, point: Vec2, radius: f32) -> Option<hecs::Entity> {
        let mut nearest = None;
        let mut nearest_dist_sq = radius * radius;
        for (id, pos) in self.world.query::<&Position>().iter() {
            let dist_sq = (pos.0 - point).length_squared();
            if dist_sq <= nearest_dist_sq {
                nearest_dist_sq = dist_sq;
                nearest = Some(id);
            }
        }
        nearest
    }

    /// Drop every critter (play screen torn down).
    pub fn clear(&mut self) {
        self.world.clear();
    }
}
