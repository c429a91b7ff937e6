use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::ecs::components::{ColorVariant, Heading, Position, PrevPosition};
use crate::effects::CatchEffect;
use crate::geometry;
use crate::species::Species;

/// Drawn for species without a palette; the sprite supplies its own colors.
const NO_TINT: u32 = 0xFFFF_FFFF;

/// Per-critter data handed to the renderer each frame.
/// Stride = 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PreyInstance {
    /// Screen position (x, y), interpolated between ticks.
    pub position: [f32; 2],
    /// Seek angle in radians.
    pub heading: f32,
    /// RGBA color packed as u32.
    pub color: u32,
    /// `Species as u32`; selects the sprite.
    pub species: u32,
    /// 1 = mirror horizontally (side-view sprites facing left).
    pub flip: u32,
}

impl PreyInstance {
    /// Build an instance from ECS components, interpolating position.
    pub fn from_components(
        species: Species,
        pos: &Position,
        prev_pos: &PrevPosition,
        heading: &Heading,
        color: Option<&ColorVariant>,
        alpha: f32,
    ) -> Self {
        // Lerp between previous and current position for smooth rendering
        let interp = Vec2::lerp(prev_pos.0, pos.0, alpha.clamp(0.0, 1.0));
        let flip = species.mirrors() && geometry::faces_left(heading.0);

        Self {
            position: interp.into(),
            heading: heading.0,
            color: color.map_or(NO_TINT, |c| c.0),
            species: species as u32,
            flip: flip as u32,
        }
    }

    /// Sprite rotation in degrees for top-down species (head points along travel).
    pub fn rotation_degrees(&self) -> f32 {
        self.heading.to_degrees() + 90.0
    }
}

/// Per-sparkle data: position plus 0..1 animation progress.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct EffectInstance {
    pub position: [f32; 2],
    pub progress: f32,
}

impl EffectInstance {
    pub fn from_effect(effect: &CatchEffect, now: f64, lifetime: f64) -> Self {
        Self {
            position: effect.position.into(),
            progress: effect.progress(now, lifetime),
        }
    }
}

/// Collect instances for every live critter.
pub fn build_instances(
    world: &hecs::World,
    alpha: f32,
    buf: &mut Vec<(hecs::Entity, PreyInstance)>,
) {
    buf.clear();
    for (id, (species, pos, prev_pos, heading, color)) in world
        .query::<(&Species, &Position, &PrevPosition, &Heading, Option<&ColorVariant>)>()
        .iter()
    {
        buf.push((
            id,
            PreyInstance::from_components(*species, pos, prev_pos, heading, color, alpha),
        ));
    }
}
