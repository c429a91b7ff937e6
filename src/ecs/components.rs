use glam::Vec2;

/// Current world position in screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Previous tick's position, for render interpolation.
#[derive(Debug, Clone, Copy)]
pub struct PrevPosition(pub Vec2);

/// Point the critter is currently steering toward.
#[derive(Debug, Clone, Copy)]
pub struct Target(pub Vec2);

/// Seek angle in radians (pre-wobble). Drives sprite orientation only.
#[derive(Debug, Clone, Copy)]
pub struct Heading(pub f32);

/// RGBA packed as u32, drawn once from the species palette at spawn.
/// Only present on species that come in several colors.
#[derive(Debug, Clone, Copy)]
pub struct ColorVariant(pub u32);

// `Species` itself is attached as a component (see `crate::species`).
