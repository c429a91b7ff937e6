use glam::Vec2;

/// Which way the play area is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Current playable pixel area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Negative or NaN dimensions are stored as zero.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// A zero-size viewport means layout hasn't happened yet.
    pub fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn orientation(&self) -> Orientation {
        if self.width >= self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Uniform sample in `[padding, dim - padding]` on each axis.
/// An axis too small to hold the padding collapses to its midpoint.
pub fn random_point_in_bounds(viewport: Viewport, padding: f32, rng: &mut fastrand::Rng) -> Vec2 {
    Vec2::new(
        sample_axis(viewport.width, padding, rng),
        sample_axis(viewport.height, padding, rng),
    )
}

fn sample_axis(dim: f32, padding: f32, rng: &mut fastrand::Rng) -> f32 {
    let span = dim - 2.0 * padding;
    if span <= 0.0 {
        return dim * 0.5;
    }
    padding + rng.f32() * span
}

/// Angle (radians) of the vector `from -> to`, in `(-π, π]`.
pub fn heading_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Clamp into `[padding, dim - padding]`. Degenerate axes collapse to the midpoint.
pub fn clamp_to_bounds(p: Vec2, viewport: Viewport, padding: f32) -> Vec2 {
    Vec2::new(
        clamp_axis(p.x, viewport.width, padding),
        clamp_axis(p.y, viewport.height, padding),
    )
}

fn clamp_axis(v: f32, dim: f32, padding: f32) -> f32 {
    if dim - 2.0 * padding <= 0.0 {
        return dim * 0.5;
    }
    v.clamp(padding, dim - padding)
}

/// Side-view sprites face left when travelling more than 90° off the +x axis.
pub fn faces_left(heading: f32) -> bool {
    heading.abs() > std::f32::consts::FRAC_PI_2
}
