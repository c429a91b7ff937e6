use glam::Vec2;

/// Identifies one catch sparkle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub u64);

/// Short-lived "caught it!" sparkle drawn where a critter vanished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchEffect {
    pub id: EffectId,
    pub position: Vec2,
    /// Virtual time (seconds) the catch happened.
    pub created_at: f64,
}

impl CatchEffect {
    /// Progress 0.0 (just caught) to 1.0 (about to expire).
    pub fn progress(&self, now: f64, lifetime: f64) -> f32 {
        if lifetime <= 0.0 {
            return 1.0;
        }
        ((now - self.created_at) / lifetime).clamp(0.0, 1.0) as f32
    }
}

/// Max sparkles alive at once. Oldest is dropped when full.
const MAX_EFFECTS: usize = 64;

/// Live catch sparkles. Expiry is driven by the timer queue.
pub struct CatchEffects {
    effects: Vec<CatchEffect>,
    next_id: u64,
}

impl CatchEffects {
    pub fn new() -> Self {
        Self {
            effects: Vec::with_capacity(8),
            next_id: 0,
        }
    }

    pub fn spawn(&mut self, position: Vec2, now: f64) -> EffectId {
        if self.effects.len() >= MAX_EFFECTS {
            self.effects.remove(0);
        }
        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.effects.push(CatchEffect {
            id,
            position,
            created_at: now,
        });
        id
    }

    /// Remove one sparkle. Missing ids are ignored.
    pub fn expire(&mut self, id: EffectId) {
        self.effects.retain(|e| e.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatchEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

impl Default for CatchEffects {
    fn default() -> Self {
        Self::new()
    }
}
