/// How a damage amount was split between shield and health.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Absorption {
    pub absorbed: f64,
    pub health_damage: f64,
}

impl Absorption {
    /// True when the hit touched the shield or health at all.
    pub fn landed(&self) -> bool {
        self.absorbed > 0.0 || self.health_damage > 0.0
    }
}

/// Applies `damage` to `shield` first, then to `health` (floored at zero).
///
/// `health_damage` reports the health actually lost, so overkill is not
/// counted.
pub fn absorb_damage(damage: f64, shield: &mut f64, health: &mut f64) -> Absorption {
    debug_assert!(damage >= 0.0, "absorb_damage: negative damage {damage}");

    let absorbed = shield.min(damage).max(0.0);
    *shield -= absorbed;

    let remaining = damage - absorbed;
    let before = *health;
    *health = (*health - remaining).max(0.0);

    Absorption {
        absorbed,
        health_damage: before - *health,
    }
}
