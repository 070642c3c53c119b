use crate::state::CombatantId;

/// What an attack event does to its target. Mutually exclusive per event.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventPayload {
    Damage { amount: f64, critical: bool },
    Heal { amount: f64 },
    ShieldRestore { amount: f64 },
}

/// Optional descriptive metadata attached to an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventMeta {
    /// Produced by an ability rather than a basic attack.
    pub special: bool,
    pub ability: Option<String>,
    pub damage_over_time: bool,
}

/// A request to change a combatant's health or shield.
///
/// Events are consumed only by the event processor, strictly in `sequence`
/// order; later events see the state left by earlier ones.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackEvent {
    pub attacker: CombatantId,
    pub target: CombatantId,
    /// Monotonic per-battle counter used as the ordering tie-break.
    pub sequence: u64,
    pub payload: EventPayload,
    pub meta: EventMeta,
}

impl AttackEvent {
    pub fn is_damage(&self) -> bool {
        matches!(self.payload, EventPayload::Damage { .. })
    }

    pub fn amount(&self) -> f64 {
        match self.payload {
            EventPayload::Damage { amount, .. }
            | EventPayload::Heal { amount }
            | EventPayload::ShieldRestore { amount } => amount,
        }
    }
}
