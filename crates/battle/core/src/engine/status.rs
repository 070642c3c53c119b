use crate::state::{BattleStatus, Battlefield};

/// Terminal-state check.
///
/// Defeat when no hero has health left; victory when no enemy has health left
/// and none is still playing its death animation. Defeat wins a mutual wipe.
pub fn evaluate(field: &Battlefield) -> BattleStatus {
    if !field.heroes.iter().any(|c| c.health > 0.0) {
        return BattleStatus::Defeat;
    }
    let enemies_remain = field
        .enemies
        .iter()
        .any(|c| c.is_alive() || c.is_dying());
    if enemies_remain {
        BattleStatus::Fighting
    } else {
        BattleStatus::Victory
    }
}
