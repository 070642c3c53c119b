use crate::effect::TickContext;
use crate::state::{Battlefield, Side};

use super::{ManaRule, attack_ready, basic_attack, eligible, finish_action, try_abilities};

/// Resolves one action for every eligible enemy, in roster order.
///
/// Enemies cast without paying mana and have no class routine; their
/// single-target choice prefers a taunting hero.
pub fn resolve_enemies(ctx: &mut TickContext<'_>, field: &mut Battlefield) {
    for id in field.ids(Side::Enemy) {
        if !eligible(field, id) {
            continue;
        }
        let acted = try_abilities(ctx, field, id, ManaRule::Free)
            || (attack_ready(field, id) && basic_attack(ctx, field, id, 1.0));
        if acted {
            finish_action(field, id);
        }
    }
}
