use crate::effect::TickContext;
use crate::state::Battlefield;

/// Rebuilds calculated stats for every combatant marked this tick.
///
/// Hero scale follows the current level, so level-ups land here too.
/// Health and mana keep their percentage across the change.
pub fn apply_recompute(ctx: &mut TickContext<'_>, field: &mut Battlefield) {
    let config = ctx.config();
    for id in std::mem::take(&mut ctx.recompute) {
        let Some(unit) = field.get_mut(id) else {
            continue;
        };
        if let Some(level) = unit.hero().map(|h| h.level) {
            unit.scale = config.hero_scale(level);
        }
        unit.recompute_stats(config.default_crit_damage);
    }
}
