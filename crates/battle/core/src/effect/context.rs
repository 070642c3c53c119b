use std::collections::{BTreeSet, VecDeque};

use crate::config::BattleConfig;
use crate::env::{BattleEnv, DefinitionsOracle, RollStream};
use crate::error::{BattleError, BattleIssue, ErrorSeverity};
use crate::state::{
    AttackEvent, BattleSnapshot, Combatant, CombatantId, DeferredReward, EventMeta, EventPayload,
    Tick,
};

/// Mutable scratch space for one tick.
///
/// Every component reads the environment and appends its outputs here; the
/// orchestrator folds the result into the snapshot at the end of the tick.
pub struct TickContext<'a> {
    pub env: BattleEnv<'a>,
    /// The tick being simulated.
    pub tick: Tick,
    pub tick_ms: u32,
    /// Stat multiplier for enemies spawned during this tick.
    pub enemy_scale: f64,
    pub preferred_target: Option<CombatantId>,
    pub rolls: RollStream<'a>,
    pub log: Vec<String>,
    /// Pending events in sequence order.
    pub events: VecDeque<AttackEvent>,
    /// Events the processor applied this tick.
    pub processed: Vec<AttackEvent>,
    pub recompute: BTreeSet<CombatantId>,
    /// Units created this tick, not yet part of a roster.
    pub spawned: Vec<Combatant>,
    pub rewards: Vec<DeferredReward>,
    reported: BTreeSet<String>,
    next_event_sequence: u64,
    next_instance_id: u32,
}

impl<'a> TickContext<'a> {
    pub fn new(env: BattleEnv<'a>, snapshot: &BattleSnapshot, tick_ms: u32) -> Self {
        let tick = snapshot.tick.next();
        Self {
            env,
            tick,
            tick_ms,
            enemy_scale: snapshot.mode.enemy_scale(env.config),
            preferred_target: snapshot.preferred_target,
            rolls: RollStream::new(env.rng, snapshot.seed, tick),
            log: Vec::new(),
            events: VecDeque::new(),
            processed: Vec::new(),
            recompute: BTreeSet::new(),
            spawned: Vec::new(),
            rewards: Vec::new(),
            reported: BTreeSet::new(),
            next_event_sequence: snapshot.next_event_sequence,
            next_instance_id: snapshot.next_instance_id,
        }
    }

    pub fn definitions(&self) -> &'a dyn DefinitionsOracle {
        self.env.definitions
    }

    pub fn config(&self) -> &'a BattleConfig {
        self.env.config
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    /// Records a non-fatal issue.
    ///
    /// Internal issues (bad static data) reach the battle log once per tick;
    /// everything else is only traced.
    pub fn report(&mut self, issue: BattleIssue) {
        let message = issue.to_string();
        match issue.severity() {
            ErrorSeverity::Internal => {
                if self.reported.insert(message.clone()) {
                    tracing::warn!(
                        code = issue.error_code(),
                        tick = self.tick.0,
                        "{message}"
                    );
                    self.log.push(message);
                }
            }
            ErrorSeverity::Validation | ErrorSeverity::Recoverable => {
                tracing::debug!(code = issue.error_code(), tick = self.tick.0, "{message}");
            }
        }
    }

    pub fn push_event(
        &mut self,
        attacker: CombatantId,
        target: CombatantId,
        payload: EventPayload,
        meta: EventMeta,
    ) {
        let sequence = self.next_event_sequence;
        self.next_event_sequence += 1;
        self.events.push_back(AttackEvent {
            attacker,
            target,
            sequence,
            payload,
            meta,
        });
    }

    /// Allocates a fresh instance id; ids are never reused within a battle.
    pub fn allocate_id(&mut self) -> CombatantId {
        let id = CombatantId(self.next_instance_id);
        self.next_instance_id += 1;
        id
    }

    pub fn mark_recompute(&mut self, id: CombatantId) {
        self.recompute.insert(id);
    }

    /// Writes the id and sequence counters back into the snapshot.
    pub fn store_counters(&self, snapshot: &mut BattleSnapshot) {
        snapshot.next_event_sequence = self.next_event_sequence;
        snapshot.next_instance_id = self.next_instance_id;
    }
}
