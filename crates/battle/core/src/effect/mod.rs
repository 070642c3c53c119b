//! Shared effect application used by the updater, both resolvers and the
//! event processor.
mod apply;
mod context;
mod targeting;

pub use apply::{Cast, apply_effects, interrupt_channel};
pub use context::TickContext;
pub use targeting::{lowest_health_ally, select_targets, single_opponent};
