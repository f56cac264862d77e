//! Special abilities: typed effects dispatched at trigger moments.
//!
//! ## Key Types
//!
//! - `AbilityId`, `TriggerMoment`: what fires and when
//! - `AbilityEffect`: closed set of effect families with typed parameters
//! - `SpecialAbility`: an effect plus the moments it listens on
//! - `AbilitySpec`: the loose catalog form, converted with `TryFrom`
//! - `AbilityRegistry`: read-only lookup built once at startup
//! - `AbilityContext` / `EffectOutcome`: dispatch input and output
//!
//! ## Failure Semantics
//!
//! Dispatch is fail-soft. A handler fault is logged with the ability id and
//! trigger moment and the effect becomes a no-op; the surrounding action
//! always completes.

pub mod ability;
pub mod dispatch;
mod handlers;
pub mod registry;
pub mod spec;

pub use ability::{AbilityEffect, AbilityId, LineSelector, ScopeKind, SpecialAbility, TriggerMoment};
pub use dispatch::{AbilityContext, AbilityFault, EffectOutcome};
pub use registry::AbilityRegistry;
pub use spec::{AbilitySpec, ParamValue, RegistryError};
