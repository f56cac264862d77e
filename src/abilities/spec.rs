//! Raw ability specs as they appear in a catalog document.
//!
//! A spec names its effect family with a `kind` string and carries loose
//! key/value `parameters`. `SpecialAbility::try_from(&spec)` is the single
//! place where that loose form is turned into a typed `AbilityEffect`;
//! shape errors are reported as `RegistryError` when the registry is built.
//!
//! ```
//! use tile_duel::abilities::{AbilitySpec, SpecialAbility};
//!
//! let spec: AbilitySpec = serde_json::from_str(
//!     r#"{"id": 3, "name": "Scout", "triggers": ["on_place"], "kind": "draw_cards",
//!         "parameters": {"count": 2}}"#,
//! ).unwrap();
//! let ability = SpecialAbility::try_from(&spec).unwrap();
//! assert_eq!(ability.effect.kind(), "draw_cards");
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::ability::{AbilityEffect, AbilityId, LineSelector, ScopeKind, SpecialAbility, TriggerMoment};
use crate::board::Direction;

/// Errors raised while building typed abilities from specs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{ability}: unknown effect kind '{kind}'")]
    UnknownKind { ability: AbilityId, kind: String },
    #[error("{ability}: missing parameter '{name}'")]
    MissingParameter { ability: AbilityId, name: &'static str },
    #[error("{ability}: parameter '{name}' must be {expected}")]
    InvalidParameter {
        ability: AbilityId,
        name: &'static str,
        expected: &'static str,
    },
    #[error("duplicate ability id {0}")]
    Duplicate(AbilityId),
}

/// A loosely typed parameter value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<ParamValue>),
}

/// An ability as stored in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySpec {
    pub id: AbilityId,
    #[serde(default)]
    pub name: String,
    pub triggers: Vec<TriggerMoment>,
    pub kind: String,
    #[serde(default)]
    pub parameters: FxHashMap<String, ParamValue>,
}

impl AbilitySpec {
    #[must_use]
    pub fn new(id: AbilityId, kind: impl Into<String>, triggers: &[TriggerMoment]) -> Self {
        Self {
            id,
            name: String::new(),
            triggers: triggers.to_vec(),
            kind: kind.into(),
            parameters: FxHashMap::default(),
        }
    }

    /// Set a parameter (builder pattern).
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    fn params(&self) -> Params<'_> {
        Params { spec: self }
    }
}

/// Typed accessors over a spec's parameter map.
struct Params<'a> {
    spec: &'a AbilitySpec,
}

impl Params<'_> {
    fn raw(&self, name: &'static str) -> Option<&ParamValue> {
        self.spec.parameters.get(name)
    }

    fn invalid(&self, name: &'static str, expected: &'static str) -> RegistryError {
        RegistryError::InvalidParameter { ability: self.spec.id, name, expected }
    }

    fn int_opt(&self, name: &'static str) -> Result<Option<i64>, RegistryError> {
        match self.raw(name) {
            None => Ok(None),
            Some(ParamValue::Int(v)) => Ok(Some(*v)),
            Some(_) => Err(self.invalid(name, "an integer")),
        }
    }

    fn int(&self, name: &'static str) -> Result<i64, RegistryError> {
        self.int_opt(name)?.ok_or(RegistryError::MissingParameter { ability: self.spec.id, name })
    }

    fn i32(&self, name: &'static str) -> Result<i32, RegistryError> {
        i32::try_from(self.int(name)?).map_err(|_| self.invalid(name, "a 32-bit integer"))
    }

    fn u8_opt(&self, name: &'static str) -> Result<Option<u8>, RegistryError> {
        self.int_opt(name)?
            .map(|v| u8::try_from(v).map_err(|_| self.invalid(name, "an integer in 0..=255")))
            .transpose()
    }

    fn u8(&self, name: &'static str) -> Result<u8, RegistryError> {
        self.u8_opt(name)?.ok_or(RegistryError::MissingParameter { ability: self.spec.id, name })
    }

    fn text_opt(&self, name: &'static str) -> Result<Option<&str>, RegistryError> {
        match self.raw(name) {
            None => Ok(None),
            Some(ParamValue::Text(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.invalid(name, "a string")),
        }
    }

    fn direction(&self, name: &'static str) -> Result<Direction, RegistryError> {
        let text = self
            .text_opt(name)?
            .ok_or(RegistryError::MissingParameter { ability: self.spec.id, name })?;
        Direction::parse(text).ok_or_else(|| self.invalid(name, "a direction"))
    }

    fn directions_or_all(&self, name: &'static str) -> Result<SmallVec<[Direction; 4]>, RegistryError> {
        match self.raw(name) {
            None => Ok(SmallVec::from_slice(&Direction::all())),
            Some(ParamValue::List(items)) => items
                .iter()
                .map(|item| match item {
                    ParamValue::Text(s) => Direction::parse(s).ok_or_else(|| self.invalid(name, "a list of directions")),
                    _ => Err(self.invalid(name, "a list of directions")),
                })
                .collect(),
            Some(_) => Err(self.invalid(name, "a list of directions")),
        }
    }

    fn line(&self) -> Result<LineSelector, RegistryError> {
        let index = || self.u8("index");
        match self.text_opt("line")?.unwrap_or("source_row") {
            "source_row" => Ok(LineSelector::SourceRow),
            "source_column" => Ok(LineSelector::SourceColumn),
            "row" => Ok(LineSelector::Row(index()?)),
            "column" => Ok(LineSelector::Column(index()?)),
            _ => Err(self.invalid("line", "one of source_row, source_column, row, column")),
        }
    }

    fn scope(&self) -> Result<ScopeKind, RegistryError> {
        match self.text_opt("scope")? {
            None => Ok(ScopeKind::default()),
            Some("own") => Ok(ScopeKind::Own),
            Some("opponent") => Ok(ScopeKind::Opponent),
            Some("anyone") => Ok(ScopeKind::Anyone),
            Some(_) => Err(self.invalid("scope", "one of own, opponent, anyone")),
        }
    }
}

impl TryFrom<&AbilitySpec> for SpecialAbility {
    type Error = RegistryError;

    fn try_from(spec: &AbilitySpec) -> Result<Self, Self::Error> {
        let p = spec.params();
        let effect = match spec.kind.as_str() {
            "board_buff" => AbilityEffect::BoardBuff {
                directions: p.directions_or_all("directions")?,
                amount: p.i32("amount")?,
                duration: p.u8_opt("duration")?,
            },
            "swap_with_enemy" => AbilityEffect::SwapWithEnemy { direction: p.direction("direction")? },
            "defeat_strongest" => AbilityEffect::DefeatStrongest { line: p.line()? },
            "draw_cards" => AbilityEffect::DrawCards { count: p.u8_opt("count")?.unwrap_or(1) },
            "enchant_tiles" => AbilityEffect::EnchantTiles {
                delta: p.i32("delta")?,
                card_duration: p.u8_opt("card_duration")?,
                lifetime: p.u8_opt("lifetime")?.unwrap_or(2),
                scope: p.scope()?,
            },
            other => {
                return Err(RegistryError::UnknownKind { ability: spec.id, kind: other.to_string() });
            }
        };

        let mut ability = SpecialAbility::new(spec.id, spec.name.clone(), effect);
        for &moment in &spec.triggers {
            ability = ability.on(moment);
        }
        Ok(ability)
    }
}
