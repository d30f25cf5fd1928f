//! Core types for name resolution
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Resolution tier that produced a binding, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Source and target share a name
    SameName,
    /// Caller-supplied predicate or rename function
    TieBreaker,
    /// Caller-supplied explicit mapping
    Explicit,
}

/// Source slot bound to one target slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub source: String,
    pub tier: Tier,
}

/// Resolved name correspondence, keyed by target name
///
/// A target name appears at most once. A stronger tier replaces a weaker
/// binding; explicit bindings replace each other (last write wins) and are
/// never replaced by an automatic tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    entries: BTreeMap<String, Binding>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `tier` may bind `target` given what is already there
    pub fn can_claim(&self, target: &str, tier: Tier) -> bool {
        match self.entries.get(target) {
            None => true,
            Some(existing) => {
                tier > existing.tier
                    || (tier == Tier::Explicit && existing.tier == Tier::Explicit)
            }
        }
    }

    /// Bind `target` to `source`; returns `false` when a stronger binding holds the target
    pub fn bind(
        &mut self,
        target: impl Into<String>,
        source: impl Into<String>,
        tier: Tier,
    ) -> bool {
        let target = target.into();
        if !self.can_claim(&target, tier) {
            return false;
        }
        let source = source.into();
        if let Some(previous) = self.entries.insert(target.clone(), Binding { source, tier }) {
            log::trace!(
                "Binding for `{}` from `{}` ({:?}) replaced by {:?}",
                target,
                previous.source,
                previous.tier,
                tier
            );
        }
        true
    }

    pub fn source_for(&self, target: &str) -> Option<&str> {
        self.entries.get(target).map(|b| b.source.as_str())
    }

    pub fn tier_of(&self, target: &str) -> Option<Tier> {
        self.entries.get(target).map(|b| b.tier)
    }

    /// Whether some target is already fed by `source`
    pub fn is_source_bound(&self, source: &str) -> bool {
        self.entries.values().any(|b| b.source == source)
    }

    /// `(target, source)` pairs in target-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(target, binding)| (target.as_str(), binding.source.as_str()))
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Second-priority naming rule
#[derive(Clone)]
pub enum TieBreaker {
    /// `(source, target) -> bool`, tried against every candidate target name
    Matches(Arc<dyn Fn(&str, &str) -> bool + Send + Sync>),
    /// `source -> target`, applied once per source name
    Rename(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl TieBreaker {
    pub fn matches<F>(f: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        TieBreaker::Matches(Arc::new(f))
    }

    pub fn rename<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        TieBreaker::Rename(Arc::new(f))
    }
}

impl fmt::Debug for TieBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreaker::Matches(_) => f.write_str("TieBreaker::Matches(..)"),
            TieBreaker::Rename(_) => f.write_str("TieBreaker::Rename(..)"),
        }
    }
}

/// Declarative part of a copy configuration
///
/// Can be loaded from JSON; unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingRules {
    /// Source names excluded from matching
    pub ignore_source_fields: BTreeSet<String>,
    /// Target names excluded from matching
    pub ignore_target_fields: BTreeSet<String>,
    /// Source name -> target name overrides
    pub explicit_mapping: BTreeMap<String, String>,
    /// Only use the explicit mapping
    pub restrict_to_explicit: bool,
    /// Disable the identical-name fallback
    pub ignore_same: bool,
}

impl NamingRules {
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: NamingRules = serde_json::from_str(json).map_err(|e| Error::Configuration {
            message: format!("invalid naming rules: {}", e),
            source: Some(e.into()),
        })?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject empty slot names anywhere in the rules
    pub fn validate(&self) -> Result<()> {
        let empty_ignore = self
            .ignore_source_fields
            .iter()
            .chain(self.ignore_target_fields.iter())
            .any(|name| name.is_empty());
        if empty_ignore {
            return Err(Error::Configuration {
                message: "ignored field names must not be empty".to_string(),
                source: None,
            });
        }
        if let Some((source, target)) = self
            .explicit_mapping
            .iter()
            .find(|(source, target)| source.is_empty() || target.is_empty())
        {
            return Err(Error::Configuration {
                message: format!("explicit mapping {:?} -> {:?} has an empty name", source, target),
                source: None,
            });
        }
        Ok(())
    }
}

/// Full configuration of one copy call
///
/// `CopyOptions::default()` is the zero-configuration form: no ignored names,
/// no explicit mapping, no tie-breaker, identical names copied.
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    pub rules: NamingRules,
    pub tie_breaker: Option<TieBreaker>,
}

impl CopyOptions {
    pub fn new(rules: NamingRules) -> Self {
        Self {
            rules,
            tie_breaker: None,
        }
    }

    pub fn builder() -> super::CopyOptionsBuilder {
        super::CopyOptionsBuilder::new()
    }
}
