//! Fluent builder for copy options
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

use crate::Result;
use super::types::{CopyOptions, NamingRules, TieBreaker};

/// Builder for [`CopyOptions`]
#[derive(Debug, Default)]
pub struct CopyOptionsBuilder {
    rules: NamingRules,
    tie_breaker: Option<TieBreaker>,
}

impl CopyOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously loaded rules
    pub fn rules(mut self, rules: NamingRules) -> Self {
        self.rules = rules;
        self
    }

    /// Exclude source names from matching
    pub fn ignore_source<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.ignore_source_fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Exclude target names from matching
    pub fn ignore_target<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.ignore_target_fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add one explicit `source -> target` override
    pub fn map(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.rules.explicit_mapping.insert(source.into(), target.into());
        self
    }

    /// Add several explicit overrides
    pub fn explicit_mapping<I, S, T>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        self.rules
            .explicit_mapping
            .extend(pairs.into_iter().map(|(s, t)| (s.into(), t.into())));
        self
    }

    /// Copy only the explicitly mapped names
    pub fn restrict_to_explicit(mut self) -> Self {
        self.rules.restrict_to_explicit = true;
        self
    }

    /// Disable the identical-name fallback
    pub fn ignore_same(mut self) -> Self {
        self.rules.ignore_same = true;
        self
    }

    /// Use a `(source, target) -> bool` predicate as tie-breaker
    pub fn matches<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        self.tie_breaker = Some(TieBreaker::matches(f));
        self
    }

    /// Use a `source -> target` rename function as tie-breaker
    pub fn rename<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.tie_breaker = Some(TieBreaker::rename(f));
        self
    }

    /// Validate and build the options
    pub fn build(self) -> Result<CopyOptions> {
        self.rules.validate()?;
        Ok(CopyOptions {
            rules: self.rules,
            tie_breaker: self.tie_breaker,
        })
    }
}
