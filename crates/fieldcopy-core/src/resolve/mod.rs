//! Name resolution: which source slot feeds which target slot
//!
//! [`resolve`] turns two catalogs and a [`CopyOptions`] into a [`NameTable`].
//! Ignored names are removed first; with `restrict_to_explicit` both sides are
//! further narrowed to the explicit mapping's keys and values. Bindings are
//! then made in three tiers:
//!
//! 1. explicit mapping, whose entries always take effect
//! 2. tie-breaker, a predicate over `(source, target)` pairs or a rename
//!    function (skipped when restricted to the explicit mapping)
//! 3. identical names (skipped when restricted, or with `ignore_same`)
//!
//! Tiers 2 and 3 only consider source names no earlier tier bound, and only
//! claim target names no stronger tier holds.
//!
//! # Examples
//!
//! ```
//! use fieldcopy_core::{resolve, Catalog, CopyOptions};
//!
//! let source = Catalog::Closed(vec!["id".into(), "note".into()]);
//! let target = Catalog::Closed(vec!["id_".into(), "note".into()]);
//! let options = CopyOptions::builder().map("id", "id_").build().unwrap();
//!
//! let table = resolve(source, target, &options);
//! assert_eq!(table.source_for("id_"), Some("id"));
//! assert_eq!(table.source_for("note"), Some("note"));
//! ```
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod types;


pub use builder::CopyOptionsBuilder;
pub use types::{Binding, CopyOptions, NameTable, NamingRules, TieBreaker, Tier};

use crate::catalog::Catalog;
use std::collections::BTreeSet;

/// Resolve the name table for one copy
pub fn resolve(source: Catalog, target: Catalog, options: &CopyOptions) -> NameTable {
    let rules = &options.rules;
    let restrict = rules.restrict_to_explicit;

    let source = source.retain(|name| {
        !rules.ignore_source_fields.contains(name)
            && (!restrict || rules.explicit_mapping.contains_key(name))
    });

    let explicit_targets: BTreeSet<&str> =
        rules.explicit_mapping.values().map(String::as_str).collect();
    let target_allowed = |name: &str| {
        !rules.ignore_target_fields.contains(name) && (!restrict || explicit_targets.contains(name))
    };
    let target = target.retain(target_allowed);
    let accepts = |name: &str| target_allowed(name) && target.accepts(name);

    let mut table = NameTable::new();

    for name in source.names() {
        if let Some(target_name) = rules.explicit_mapping.get(name) {
            if accepts(target_name) {
                table.bind(target_name.as_str(), name.as_str(), Tier::Explicit);
            } else {
                log::debug!(
                    "Explicit mapping `{}` -> `{}` dropped: target filtered out",
                    name,
                    target_name
                );
            }
        }
    }

    if restrict {
        log::debug!("Resolved {} name bindings (explicit only)", table.len());
        return table;
    }

    match &options.tie_breaker {
        Some(TieBreaker::Matches(matches)) => {
            for name in source.names() {
                if table.is_source_bound(name) {
                    continue;
                }
                let candidate = target.names().iter().find(|candidate| {
                    accepts(candidate)
                        && table.can_claim(candidate, Tier::TieBreaker)
                        && matches(name, candidate)
                });
                if let Some(candidate) = candidate {
                    table.bind(candidate.as_str(), name.as_str(), Tier::TieBreaker);
                }
            }
        }
        Some(TieBreaker::Rename(rename)) => {
            for name in source.names() {
                if table.is_source_bound(name) {
                    continue;
                }
                let renamed = rename(name);
                if accepts(&renamed) && table.can_claim(&renamed, Tier::TieBreaker) {
                    table.bind(renamed, name.as_str(), Tier::TieBreaker);
                }
            }
        }
        None => {}
    }

    if !rules.ignore_same {
        for name in source.names() {
            if !table.is_source_bound(name)
                && accepts(name)
                && table.can_claim(name, Tier::SameName)
            {
                table.bind(name.as_str(), name.as_str(), Tier::SameName);
            }
        }
    }

    log::debug!("Resolved {} name bindings", table.len());
    table
}
