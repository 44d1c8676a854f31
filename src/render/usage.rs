use std::collections::{HashMap, HashSet};

use ahash::RandomState;
use itertools::Itertools;

use crate::render::document::{Document, ItemId};

#[derive(Debug, Default)]
struct UsageEntry {
    declaration: Option<ItemId>,
    referenced_by: HashSet<String, RandomState>,
}

/// Cross-reference bookkeeping for one render pass.
///
/// Maps every referenced symbol, rule name or literal terminal text, to the set of
/// rules that refer to it plus the output location of its declaration. Created empty,
/// populated while the rules are visited and consumed once at the end of the pass.
#[derive(Debug, Default)]
pub(crate) struct UsageMap {
    entries: HashMap<String, UsageEntry, RandomState>,
}

impl UsageMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Create an empty entry for `name` so that references resolve independently
    /// of the order the rules are visited in.
    pub(crate) fn seed<S: Into<String>>(&mut self, name: S) {
        self.entries.entry(name.into()).or_default();
    }

    /// Record that `referenced_from` refers to `symbol`.
    pub(crate) fn record_reference<S: Into<String>>(&mut self, symbol: S, referenced_from: &str) {
        self.entries
            .entry(symbol.into())
            .or_default()
            .referenced_by
            .insert(referenced_from.to_string());
    }

    /// Record where the declaration of `name` was emitted. The first location wins.
    pub(crate) fn record_declaration(&mut self, name: &str, item: ItemId) {
        let entry = self.entries.entry(name.to_string()).or_default();

        if entry.declaration.is_none() {
            entry.declaration = Some(item);
        }
    }

    /// Whether anything refers to `name` so far.
    pub(crate) fn is_referenced(&self, name: &str) -> bool {
        match self.entries.get(name) {
            Some(entry) => !entry.referenced_by.is_empty(),
            None => false,
        }
    }

    /// Append a usages block to every declaration that has a non-empty reference set.
    pub(crate) fn annotate(self, doc: &mut Document) {
        for entry in self.entries.into_values() {
            let item = match entry.declaration {
                Some(item) => item,
                None => continue,
            };

            if entry.referenced_by.is_empty() {
                continue;
            }

            let usages = entry.referenced_by.into_iter().sorted().collect();
            doc.item_mut(item).set_usages(usages);
        }
    }
}
