//! Declaration index: which file declares which symbol.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use swiftdep_parser_api::{is_extension, SymbolUsage};

/// A symbol declared by more than one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    /// The contested name
    pub symbol: String,
    /// File that keeps the symbol (first seen)
    pub owner: String,
    /// File whose declaration was ignored for resolution
    pub shadowed: String,
}

/// Two coupled maps built once per analysis run:
/// `file -> declared symbols` and `symbol -> declaring file`.
///
/// The second map is first-writer-wins: a symbol keeps the first file that declared
/// it in insertion order, later declarations are recorded as [`Collision`]s.
/// `extension:Name` markers are kept in the per-file sets but never own a symbol.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    declared: BTreeMap<String, BTreeSet<String>>,
    owners: BTreeMap<String, String>,
    collisions: Vec<Collision>,
}

impl DeclarationIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the declarations of one file.
    pub fn insert<I, S>(&mut self, file: &str, symbols: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let declared = self.declared.entry(file.to_string()).or_default();
        for symbol in symbols {
            let symbol = symbol.into();
            if !is_extension(&symbol) {
                match self.owners.get(&symbol) {
                    None => {
                        self.owners.insert(symbol.clone(), file.to_string());
                    }
                    Some(owner) if owner != file => {
                        debug!("Symbol {symbol} declared in {owner} and {file}; keeping {owner}");
                        self.collisions.push(Collision {
                            symbol: symbol.clone(),
                            owner: owner.clone(),
                            shadowed: file.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
            declared.insert(symbol);
        }
    }

    /// Symbols declared by `file`, extension markers included.
    pub fn declared_in(&self, file: &str) -> Option<&BTreeSet<String>> {
        self.declared.get(file)
    }

    /// Whether `file` declares `symbol`.
    pub fn declares(&self, file: &str, symbol: &str) -> bool {
        self.declared
            .get(file)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// The file owning `symbol`.
    pub fn owner(&self, symbol: &str) -> Option<&str> {
        self.owners.get(symbol).map(String::as_str)
    }

    /// Declaring file for a usage, resolved by the part before the first `.`.
    pub fn resolve(&self, usage: &SymbolUsage) -> Option<&str> {
        self.owner(usage.base())
    }

    /// Every first-writer-wins decision that discarded a declaration.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Number of resolvable symbols.
    pub fn symbol_count(&self) -> usize {
        self.owners.len()
    }

    /// Number of indexed files.
    pub fn file_count(&self) -> usize {
        self.declared.len()
    }
}
