//! Import bookkeeping across every scanned file

use crate::{
    error::{Error, ImportConflict, Result},
    parser::{CompilationUnit, unquote},
    types::ImportEntry,
};
use std::collections::HashMap;
use tracing::debug;
use unicode_general_category::{GeneralCategory, get_general_category};

const ILLEGAL_PATH_CHARS: &str = "!\"#$%&'()*,:;<=>?[\\]^`{|}\u{FFFD}";

/// Accumulates imports from all method-bearing files and rejects inconsistent aliasing.
///
/// A path may only ever appear under one alias, and a non-empty alias may only ever name
/// one path. Entries added with [`ImportRegistry::add_manual`] are emitted first and take no
/// part in those checks.
#[derive(Debug, Default)]
pub struct ImportRegistry {
    manual: Vec<ImportEntry>,
    scanned: Vec<ImportEntry>,
    by_path: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always emitted, never checked for conflicts.
    pub fn add_manual(&mut self, alias: impl Into<String>, path: impl Into<String>) {
        self.manual.push(ImportEntry::new(alias, path));
    }

    /// Record one import of a file that contributed methods.
    pub fn register(&mut self, path: &str, alias: &str) -> Result<()> {
        if alias == "." {
            // Dot imports would need the imported package's exported names to know whether
            // the interface refers to them. Assume it does not and leave them out.
            debug!("Skipping dot import of {path:?}");
            return Ok(());
        }

        if let Some(&index) = self.by_path.get(path) {
            let existing = &self.scanned[index];
            if existing.alias != alias {
                return Err(ImportConflict::AliasMismatch {
                    path: path.to_string(),
                    existing: existing.alias.clone(),
                    requested: alias.to_string(),
                }
                .into());
            }
            return Ok(());
        }

        if !alias.is_empty() && self.by_alias.contains_key(alias) {
            return Err(ImportConflict::AliasInUse {
                alias: alias.to_string(),
                path: path.to_string(),
            }
            .into());
        }

        let index = self.scanned.len();
        self.scanned.push(ImportEntry::new(alias, path));
        self.by_path.insert(path.to_string(), index);
        if !alias.is_empty() {
            self.by_alias.insert(alias.to_string(), index);
        }
        Ok(())
    }

    /// Register every import spec of `unit`.
    pub fn register_unit(&mut self, unit: &CompilationUnit) -> Result<()> {
        for spec in unit.imports() {
            if spec.alias == "." {
                debug!("Skipping dot import {} in {}", spec.path_literal, unit.file());
                continue;
            }
            let path = unquote(spec.path_literal)
                .filter(|path| is_valid_import_path(path))
                .ok_or_else(|| Error::InvalidImport(spec.path_literal.to_string()))?;
            self.register(&path, spec.alias)?;
        }
        Ok(())
    }

    /// Manual entries in insertion order, then scanned entries in first-seen order.
    pub fn entries(&self) -> Vec<ImportEntry> {
        self.manual
            .iter()
            .chain(self.scanned.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.manual.len() + self.scanned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Import paths must be non-empty and made of graphic, non-space characters outside
/// `ILLEGAL_PATH_CHARS`.
pub fn is_valid_import_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| is_graphic(c) && !c.is_whitespace() && !ILLEGAL_PATH_CHARS.contains(c))
}

fn is_graphic(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}
