//! Gene-name resolution through canonical names, previous names, and
//! synonym tables.
//!
//! Gene sets and annotations routinely disagree about what a gene is
//! called: one file carries the current HGNC symbol, another a deprecated
//! name, a third a synonym. [`GeneNameResolver`] loads the tables once and
//! answers "what is the valid name for this identifier" through a strict
//! lookup cascade, recording enough diagnostics that a caller can report
//! exactly what was translated, guessed, or lost.

use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::GeneToolsError;
use crate::io::{InputFile, TsvRecord};

// HGNC-style synonym table column layout (0-based).
const HGNC_NAME_COLUMN: usize = 1;
const HGNC_PREVIOUS_COLUMN: usize = 6;
const HGNC_SYNONYM_COLUMN: usize = 8;

/// How a name was resolved to its canonical form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionKind {
    /// The name is already a valid canonical identifier.
    Direct,
    /// Translated through the old-to-new name map.
    OldName,
    /// Translated through the alias map.
    Alias,
    /// The alias mapped to an old name, which mapped to a valid one.
    AliasOldName,
    /// Last-resort prefix scan. Inherently ambiguous; callers should
    /// surface how often this fired.
    PrefixMatch,
}

/// A successful resolution: the canonical name and how it was reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub name: String,
    pub kind: ResolutionKind,
}

/// A rejected alias registration: `alias` was already claimed by `kept`
/// when `rejected` tried to claim it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasConflict {
    pub alias: String,
    pub kept: String,
    pub rejected: String,
}

/// Lookup tables mapping alternate gene identifiers to canonical ones.
///
/// Built once from the input tables, then read-only during resolution.
/// All maps are insertion-ordered, which makes the prefix-match fallback
/// deterministic across runs.
#[derive(Default)]
pub struct GeneNameResolver {
    canonical: IndexSet<String>,
    old_to_new: IndexMap<String, String>,
    new_to_old: IndexMap<String, String>,
    aliases: IndexMap<String, String>,
    conflicts: Vec<AliasConflict>,
}

impl GeneNameResolver {
    /// Build a resolver from a primary gene table and any number of
    /// HGNC-style synonym tables.
    pub fn build(
        gene_table: impl Into<PathBuf>,
        alias_tables: &[PathBuf],
    ) -> Result<Self, GeneToolsError> {
        let mut resolver = Self::from_gene_table(gene_table)?;
        for table in alias_tables {
            resolver.add_hgnc_table(table)?;
        }
        Ok(resolver)
    }

    /// Read the primary gene table: `geneId \t canonicalName [\t altName]`.
    /// The second column populates the canonical set; the optional third
    /// column is an alternate (previous) name for the same gene. Rows with
    /// no name column are skipped with a warning.
    pub fn from_gene_table(filepath: impl Into<PathBuf>) -> Result<Self, GeneToolsError> {
        let filepath = filepath.into();
        info!("reading gene table {}", filepath.display());

        let mut resolver = Self::default();
        for line in InputFile::new(&filepath).lines()? {
            let line = line?;
            let record = TsvRecord::parse(&line);
            let canonical = match record.field(1) {
                Some(name) if !name.is_empty() => name,
                _ => {
                    warn!("gene table row with no name skipped: '{}'", line);
                    continue;
                }
            };
            resolver.canonical.insert(canonical.to_string());
            if let Some(alt) = record.field(2).filter(|alt| !alt.is_empty()) {
                resolver
                    .old_to_new
                    .insert(alt.to_string(), canonical.to_string());
                resolver
                    .new_to_old
                    .insert(canonical.to_string(), alt.to_string());
            }
        }
        Ok(resolver)
    }

    /// Read an HGNC-style synonym table, registering every previous name
    /// and synonym as an alias of the row's current name. Rows missing the
    /// synonym columns are skipped.
    pub fn add_hgnc_table(&mut self, filepath: impl Into<PathBuf>) -> Result<(), GeneToolsError> {
        let filepath = filepath.into();
        info!("reading synonym table {}", filepath.display());

        for line in InputFile::new(&filepath).lines()? {
            let line = line?;
            let record = TsvRecord::parse(&line);
            let (Some(name), Some(previous), Some(synonyms)) = (
                record.field(HGNC_NAME_COLUMN),
                record.field(HGNC_PREVIOUS_COLUMN),
                record.field(HGNC_SYNONYM_COLUMN),
            ) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            for alias in previous.split(',').chain(synonyms.split(',')) {
                let alias = alias.trim();
                if !alias.is_empty() {
                    self.add_alias(alias, name);
                }
            }
        }
        Ok(())
    }

    /// Register one alias. The first registration of an alias wins: a later
    /// conflicting registration is recorded as a diagnostic and dropped.
    pub fn add_alias(&mut self, alias: &str, canonical: &str) {
        if let Some(existing) = self.aliases.get(alias) {
            if existing != canonical {
                warn!(
                    "alias '{}' already registered to '{}', ignoring '{}'",
                    alias, existing, canonical
                );
                self.conflicts.push(AliasConflict {
                    alias: alias.to_string(),
                    kept: existing.clone(),
                    rejected: canonical.to_string(),
                });
            }
            return;
        }
        self.aliases
            .insert(alias.to_string(), canonical.to_string());
    }

    /// Alias registrations that were rejected by the first-wins policy.
    pub fn conflicts(&self) -> &[AliasConflict] {
        &self.conflicts
    }

    /// Whether `name` is a currently valid canonical identifier.
    pub fn is_canonical(&self, name: &str) -> bool {
        self.canonical.contains(name)
    }

    /// The previous name recorded for a canonical identifier, for callers
    /// translating toward older annotations instead of newer ones.
    pub fn previous_name(&self, name: &str) -> Option<&str> {
        self.new_to_old.get(name).map(String::as_str)
    }

    /// Resolve a name to its canonical identifier, first match wins:
    ///
    /// 1. the name itself is canonical;
    /// 2. the old-to-new map yields a canonical name;
    /// 3. the alias map yields a canonical name;
    /// 4. the alias map yields an old name whose new name is canonical;
    /// 5. prefix fallback over canonical names, then old names, in
    ///    insertion order;
    /// 6. otherwise, `None`.
    pub fn resolve(&self, name: &str) -> Option<Resolved> {
        if name.is_empty() {
            return None;
        }
        if self.canonical.contains(name) {
            return Some(Resolved {
                name: name.to_string(),
                kind: ResolutionKind::Direct,
            });
        }
        if let Some(new_name) = self.old_to_new.get(name) {
            if self.canonical.contains(new_name) {
                return Some(Resolved {
                    name: new_name.clone(),
                    kind: ResolutionKind::OldName,
                });
            }
        }
        if let Some(target) = self.aliases.get(name) {
            if self.canonical.contains(target) {
                return Some(Resolved {
                    name: target.clone(),
                    kind: ResolutionKind::Alias,
                });
            }
            // the alias points at an old name; chase it one more step
            if let Some(new_name) = self.old_to_new.get(target) {
                if self.canonical.contains(new_name) {
                    return Some(Resolved {
                        name: new_name.clone(),
                        kind: ResolutionKind::AliasOldName,
                    });
                }
            }
        }
        for candidate in &self.canonical {
            if candidate.starts_with(name) {
                return Some(Resolved {
                    name: candidate.clone(),
                    kind: ResolutionKind::PrefixMatch,
                });
            }
        }
        for (old_name, new_name) in &self.old_to_new {
            if old_name.starts_with(name) {
                return Some(Resolved {
                    name: new_name.clone(),
                    kind: ResolutionKind::PrefixMatch,
                });
            }
        }
        None
    }
}

/// Per-group resolution diagnostics: how many names resolved, how many were
/// rewritten, how many fell through to the ambiguous prefix scan, and the
/// full before → after mapping.
#[derive(Debug, Default)]
pub struct ResolutionSummary {
    pub group: String,
    pub total: usize,
    pub unresolved: usize,
    pub replaced: usize,
    pub prefix_fallbacks: usize,
    /// before → after; `None` means the name was dropped.
    pub changes: Vec<(String, Option<String>)>,
}

impl ResolutionSummary {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            ..Self::default()
        }
    }

    /// Record one name's resolution outcome.
    pub fn record(&mut self, name: &str, resolved: Option<&Resolved>) {
        self.total += 1;
        match resolved {
            None => {
                self.unresolved += 1;
                self.changes.push((name.to_string(), None));
            }
            Some(resolved) => {
                if resolved.kind == ResolutionKind::PrefixMatch {
                    self.prefix_fallbacks += 1;
                }
                if resolved.name != name {
                    self.replaced += 1;
                    self.changes
                        .push((name.to_string(), Some(resolved.name.clone())));
                }
            }
        }
    }

    /// Whether anything in this group needs reporting.
    pub fn has_issues(&self) -> bool {
        self.unresolved > 0 || self.replaced > 0
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * count as f64 / self.total as f64
        }
    }
}

impl fmt::Display for ResolutionSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.group)?;
        writeln!(
            f,
            "\tUnresolved      : {} ( {:.1}% )",
            self.unresolved,
            self.percent(self.unresolved)
        )?;
        writeln!(
            f,
            "\tReplaced        : {} ( {:.1}% )",
            self.replaced,
            self.percent(self.replaced)
        )?;
        writeln!(f, "\tPrefix fallbacks: {}", self.prefix_fallbacks)?;
        writeln!(f, "\tTotal           : {}", self.total)?;
        writeln!(f, "\tNames ( -> replacement ):")?;
        for (before, after) in &self.changes {
            match after {
                Some(after) => writeln!(f, "\t\t'{}'\t->\t'{}'", before, after)?,
                None => writeln!(f, "\t\t'{}'", before)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{GeneNameResolver, ResolutionKind, ResolutionSummary};
    use crate::test_utilities::temp_text;

    /// canonical: TP53, BRCA2, KRAS (KRAS was once KRAS2); MYCL renamed from MYCL1
    fn test_resolver() -> GeneNameResolver {
        let gene_table = temp_text(
            "ENSG001\tTP53\n\
             ENSG002\tBRCA2\tFACD\n\
             ENSG003\tKRAS\tKRAS2\n\
             ENSG004\tMYCL\tMYCL1\n",
        );
        let mut resolver = GeneNameResolver::from_gene_table(gene_table.path()).unwrap();
        resolver.add_alias("P53", "TP53");
        resolver.add_alias("FANCD1", "BRCA2");
        // an alias pointing at an old name, resolvable one step further
        resolver.add_alias("LMYC", "MYCL1");
        resolver
    }

    #[test]
    fn direct_hit_is_idempotent() {
        let resolver = test_resolver();
        let resolved = resolver.resolve("TP53").unwrap();
        assert_eq!(resolved.name, "TP53");
        assert_eq!(resolved.kind, ResolutionKind::Direct);
    }

    #[test]
    fn previous_name_inverts_the_rename() {
        let resolver = test_resolver();
        assert_eq!(resolver.previous_name("KRAS"), Some("KRAS2"));
        assert_eq!(resolver.previous_name("TP53"), None);
    }

    #[test]
    fn old_name_translates() {
        let resolver = test_resolver();
        let resolved = resolver.resolve("KRAS2").unwrap();
        assert_eq!(resolved.name, "KRAS");
        assert_eq!(resolved.kind, ResolutionKind::OldName);
    }

    #[test]
    fn alias_translates() {
        let resolver = test_resolver();
        let resolved = resolver.resolve("P53").unwrap();
        assert_eq!(resolved.name, "TP53");
        assert_eq!(resolved.kind, ResolutionKind::Alias);
    }

    #[test]
    fn alias_of_old_name_chains() {
        let resolver = test_resolver();
        let resolved = resolver.resolve("LMYC").unwrap();
        assert_eq!(resolved.name, "MYCL");
        assert_eq!(resolved.kind, ResolutionKind::AliasOldName);
    }

    #[test]
    fn prefix_fallback_is_flagged_and_deterministic() {
        let resolver = test_resolver();
        // "BRCA" is neither canonical nor aliased; BRCA2 is the only
        // canonical name with that prefix
        let resolved = resolver.resolve("BRCA").unwrap();
        assert_eq!(resolved.name, "BRCA2");
        assert_eq!(resolved.kind, ResolutionKind::PrefixMatch);

        // canonical names are scanned before old names; probe with a
        // strict prefix of both KRAS (canonical) and KRAS2 (old)
        let resolved = resolver.resolve("KRA").unwrap();
        assert_eq!(resolved.name, "KRAS");
    }

    #[test]
    fn unknown_and_empty_names_do_not_resolve() {
        let resolver = test_resolver();
        assert!(resolver.resolve("NO_SUCH_GENE").is_none());
        assert!(resolver.resolve("").is_none());
    }

    #[test]
    fn alias_conflicts_keep_first_registration() {
        let mut resolver = test_resolver();
        resolver.add_alias("X", "TP53");
        resolver.add_alias("X", "BRCA2");

        let resolved = resolver.resolve("X").unwrap();
        assert_eq!(resolved.name, "TP53");

        let conflicts = resolver.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].alias, "X");
        assert_eq!(conflicts[0].kept, "TP53");
        assert_eq!(conflicts[0].rejected, "BRCA2");
    }

    #[test]
    fn duplicate_alias_registration_is_not_a_conflict() {
        let mut resolver = test_resolver();
        resolver.add_alias("P53", "TP53");
        assert!(resolver.conflicts().is_empty());
    }

    #[test]
    fn hgnc_table_registers_previous_names_and_synonyms() {
        let gene_table = temp_text("ENSG001\tTP53\n");
        let mut resolver = GeneNameResolver::from_gene_table(gene_table.path()).unwrap();

        // columns: 1 = symbol, 6 = previous names, 8 = synonyms
        let hgnc = temp_text(
            "HGNC:11998\tTP53\tx\tx\tx\tx\tLFS1, TRP53\tx\tp53\n\
             short\trow\n",
        );
        resolver.add_hgnc_table(hgnc.path()).unwrap();

        assert_eq!(resolver.resolve("LFS1").unwrap().name, "TP53");
        assert_eq!(resolver.resolve("TRP53").unwrap().name, "TP53");
        assert_eq!(resolver.resolve("p53").unwrap().name, "TP53");
    }

    #[test]
    fn summary_tracks_counts_and_changes() {
        let resolver = test_resolver();
        let mut summary = ResolutionSummary::new("set1");
        for name in ["TP53", "KRAS2", "NO_SUCH_GENE", "BRCA"] {
            let resolved = resolver.resolve(name);
            summary.record(name, resolved.as_ref());
        }

        assert_eq!(summary.total, 4);
        assert_eq!(summary.unresolved, 1);
        assert_eq!(summary.replaced, 2); // KRAS2 -> KRAS, BRCA -> BRCA2
        assert_eq!(summary.prefix_fallbacks, 1);
        assert!(summary.has_issues());

        let rendered = summary.to_string();
        assert!(rendered.contains("'KRAS2'\t->\t'KRAS'"));
        assert!(rendered.contains("'NO_SUCH_GENE'"));
        assert!(rendered.contains("( 25.0% )"));
    }
}
