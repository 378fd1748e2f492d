//! Static validation of a document against its library.
//!
//! Catches at authoring time what would otherwise surface as roll-time
//! errors: dangling references, pools nothing can be selected from, and a
//! few well-known authoring smells (negative weights, duplicate entry ids,
//! inheritance chains past the depth bound).

use std::collections::HashSet;
use std::fmt;

use tw_core::{Table, TableDocument, TableKind};

use crate::expand::references;
use crate::inherit::{MAX_INHERIT_DEPTH, effective_entries, entry_count};
use crate::lookup::TableLookup;
use crate::weight::{entry_weight, source_weight, total_weight};

/// A problem found during validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// The table or template the issue was found on.
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Validate one document in the context of its library.
///
/// `collection` is the slug the document is loaded under; cross-collection
/// references are resolved through `lookup`. Returns every issue found —
/// an empty list means the document rolls cleanly.
pub fn validate_document(
    doc: &TableDocument,
    collection: &str,
    lookup: &dyn TableLookup,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut referenced: HashSet<String> = HashSet::new();

    for table in doc.tables() {
        let subject = format!("table \"{}\"", table.id);

        validate_extends(table, collection, lookup, &subject, &mut issues, &mut referenced);

        match &table.kind {
            TableKind::Simple { .. } => {
                validate_entries(table, collection, lookup, &subject, &mut issues, &mut referenced);
            }
            TableKind::Composite { sources } => {
                if sources.is_empty() {
                    issues.push(ValidationIssue::error(&subject, "has no sources"));
                }
                for source in sources {
                    referenced.insert(source.table_id.clone());
                    if lookup.table(collection, &source.table_id).is_none() {
                        issues.push(ValidationIssue::error(
                            &subject,
                            format!("source references unknown table \"{}\"", source.table_id),
                        ));
                    }
                    if source.weight.is_some_and(|w| w < 0.0) {
                        issues.push(ValidationIssue::warning(
                            &subject,
                            format!(
                                "source \"{}\" has negative weight; treated as 1",
                                source.table_id
                            ),
                        ));
                    }
                }
                if !sources.is_empty() && total_weight(sources, source_weight) <= 0.0 {
                    issues.push(ValidationIssue::error(
                        &subject,
                        "all sources have weight 0",
                    ));
                }
            }
            TableKind::Collection { members } => {
                if members.is_empty() {
                    issues.push(ValidationIssue::error(&subject, "has no members"));
                }
                let mut counts = Vec::new();
                for member_id in members {
                    referenced.insert(member_id.clone());
                    match lookup.table(collection, member_id) {
                        Some(member) => {
                            if let Ok(count) = entry_count(member, collection, lookup) {
                                counts.push(count);
                            }
                        }
                        None => issues.push(ValidationIssue::error(
                            &subject,
                            format!("member references unknown table \"{member_id}\""),
                        )),
                    }
                }
                if !members.is_empty()
                    && counts.len() == members.len()
                    && counts.iter().all(|c| *c == 0)
                {
                    issues.push(ValidationIssue::error(&subject, "all members are empty"));
                }
            }
        }
    }

    for template in doc.templates() {
        let subject = format!("template \"{}\"", template.id);
        validate_references(&template.text, collection, lookup, &subject, &mut issues, &mut referenced);
    }

    for table in doc.tables() {
        if table.hidden && !referenced.contains(&table.id) {
            issues.push(ValidationIssue::warning(
                format!("table \"{}\"", table.id),
                "is hidden but never referenced",
            ));
        }
    }

    issues
}

fn validate_extends(
    table: &Table,
    collection: &str,
    lookup: &dyn TableLookup,
    subject: &str,
    issues: &mut Vec<ValidationIssue>,
    referenced: &mut HashSet<String>,
) {
    let mut current = table;
    let mut hops = 0;
    while let Some(parent_id) = &current.extends {
        referenced.insert(parent_id.clone());
        if hops >= MAX_INHERIT_DEPTH {
            issues.push(ValidationIssue::warning(
                subject,
                format!(
                    "inheritance chain exceeds {MAX_INHERIT_DEPTH} hops; deeper entries are ignored"
                ),
            ));
            return;
        }
        match lookup.table(collection, parent_id) {
            Some(parent) => {
                current = parent;
                hops += 1;
            }
            None => {
                issues.push(ValidationIssue::error(
                    subject,
                    format!("extends unknown table \"{parent_id}\""),
                ));
                return;
            }
        }
    }
}

fn validate_entries(
    table: &Table,
    collection: &str,
    lookup: &dyn TableLookup,
    subject: &str,
    issues: &mut Vec<ValidationIssue>,
    referenced: &mut HashSet<String>,
) {
    let mut seen = HashSet::new();
    for entry in table.own_entries() {
        if !seen.insert(entry.id.as_str()) {
            issues.push(ValidationIssue::warning(
                subject,
                format!("duplicate entry id \"{}\"", entry.id),
            ));
        }
        if entry.weight.is_some_and(|w| w < 0.0) {
            issues.push(ValidationIssue::warning(
                subject,
                format!("entry \"{}\" has negative weight; treated as 1", entry.id),
            ));
        }
        validate_references(&entry.value, collection, lookup, subject, issues, referenced);
    }

    // Pool checks run on the effective entry set so a child table that only
    // inherits entries still validates. Skip when the chain is broken —
    // the dangling extends is already reported.
    if let Ok(effective) = effective_entries(table, collection, lookup) {
        if effective.is_empty() {
            issues.push(ValidationIssue::error(subject, "has no entries"));
        } else if total_weight(&effective, entry_weight) <= 0.0 {
            issues.push(ValidationIssue::error(subject, "all entries have weight 0"));
        }
    }
}

fn validate_references(
    text: &str,
    collection: &str,
    lookup: &dyn TableLookup,
    subject: &str,
    issues: &mut Vec<ValidationIssue>,
    referenced: &mut HashSet<String>,
) {
    for reference in references(text) {
        let target_collection = reference.collection.as_deref().unwrap_or(collection);
        if reference.collection.is_none() || reference.collection.as_deref() == Some(collection) {
            referenced.insert(reference.id.clone());
        }
        let found = lookup.table(target_collection, &reference.id).is_some()
            || lookup.template(target_collection, &reference.id).is_some();
        if !found {
            let shown = match &reference.collection {
                Some(qualifier) => format!("{qualifier}:{}", reference.id),
                None => reference.id.clone(),
            };
            issues.push(ValidationIssue::error(
                subject,
                format!("references unknown id \"{shown}\""),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_core::{DocumentMeta, Entry, SourceRef, Template};

    fn doc(tables: Vec<Table>, templates: Vec<Template>) -> TableDocument {
        let mut d = TableDocument::new(DocumentMeta::new("Test"));
        for t in tables {
            d.add_table(t).unwrap();
        }
        for t in templates {
            d.add_template(t).unwrap();
        }
        d
    }

    fn errors(issues: &[ValidationIssue]) -> Vec<&ValidationIssue> {
        issues.iter().filter(|i| i.is_error).collect()
    }

    #[test]
    fn clean_document_has_no_issues() {
        let d = doc(
            vec![
                Table::simple("weapons", "Weapons", vec![Entry::new("a", "Sword")]),
                Table::composite("loot", "Loot", vec![SourceRef::new("weapons")]),
                Table::collection("all", "All", vec!["weapons".into()]),
            ],
            vec![Template::new("hook", "Hook", "You find a {{loot}}.")],
        );
        let issues = validate_document(&d, "c", &d);
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn dangling_extends_is_error() {
        let d = doc(
            vec![Table::simple("t", "T", vec![Entry::new("a", "x")]).with_extends("ghost")],
            vec![],
        );
        let issues = validate_document(&d, "c", &d);
        assert_eq!(errors(&issues).len(), 1);
        assert!(issues[0].message.contains("extends unknown table \"ghost\""));
    }

    #[test]
    fn deep_chain_warns_about_truncation() {
        let mut tables = Vec::new();
        for i in 0..8 {
            let mut t = Table::simple(format!("t{i}"), format!("T{i}"), vec![Entry::new("e", "v")]);
            if i < 7 {
                t = t.with_extends(format!("t{}", i + 1));
            }
            tables.push(t);
        }
        let d = doc(tables, vec![]);
        let issues = validate_document(&d, "c", &d);
        let truncations: Vec<_> = issues
            .iter()
            .filter(|i| !i.is_error && i.message.contains("inheritance chain"))
            .collect();
        assert!(!truncations.is_empty());
        assert!(truncations[0].subject.contains("t0"));
    }

    #[test]
    fn empty_simple_table_is_error() {
        let d = doc(vec![Table::simple("empty", "Empty", vec![])], vec![]);
        let issues = validate_document(&d, "c", &d);
        assert!(issues.iter().any(|i| i.is_error && i.message == "has no entries"));
    }

    #[test]
    fn all_zero_weights_is_error() {
        let d = doc(
            vec![Table::simple(
                "zeros",
                "Zeros",
                vec![Entry::new("a", "x").with_weight(0.0)],
            )],
            vec![],
        );
        let issues = validate_document(&d, "c", &d);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message == "all entries have weight 0")
        );
    }

    #[test]
    fn inherited_entries_satisfy_pool_check() {
        let d = doc(
            vec![
                Table::simple("base", "Base", vec![Entry::new("a", "x")]),
                Table::simple("child", "Child", vec![]).with_extends("base"),
            ],
            vec![],
        );
        let issues = validate_document(&d, "c", &d);
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn duplicate_entry_ids_warn() {
        let d = doc(
            vec![Table::simple(
                "t",
                "T",
                vec![Entry::new("a", "x"), Entry::new("a", "y")],
            )],
            vec![],
        );
        let issues = validate_document(&d, "c", &d);
        assert!(
            issues
                .iter()
                .any(|i| !i.is_error && i.message.contains("duplicate entry id"))
        );
    }

    #[test]
    fn negative_weight_warns() {
        let d = doc(
            vec![Table::simple(
                "t",
                "T",
                vec![Entry::new("a", "x").with_weight(-1.0), Entry::new("b", "y")],
            )],
            vec![],
        );
        let issues = validate_document(&d, "c", &d);
        assert!(
            issues
                .iter()
                .any(|i| !i.is_error && i.message.contains("negative weight"))
        );
    }

    #[test]
    fn unknown_reference_in_entry_value_is_error() {
        let d = doc(
            vec![Table::simple("t", "T", vec![Entry::new("a", "a {{ghost}}")])],
            vec![],
        );
        let issues = validate_document(&d, "c", &d);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message.contains("references unknown id \"ghost\""))
        );
    }

    #[test]
    fn unknown_reference_in_template_is_error() {
        let d = doc(vec![], vec![Template::new("hook", "Hook", "{{ghost}}")]);
        let issues = validate_document(&d, "c", &d);
        assert_eq!(errors(&issues).len(), 1);
        assert!(issues[0].subject.contains("hook"));
    }

    #[test]
    fn empty_composite_and_collection_are_errors() {
        let d = doc(
            vec![
                Table::composite("comp", "Comp", vec![]),
                Table::collection("coll", "Coll", vec![]),
            ],
            vec![],
        );
        let issues = validate_document(&d, "c", &d);
        assert!(issues.iter().any(|i| i.is_error && i.message == "has no sources"));
        assert!(issues.iter().any(|i| i.is_error && i.message == "has no members"));
    }

    #[test]
    fn collection_of_empty_members_is_error() {
        let d = doc(
            vec![
                Table::simple("e1", "E1", vec![]),
                Table::collection("coll", "Coll", vec!["e1".into()]),
            ],
            vec![],
        );
        let issues = validate_document(&d, "c", &d);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message == "all members are empty")
        );
    }

    #[test]
    fn hidden_unreferenced_table_warns() {
        let d = doc(
            vec![
                Table::simple("secret", "Secret", vec![Entry::new("a", "x")]).hidden(),
                Table::simple("used", "Used", vec![Entry::new("b", "y")]).hidden(),
                Table::composite("loot", "Loot", vec![SourceRef::new("used")]),
            ],
            vec![],
        );
        let issues = validate_document(&d, "c", &d);
        let hidden: Vec<_> = issues
            .iter()
            .filter(|i| i.message.contains("hidden but never referenced"))
            .collect();
        assert_eq!(hidden.len(), 1);
        assert!(hidden[0].subject.contains("secret"));
    }

    #[test]
    fn display_formats_level_and_subject() {
        let issue = ValidationIssue::error("table \"t\"", "has no entries");
        assert_eq!(issue.to_string(), "error: table \"t\": has no entries");
    }
}
