use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::FindingRecord;

/// Group key for findings without a usable product name.
pub const NO_PRODUCT_KEY: &str = "No Product Mentioned";
/// Group key the server uses for rows it failed to analyze.
pub const ERROR_KEY: &str = "ERROR";
pub const NOT_AVAILABLE: &str = "N/A";
/// Pin-cite pages with this prefix identify DOCX chunks rather than PDF pages.
pub const DOCX_CHUNK_PREFIX: &str = "DOCX_Chunk_";
pub const RESULTS_HEADING: &str = "Analysis Results:";

/// Labels of the four per-finding fields, in display order.
pub const FIELD_LABELS: [&str; 4] = [
    "Allegation Category",
    "Specific Allegation Summary",
    "Involved Defendants/Co-Conspirators",
    "Pin Cite",
];

/// Normalized product key of a finding.
pub fn product_key(record: &FindingRecord) -> String {
    match &record.product_name {
        Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_string(),
        _ => NO_PRODUCT_KEY.to_string(),
    }
}

fn key_rank(key: &str) -> u8 {
    match key {
        NO_PRODUCT_KEY => 1,
        ERROR_KEY => 2,
        _ => 0,
    }
}

/// Normal keys ascend lexicographically, then "No Product Mentioned", then "ERROR".
pub fn compare_group_keys(a: &str, b: &str) -> Ordering {
    key_rank(a).cmp(&key_rank(b)).then_with(|| a.cmp(b))
}

/// Text of a loosely typed field, or `None` when the value counts as absent.
fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

fn field_or_placeholder(value: Option<&Value>) -> String {
    field_text(value).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Citation text: DOCX chunk ids verbatim, PDF pages as `p. N`, with an optional paragraph.
pub fn format_pin_cite(page: Option<&Value>, paragraph: Option<&Value>) -> String {
    let Some(page) = field_text(page).filter(|page| page != NOT_AVAILABLE) else {
        return NOT_AVAILABLE.to_string();
    };
    let mut cite = if page.starts_with(DOCX_CHUNK_PREFIX) {
        page
    } else {
        format!("p. {page}")
    };
    if let Some(paragraph) = field_text(paragraph).filter(|p| p != NOT_AVAILABLE) {
        cite.push_str(", ¶");
        cite.push_str(&paragraph);
    }
    cite
}

/// Display strings of one finding, in [`FIELD_LABELS`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingView {
    pub category: String,
    pub summary: String,
    pub involved_parties: String,
    pub pin_cite: String,
}

impl FindingView {
    pub fn from_record(record: &FindingRecord) -> Self {
        Self {
            category: field_or_placeholder(record.allegation_category.as_ref()),
            summary: field_or_placeholder(record.allegation_summary.as_ref()),
            involved_parties: field_or_placeholder(record.involved_parties.as_ref()),
            pin_cite: format_pin_cite(
                record.pin_cite_page.as_ref(),
                record.pin_cite_paragraph.as_ref(),
            ),
        }
    }

    pub fn labeled(&self) -> [(&'static str, &str); 4] {
        [
            (FIELD_LABELS[0], self.category.as_str()),
            (FIELD_LABELS[1], self.summary.as_str()),
            (FIELD_LABELS[2], self.involved_parties.as_str()),
            (FIELD_LABELS[3], self.pin_cite.as_str()),
        ]
    }
}

/// Direction of a section's toggle glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleGlyph {
    /// Section body hidden.
    ChevronDown,
    /// Section body visible.
    ChevronUp,
}

/// Collapsible section holding every finding that shares a product key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingGroup {
    key: String,
    findings: Vec<FindingRecord>,
    expanded: bool,
}

impl FindingGroup {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn findings(&self) -> &[FindingRecord] {
        &self.findings
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn glyph(&self) -> ToggleGlyph {
        if self.expanded {
            ToggleGlyph::ChevronUp
        } else {
            ToggleGlyph::ChevronDown
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}

/// Findings grouped by product key, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedFindings {
    groups: Vec<FindingGroup>,
}

impl GroupedFindings {
    /// Groups records by product key; input order is preserved within each group.
    /// Every section starts collapsed.
    pub fn from_records(records: Vec<FindingRecord>) -> Self {
        let mut by_key: BTreeMap<String, Vec<FindingRecord>> = BTreeMap::new();
        for record in records {
            by_key.entry(product_key(&record)).or_default().push(record);
        }
        let mut groups: Vec<FindingGroup> = by_key
            .into_iter()
            .map(|(key, findings)| FindingGroup {
                key,
                findings,
                expanded: false,
            })
            .collect();
        groups.sort_by(|a, b| compare_group_keys(&a.key, &b.key));
        Self { groups }
    }

    pub fn groups(&self) -> &[FindingGroup] {
        &self.groups
    }

    pub fn keys(&self) -> Vec<&str> {
        self.groups.iter().map(|group| group.key()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Flips one section; other sections are untouched. Returns false for an unknown index.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.groups.get_mut(index) {
            Some(group) => {
                group.toggle();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{field_text, product_key, NO_PRODUCT_KEY};
    use crate::FindingRecord;

    #[test]
    fn falsy_values_count_as_absent() {
        assert_eq!(field_text(Some(&json!(""))), None);
        assert_eq!(field_text(Some(&json!(0))), None);
        assert_eq!(field_text(Some(&json!(false))), None);
        assert_eq!(field_text(Some(&json!(12))), Some("12".to_string()));
        assert_eq!(field_text(Some(&json!("x"))), Some("x".to_string()));
    }

    #[test]
    fn whitespace_and_non_string_products_fall_back_to_sentinel() {
        let blank = FindingRecord::from(json!({"Product_Name": "   "}));
        let numeric = FindingRecord::from(json!({"Product_Name": 42}));
        let padded = FindingRecord::from(json!({"Product_Name": "  Widget  "}));

        assert_eq!(product_key(&blank), NO_PRODUCT_KEY);
        assert_eq!(product_key(&numeric), NO_PRODUCT_KEY);
        assert_eq!(product_key(&padded), "Widget");
    }
}
