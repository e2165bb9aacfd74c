//! Record grouper
//!
//! Partitions expense records with attached receipts into groups keyed by
//! (year-month, type). Group order preserves the first appearance of each
//! key so downstream processing is deterministic.

use indexmap::IndexMap;

use crate::models::ExpenseRecord;

/// Type label used for records that carry no expense type
pub const DEFAULT_TYPE: &str = "Other";

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Derived key identifying one output sheet: exact match on both components
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    /// "YYYY-MM"
    pub year_month: String,
    /// Case-sensitive type label
    pub expense_type: String,
}

impl GroupKey {
    /// Derive the key for a record
    pub fn for_record(record: &ExpenseRecord) -> Self {
        Self {
            year_month: record.year_month(),
            expense_type: record
                .expense_type
                .clone()
                .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
        }
    }

    /// Sheet title, e.g. "Mar 2024 - TRAVEL"
    pub fn title(&self) -> String {
        let (year, month) = self
            .year_month
            .split_once('-')
            .unwrap_or((self.year_month.as_str(), ""));
        let month_name = month
            .parse::<usize>()
            .ok()
            .and_then(|m| MONTH_NAMES.get(m.wrapping_sub(1)))
            .copied()
            .unwrap_or("?");
        format!("{} {} - {}", month_name, year, self.expense_type.to_uppercase())
    }

    /// Deterministic output file name, e.g. "expenses-2024-03-Travel.pdf"
    pub fn document_name(&self) -> String {
        format!("expenses-{}-{}.pdf", self.year_month, self.expense_type)
    }
}

/// One (month, type) group of records destined for a single sheet
#[derive(Debug, Clone)]
pub struct Group {
    pub key: GroupKey,
    /// Members in store order; the composer sorts by date before layout
    pub members: Vec<ExpenseRecord>,
}

/// Partition records into sheet groups
///
/// Records without a receipt reference are excluded. Every remaining record
/// lands in exactly one group; keys appear in first-seen order. An empty
/// input produces an empty map.
pub fn group_receipts(records: &[ExpenseRecord]) -> IndexMap<GroupKey, Group> {
    let mut groups: IndexMap<GroupKey, Group> = IndexMap::new();

    for record in records.iter().filter(|r| r.has_receipt()) {
        let key = GroupKey::for_record(record);
        groups
            .entry(key.clone())
            .or_insert_with(|| Group {
                key,
                members: Vec::new(),
            })
            .members
            .push(record.clone());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;

    fn record(expense_type: Option<&str>, date: &str, receipt: Option<&str>) -> ExpenseRecord {
        let mut r = NewExpense::validate("10.00", expense_type.unwrap_or("placeholder"), None, Some(date))
            .unwrap()
            .into_record();
        r.expense_type = expense_type.map(str::to_string);
        r.receipt_path = receipt.map(str::to_string);
        r
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        assert!(group_receipts(&[]).is_empty());
    }

    #[test]
    fn test_records_without_receipts_are_excluded() {
        let records = vec![
            record(Some("Travel"), "2024-03-05", None),
            record(Some("Travel"), "2024-03-06", Some("/receipts/a.jpg")),
        ];
        let groups = group_receipts(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members.len(), 1);
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let records = vec![
            record(Some("Travel"), "2024-03-05", Some("/receipts/a.jpg")),
            record(Some("Meals"), "2024-03-06", Some("/receipts/b.jpg")),
            record(Some("Travel"), "2024-03-07", Some("/receipts/c.jpg")),
            record(Some("Travel"), "2024-04-01", Some("/receipts/d.jpg")),
        ];
        let groups = group_receipts(&records);

        assert_eq!(groups.len(), 3);
        let total: usize = groups.values().map(|g| g.members.len()).sum();
        assert_eq!(total, 4);

        let travel_march = &groups[&GroupKey {
            year_month: "2024-03".into(),
            expense_type: "Travel".into(),
        }];
        assert_eq!(travel_march.members.len(), 2);
    }

    #[test]
    fn test_first_seen_key_order_is_preserved() {
        let records = vec![
            record(Some("Meals"), "2024-03-05", Some("/receipts/a.jpg")),
            record(Some("Travel"), "2024-03-06", Some("/receipts/b.jpg")),
            record(Some("Meals"), "2024-03-07", Some("/receipts/c.jpg")),
        ];
        let groups = group_receipts(&records);
        let keys: Vec<&str> = groups.keys().map(|k| k.expense_type.as_str()).collect();
        assert_eq!(keys, ["Meals", "Travel"]);
    }

    #[test]
    fn test_missing_type_defaults_to_other() {
        let records = vec![record(None, "2024-03-05", Some("/receipts/a.jpg"))];
        let groups = group_receipts(&records);
        assert_eq!(groups.keys().next().unwrap().expense_type, DEFAULT_TYPE);
    }

    #[test]
    fn test_type_match_is_case_sensitive() {
        let records = vec![
            record(Some("travel"), "2024-03-05", Some("/receipts/a.jpg")),
            record(Some("Travel"), "2024-03-06", Some("/receipts/b.jpg")),
        ];
        assert_eq!(group_receipts(&records).len(), 2);
    }

    #[test]
    fn test_title_and_document_name() {
        let key = GroupKey {
            year_month: "2024-03".into(),
            expense_type: "Travel".into(),
        };
        assert_eq!(key.title(), "Mar 2024 - TRAVEL");
        assert_eq!(key.document_name(), "expenses-2024-03-Travel.pdf");
    }
}
