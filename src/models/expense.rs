//! Expense record model
//!
//! Represents a single expense with an optional attached receipt image.
//! Field names on the wire match the JSON the storage layer has always used
//! (`type`, `receiptPath`, `createdAt`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::Money;

use crate::error::{ExpenseError, ExpenseResult};

/// A single expense record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent (non-negative; enforced at ingestion)
    pub amount: Money,

    /// Expense type/category label, e.g. "Travel" or "Meals".
    /// Absent types are grouped under a literal "Other" by the sheet
    /// composer; the add command independently requires one.
    #[serde(rename = "type")]
    pub expense_type: Option<String>,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Date the expense occurred
    pub date: NaiveDate,

    /// Opaque locator for the attached receipt image, if any.
    /// Records without one are excluded from sheet composition.
    #[serde(default)]
    pub receipt_path: Option<String>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl ExpenseRecord {
    /// The "YYYY-MM" month key this expense falls into
    pub fn year_month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Whether a receipt image is attached
    pub fn has_receipt(&self) -> bool {
        self.receipt_path.is_some()
    }
}

/// Validated input for creating an expense record
///
/// Raw CLI/API input is loosely typed; this resolves required and optional
/// fields exactly once at ingestion so the rest of the crate only ever sees
/// well-formed records.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: Money,
    pub expense_type: String,
    pub description: String,
    pub date: NaiveDate,
    pub receipt_path: Option<String>,
}

impl NewExpense {
    /// Validate raw input fields into a NewExpense
    ///
    /// Rules (matching the ingestion contract):
    /// - `amount` must parse and be non-negative
    /// - `expense_type` is required and non-empty
    /// - `date` must be a valid `YYYY-MM-DD` calendar date; defaults to today
    pub fn validate(
        amount: &str,
        expense_type: &str,
        description: Option<String>,
        date: Option<&str>,
    ) -> ExpenseResult<Self> {
        let amount = Money::parse(amount)
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        if amount.is_negative() {
            return Err(ExpenseError::Validation(format!(
                "Amount must be non-negative, got {}",
                amount
            )));
        }

        let expense_type = expense_type.trim();
        if expense_type.is_empty() {
            return Err(ExpenseError::Validation(
                "Expense type is required".to_string(),
            ));
        }

        let date = match date {
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                ExpenseError::Validation(format!("Invalid date (expected YYYY-MM-DD): {}", s))
            })?,
            None => Utc::now().date_naive(),
        };

        Ok(Self {
            amount,
            expense_type: expense_type.to_string(),
            description: description.unwrap_or_default(),
            date,
            receipt_path: None,
        })
    }

    /// Attach a receipt reference
    pub fn with_receipt(mut self, reference: impl Into<String>) -> Self {
        self.receipt_path = Some(reference.into());
        self
    }

    /// Turn validated input into a full record
    pub fn into_record(self) -> ExpenseRecord {
        ExpenseRecord {
            id: ExpenseId::new(),
            amount: self.amount,
            expense_type: Some(self.expense_type),
            description: self.description,
            date: self.date,
            receipt_path: self.receipt_path,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        let new = NewExpense::validate("12.50", "Travel", Some("taxi".into()), Some("2024-03-05"))
            .unwrap();
        assert_eq!(new.amount.cents(), 1250);
        assert_eq!(new.expense_type, "Travel");
        assert_eq!(new.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());

        let record = new.into_record();
        assert_eq!(record.year_month(), "2024-03");
        assert!(!record.has_receipt());
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let err = NewExpense::validate("-5.00", "Travel", None, None).unwrap_err();
        assert!(matches!(err, ExpenseError::Validation(_)));
    }

    #[test]
    fn test_validate_requires_type() {
        let err = NewExpense::validate("5.00", "  ", None, None).unwrap_err();
        assert!(matches!(err, ExpenseError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        let err = NewExpense::validate("5.00", "Travel", None, Some("03/05/2024")).unwrap_err();
        assert!(matches!(err, ExpenseError::Validation(_)));
    }

    #[test]
    fn test_serde_wire_field_names() {
        let record = NewExpense::validate("9.99", "Meals", None, Some("2024-01-10"))
            .unwrap()
            .with_receipt("/receipts/receipt-1.jpg")
            .into_record();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Meals");
        assert_eq!(json["receiptPath"], "/receipts/receipt-1.jpg");
        assert_eq!(json["date"], "2024-01-10");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_deserialize_missing_type_and_receipt() {
        let json = format!(
            r#"{{"id":"{}","amount":500,"date":"2024-02-01","type":null,"createdAt":"2024-02-01T00:00:00Z"}}"#,
            uuid::Uuid::new_v4()
        );
        let record: ExpenseRecord = serde_json::from_str(&json).unwrap();
        assert!(record.expense_type.is_none());
        assert!(record.receipt_path.is_none());
        assert_eq!(record.description, "");
    }
}
