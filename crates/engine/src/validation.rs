//! Form validation.
//!
//! [`validate`] never fails: it returns every field problem at once as a
//! [`ValidationErrors`] map so a form can show all messages inline.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    Category, EngineError, ResultEngine, Transaction, TransactionDraft, TransactionKind,
    money::parse_amount,
};

pub const AMOUNT_MESSAGE: &str = "Amount must be greater than 0";
pub const DATE_MESSAGE: &str = "Date is required";
pub const DATE_FORMAT_MESSAGE: &str = "Date is invalid";
pub const DESCRIPTION_MESSAGE: &str = "Description is required";
pub const CATEGORY_MESSAGE: &str = "Category is required";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Form field a validation message is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Amount,
    Date,
    Description,
    Category,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Date => "date",
            Self::Description => "description",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name to message. Empty means the payload is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (field, message)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Raw form input as typed by the user.
///
/// `kind` and `category` are picked from closed lists, so they arrive
/// already typed; a category can still be left unselected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormPayload {
    pub amount: String,
    pub date: String,
    pub description: String,
    pub kind: TransactionKind,
    pub category: Option<Category>,
}

impl FormPayload {
    /// Turns a payload into a draft, or returns every problem found.
    ///
    /// On top of [`validate`], a date that is present but not a real
    /// `YYYY-MM-DD` calendar day is reported under [`Field::Date`].
    pub fn into_draft(self) -> ResultEngine<TransactionDraft> {
        let mut errors = validate(&self);
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok();
        if date.is_none() && !errors.contains(Field::Date) {
            errors.insert(Field::Date, DATE_FORMAT_MESSAGE);
        }

        match (errors.is_empty(), parse_amount(&self.amount), date, self.category) {
            (true, Some(amount), Some(date), Some(category)) => Ok(TransactionDraft {
                amount,
                date,
                description: self.description.trim().to_string(),
                kind: self.kind,
                category,
            }),
            _ => Err(EngineError::Invalid(errors)),
        }
    }
}

/// Pre-fills an edit form. The amount keeps its exact stored value so an
/// untouched field parses back to the same number.
impl From<&Transaction> for FormPayload {
    fn from(tx: &Transaction) -> Self {
        Self {
            amount: tx.amount.to_string(),
            date: tx.date.format(DATE_FORMAT).to_string(),
            description: tx.description.clone(),
            kind: tx.kind,
            category: Some(tx.category),
        }
    }
}

/// Checks every field of `payload` and collects the failures.
pub fn validate(payload: &FormPayload) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if !parse_amount(&payload.amount).is_some_and(|amount| amount > 0.0) {
        errors.insert(Field::Amount, AMOUNT_MESSAGE);
    }
    if payload.date.trim().is_empty() {
        errors.insert(Field::Date, DATE_MESSAGE);
    }
    if payload.description.trim().is_empty() {
        errors.insert(Field::Description, DESCRIPTION_MESSAGE);
    }
    if payload.category.is_none() {
        errors.insert(Field::Category, CATEGORY_MESSAGE);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> FormPayload {
        FormPayload {
            amount: "12.50".to_string(),
            date: "2026-05-02".to_string(),
            description: "Groceries".to_string(),
            kind: TransactionKind::Expense,
            category: Some(Category::FoodAndDining),
        }
    }

    #[test]
    fn valid_payload_has_no_errors() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn each_missing_field_is_reported() {
        let payload = FormPayload {
            amount: "12".to_string(),
            date: String::new(),
            ..valid()
        };
        assert_eq!(validate(&payload).get(Field::Date), Some(DATE_MESSAGE));

        let payload = FormPayload {
            description: "   ".to_string(),
            ..valid()
        };
        assert_eq!(
            validate(&payload).get(Field::Description),
            Some(DESCRIPTION_MESSAGE)
        );

        let payload = FormPayload {
            category: None,
            ..valid()
        };
        assert_eq!(validate(&payload).get(Field::Category), Some(CATEGORY_MESSAGE));

        let payload = FormPayload {
            amount: String::new(),
            ..valid()
        };
        assert_eq!(validate(&payload).get(Field::Amount), Some(AMOUNT_MESSAGE));
    }

    #[test]
    fn non_positive_or_non_numeric_amount_is_rejected() {
        for amount in ["0", "-1", "-0.01", "abc", "12,50", "NaN"] {
            let payload = FormPayload {
                amount: amount.to_string(),
                ..valid()
            };
            let errors = validate(&payload);
            assert_eq!(errors.get(Field::Amount), Some(AMOUNT_MESSAGE), "{amount}");
            assert_eq!(errors.len(), 1, "{amount}");
        }
    }

    #[test]
    fn all_errors_are_returned_together() {
        let errors = validate(&FormPayload::default());
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.to_string(),
            "amount: Amount must be greater than 0; date: Date is required; \
             description: Description is required; category: Category is required"
        );
    }

    #[test]
    fn into_draft_trims_description() {
        let payload = FormPayload {
            description: "  Groceries  ".to_string(),
            ..valid()
        };
        let draft = payload.into_draft().unwrap();
        assert_eq!(draft.description, "Groceries");
        assert_eq!(draft.amount, 12.5);
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());
    }

    #[test]
    fn into_draft_rejects_malformed_date() {
        let payload = FormPayload {
            date: "2026-02-30".to_string(),
            ..valid()
        };
        let Err(EngineError::Invalid(errors)) = payload.into_draft() else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.get(Field::Date), Some(DATE_FORMAT_MESSAGE));
    }

    #[test]
    fn into_draft_reports_validation_errors() {
        let payload = FormPayload {
            amount: "0".to_string(),
            category: None,
            ..valid()
        };
        let Err(EngineError::Invalid(errors)) = payload.into_draft() else {
            panic!("expected validation failure");
        };
        assert!(errors.contains(Field::Amount));
        assert!(errors.contains(Field::Category));
        assert!(!errors.contains(Field::Date));
    }

    #[test]
    fn payload_prefills_from_transaction() {
        let tx = Transaction::new(valid().into_draft().unwrap());
        let payload = FormPayload::from(&tx);
        assert_eq!(
            payload,
            FormPayload {
                amount: "12.5".to_string(),
                ..valid()
            }
        );
    }

    #[test]
    fn prefilled_amount_is_not_rounded() {
        for amount in ["50.005", "0.004", "1234.5678"] {
            let tx = Transaction::new(
                FormPayload {
                    amount: amount.to_string(),
                    ..valid()
                }
                .into_draft()
                .unwrap(),
            );
            let payload = FormPayload::from(&tx);
            assert_eq!(payload.amount, amount);
            assert_eq!(payload.into_draft().unwrap().amount, tx.amount, "{amount}");
        }
    }
}
