//! Declarative field rules of the entry form and the validator over them.

use api_types::{
    entry::{DATE_FORMAT, Entry, EntryType},
    money::Amount,
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Type,
    Amount,
    Date,
    Paid,
    Category,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Lançamento",
            Self::Description => "Descrição",
            Self::Type => "Tipo",
            Self::Amount => "Valor",
            Self::Date => "Data",
            Self::Paid => "Pago",
            Self::Category => "Categoria",
        }
    }

    /// Fields edited by typing; the others cycle through a closed set.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::Name | Self::Description | Self::Amount | Self::Date
        )
    }

    /// Input mask: which characters a text field takes.
    pub fn accepts(self, ch: char) -> bool {
        match self {
            Self::Amount => ch.is_ascii_digit() || matches!(ch, '.' | ',' | '-'),
            Self::Date => ch.is_ascii_digit() || ch == '/',
            Self::Name | Self::Description => !ch.is_control(),
            _ => false,
        }
    }
}

/// Whether the form presets `type`/`paid` and loads categories for a
/// selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    Basic,
    #[default]
    Rich,
}

/// Value a field starts with in creation mode when the rich variant is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Type(EntryType),
    Paid(bool),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub required: bool,
    pub min_len: Option<usize>,
    pub preset: Option<Preset>,
}

const fn rule(field: Field, required: bool) -> FieldRule {
    FieldRule {
        field,
        required,
        min_len: None,
        preset: None,
    }
}

/// Field set of the entry form, in display order.
pub const SCHEMA: &[FieldRule] = &[
    FieldRule {
        min_len: Some(2),
        ..rule(Field::Name, true)
    },
    rule(Field::Description, false),
    FieldRule {
        preset: Some(Preset::Type(EntryType::Expense)),
        ..rule(Field::Type, true)
    },
    rule(Field::Amount, true),
    rule(Field::Date, true),
    FieldRule {
        preset: Some(Preset::Paid(true)),
        ..rule(Field::Paid, true)
    },
    rule(Field::Category, true),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    Required,
    MinLength(usize),
    Format,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn message(&self) -> String {
        match self.kind {
            ViolationKind::Required => "dado obrigatório".to_string(),
            ViolationKind::MinLength(min) => format!("deve ter no mínimo {min} caracteres"),
            ViolationKind::Format => "formato inválido".to_string(),
        }
    }
}

/// Mutable working copy the user edits. Text fields keep the raw input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub entry_type: Option<EntryType>,
    pub amount: String,
    pub date: String,
    pub paid: Option<bool>,
    pub category_id: Option<i64>,
}

impl EntryDraft {
    pub fn for_variant(variant: FormVariant) -> Self {
        let mut draft = Self::default();
        if variant == FormVariant::Rich {
            for preset in SCHEMA.iter().filter_map(|rule| rule.preset) {
                match preset {
                    Preset::Type(entry_type) => draft.entry_type = Some(entry_type),
                    Preset::Paid(paid) => draft.paid = Some(paid),
                }
            }
        }
        draft
    }

    /// Copies every field the record carries; absent fields keep their
    /// current value.
    pub fn overlay(&mut self, entry: &Entry) {
        if let Some(id) = entry.id {
            self.id = Some(id);
        }
        if let Some(name) = &entry.name {
            self.name = name.clone();
        }
        if let Some(description) = &entry.description {
            self.description = description.clone();
        }
        if let Some(entry_type) = entry.entry_type {
            self.entry_type = Some(entry_type);
        }
        if let Some(amount) = entry.amount {
            self.amount = amount.to_string();
        }
        if let Some(date) = entry.date {
            self.date = date.format(DATE_FORMAT).to_string();
        }
        if let Some(paid) = entry.paid {
            self.paid = Some(paid);
        }
        if let Some(category_id) = entry.category_id {
            self.category_id = Some(category_id);
        }
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Description => Some(&self.description),
            Field::Amount => Some(&self.amount),
            Field::Date => Some(&self.date),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Description => Some(&mut self.description),
            Field::Amount => Some(&mut self.amount),
            Field::Date => Some(&mut self.date),
            _ => None,
        }
    }

    fn is_present(&self, field: Field) -> bool {
        match field {
            Field::Type => self.entry_type.is_some(),
            Field::Paid => self.paid.is_some(),
            Field::Category => self.category_id.is_some(),
            text => self.text(text).is_some_and(|value| !value.is_empty()),
        }
    }

    fn parsed_amount(&self) -> Result<Option<Amount>, ()> {
        if self.amount.is_empty() {
            return Ok(None);
        }
        self.amount.parse::<Amount>().map(Some).map_err(|_| ())
    }

    fn parsed_date(&self) -> Result<Option<NaiveDate>, ()> {
        if self.date.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ())
    }

    /// Builds the value sent to the backend. Only unparseable amount or date
    /// input fails; missing values are left to [`validate`].
    pub fn to_entry(&self, id: Option<i64>) -> Result<Entry, Vec<Violation>> {
        let malformed = |field| Violation {
            field,
            kind: ViolationKind::Format,
        };

        let amount = self.parsed_amount();
        let date = self.parsed_date();
        let mut violations = Vec::new();
        if amount.is_err() {
            violations.push(malformed(Field::Amount));
        }
        if date.is_err() {
            violations.push(malformed(Field::Date));
        }
        let (Ok(amount), Ok(date)) = (amount, date) else {
            return Err(violations);
        };

        let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_string());
        Ok(Entry {
            id,
            name: non_empty(&self.name),
            description: non_empty(&self.description),
            entry_type: self.entry_type,
            amount,
            date,
            paid: self.paid,
            category_id: self.category_id,
            category: None,
        })
    }
}

/// Checks the draft against [`SCHEMA`] plus the amount/date input formats.
pub fn validate(draft: &EntryDraft) -> Vec<Violation> {
    let mut violations = Vec::new();

    for rule in SCHEMA {
        if !draft.is_present(rule.field) {
            if rule.required {
                violations.push(Violation {
                    field: rule.field,
                    kind: ViolationKind::Required,
                });
            }
            continue;
        }

        if let (Some(min), Some(value)) = (rule.min_len, draft.text(rule.field)) {
            if value.chars().count() < min {
                violations.push(Violation {
                    field: rule.field,
                    kind: ViolationKind::MinLength(min),
                });
                continue;
            }
        }

        let malformed = match rule.field {
            Field::Amount => draft.parsed_amount().is_err(),
            Field::Date => draft.parsed_date().is_err(),
            _ => false,
        };
        if malformed {
            violations.push(Violation {
                field: rule.field,
                kind: ViolationKind::Format,
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> EntryDraft {
        EntryDraft {
            id: None,
            name: "Rent".to_string(),
            description: String::new(),
            entry_type: Some(EntryType::Expense),
            amount: "1.200,50".to_string(),
            date: "05/03/2024".to_string(),
            paid: Some(true),
            category_id: Some(1),
        }
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let fields: Vec<Field> = validate(&EntryDraft::default())
            .into_iter()
            .map(|violation| violation.field)
            .collect();

        assert_eq!(
            fields,
            vec![
                Field::Name,
                Field::Type,
                Field::Amount,
                Field::Date,
                Field::Paid,
                Field::Category
            ]
        );
    }

    #[test]
    fn valid_draft_has_no_violations() {
        assert!(validate(&valid_draft()).is_empty());
    }

    #[test]
    fn name_needs_two_characters() {
        let draft = EntryDraft {
            name: "R".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            validate(&draft),
            vec![Violation {
                field: Field::Name,
                kind: ViolationKind::MinLength(2),
            }]
        );

        let draft = EntryDraft {
            name: "Çã".to_string(),
            ..valid_draft()
        };
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn malformed_amount_and_date_are_format_violations() {
        let draft = EntryDraft {
            amount: "12,345".to_string(),
            date: "2024-03-05".to_string(),
            ..valid_draft()
        };
        let kinds: Vec<(Field, ViolationKind)> = validate(&draft)
            .into_iter()
            .map(|violation| (violation.field, violation.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (Field::Amount, ViolationKind::Format),
                (Field::Date, ViolationKind::Format)
            ]
        );
        assert!(draft.to_entry(None).is_err());
    }

    #[test]
    fn rich_variant_presets_type_and_paid() {
        let rich = EntryDraft::for_variant(FormVariant::Rich);
        assert_eq!(rich.entry_type, Some(EntryType::Expense));
        assert_eq!(rich.paid, Some(true));

        let basic = EntryDraft::for_variant(FormVariant::Basic);
        assert_eq!(basic, EntryDraft::default());
    }

    #[test]
    fn overlay_keeps_fields_the_record_lacks() {
        let mut draft = EntryDraft {
            description: "typed before load".to_string(),
            ..EntryDraft::for_variant(FormVariant::Rich)
        };
        let fetched = Entry {
            id: Some(7),
            name: Some("Rent".to_string()),
            amount: Some(Amount::new(120_050)),
            ..Entry::default()
        };

        draft.overlay(&fetched);

        assert_eq!(draft.id, Some(7));
        assert_eq!(draft.name, "Rent");
        assert_eq!(draft.amount, "1.200,50");
        assert_eq!(draft.description, "typed before load");
        assert_eq!(draft.paid, Some(true));
    }

    #[test]
    fn to_entry_uses_the_given_id_only() {
        let draft = EntryDraft {
            id: Some(99),
            ..valid_draft()
        };

        let created = draft.to_entry(None).unwrap();
        assert_eq!(created.id, None);
        assert_eq!(created.amount, Some(Amount::new(120_050)));
        assert_eq!(created.description, None);
        assert_eq!(created.date, NaiveDate::from_ymd_opt(2024, 3, 5));

        let updated = draft.to_entry(draft.id).unwrap();
        assert_eq!(updated.id, Some(99));
    }

    #[test]
    fn masks_filter_characters() {
        assert!(Field::Amount.accepts('7'));
        assert!(Field::Amount.accepts(','));
        assert!(!Field::Amount.accepts('a'));
        assert!(Field::Date.accepts('/'));
        assert!(!Field::Date.accepts('-'));
        assert!(Field::Name.accepts('é'));
        assert!(!Field::Paid.accepts('x'));
    }
}
