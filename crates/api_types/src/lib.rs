use serde::{Deserialize, Serialize};

pub mod money;

pub mod category {
    use super::*;

    /// A label grouping entries. Owned by the backend; the front end only
    /// reads it.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Category {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub id: Option<i64>,
        pub name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
    }
}

pub mod entry {
    use chrono::NaiveDate;

    use super::*;
    use crate::{category::Category, money::Amount};

    /// Closed set of entry kinds.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum EntryType {
        Expense,
        Revenue,
    }

    impl EntryType {
        /// Label shown next to the selector.
        pub fn label(self) -> &'static str {
            match self {
                Self::Expense => "Despesa",
                Self::Revenue => "Receita",
            }
        }

        pub fn toggled(self) -> Self {
            match self {
                Self::Expense => Self::Revenue,
                Self::Revenue => Self::Expense,
            }
        }
    }

    /// A single income or expense record.
    ///
    /// Every field is optional on the wire: a record fetched from the backend
    /// may be partial, and `id` is absent until the record is persisted.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Entry {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        pub entry_type: Option<EntryType>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub amount: Option<Amount>,
        #[serde(with = "date_format", skip_serializing_if = "Option::is_none")]
        pub date: Option<NaiveDate>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub paid: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category_id: Option<i64>,
        /// Embedded category some backends return for display. Never sent.
        #[serde(skip_serializing)]
        pub category: Option<Category>,
    }

    impl Entry {
        pub fn paid_text(&self) -> &'static str {
            if self.paid.unwrap_or(false) {
                "Pago"
            } else {
                "Pendente"
            }
        }
    }

    /// `dd/mm/yyyy`, the format of the date picker.
    pub const DATE_FORMAT: &str = "%d/%m/%Y";

    mod date_format {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer, de};

        use super::DATE_FORMAT;

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map(Some)
                    .map_err(de::Error::custom),
            }
        }
    }
}

/// Body of a `422 Unprocessable Entity` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<String>,
}
