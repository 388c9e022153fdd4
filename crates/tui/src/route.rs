//! Routes of the front end and their path form.
//!
//! - `entries` → [`Route::EntryList`]
//! - `entries/new` → [`Route::NewEntry`]
//! - `entries/{id}/edit` → [`Route::EditEntry`]
//!
//! The edit id is kept as the raw path segment; the form decides whether it
//! is a valid identifier.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    EntryList,
    NewEntry,
    EditEntry(String),
}

impl Route {
    pub fn edit(id: i64) -> Self {
        Self::EditEntry(id.to_string())
    }

    /// Parses a path, ignoring leading/trailing slashes. Unknown paths are
    /// `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            ["entries"] => Some(Self::EntryList),
            ["entries", "new"] => Some(Self::NewEntry),
            ["entries", id, "edit"] => Some(Self::EditEntry((*id).to_string())),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::EntryList => "entries".to_string(),
            Self::NewEntry => "entries/new".to_string(),
            Self::EditEntry(id) => format!("entries/{id}/edit"),
        }
    }

    /// Segments relative to the form mount point, `None` for the list.
    pub fn form_segments(&self) -> Option<Vec<String>> {
        match self {
            Self::EntryList => None,
            Self::NewEntry => Some(vec!["new".to_string()]),
            Self::EditEntry(id) => Some(vec![id.clone(), "edit".to_string()]),
        }
    }
}

/// A navigation request issued through a [`crate::ports::Navigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    /// Not recorded in history and not activated when superseded by a
    /// following navigation.
    pub skip_location_change: bool,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self {
            route,
            skip_location_change: false,
        }
    }

    pub fn transient(route: Route) -> Self {
        Self {
            route,
            skip_location_change: true,
        }
    }
}
