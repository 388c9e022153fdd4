use std::cmp::Reverse;

use api_types::{category::Category, entry::Entry};

use crate::{
    client::ClientError,
    ports::{EntryGateway, Notifier},
};

pub const LIST_LOAD_FAILURE: &str = "Erro ao carregar a lista";
pub const DELETE_FAILURE: &str = "Erro ao tentar exlcuir";
pub const DELETE_CONFIRMATION: &str = "Deseja realmente excluir este item?";

#[derive(Debug, Default)]
pub struct EntryList {
    pub items: Vec<Entry>,
    pub selected: usize,
    /// Names for rows that come without an embedded category.
    pub categories: Vec<Category>,
    /// Position of the element awaiting a delete confirmation.
    pending_delete: Option<usize>,
}

impl EntryList {
    /// Fetches every entry, newest id first. On failure the list is left
    /// empty.
    pub async fn load<E: EntryGateway, N: Notifier>(&mut self, entries: &E, notifier: &mut N) {
        self.items.clear();
        self.selected = 0;
        self.pending_delete = None;

        match entries.get_all().await {
            Ok(mut items) => {
                items.sort_by_key(|entry| Reverse(entry.id));
                tracing::debug!(count = items.len(), "entries loaded");
                self.items = items;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load entries");
                notifier.alert(LIST_LOAD_FAILURE);
            }
        }
    }

    /// Replaces the category cache. A failed fetch keeps the previous names.
    pub fn cache_categories(&mut self, fetched: Result<Vec<Category>, ClientError>) {
        match fetched {
            Ok(categories) => self.categories = categories,
            Err(err) => tracing::warn!(error = %err, "failed to load categories for the list"),
        }
    }

    pub fn category_name(&self, id: i64) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.id == Some(id))
            .and_then(|category| category.name.as_deref())
    }

    pub fn pending_delete(&self) -> Option<&Entry> {
        self.pending_delete.and_then(|index| self.items.get(index))
    }

    /// Asks for confirmation before deleting the element at `index`.
    pub fn request_delete(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.pending_delete = Some(index);
        true
    }

    /// Answers the pending confirmation. The confirmed element is removed
    /// only once the backend acknowledges the delete.
    pub async fn resolve_delete<E: EntryGateway, N: Notifier>(
        &mut self,
        confirmed: bool,
        entries: &E,
        notifier: &mut N,
    ) {
        let Some(index) = self.pending_delete.take() else {
            return;
        };
        if !confirmed {
            return;
        }
        let Some(id) = self.items.get(index).and_then(|entry| entry.id) else {
            notifier.alert(DELETE_FAILURE);
            return;
        };

        match entries.delete(id).await {
            Ok(()) => {
                // The confirmed element itself, not every element sharing its id.
                self.items.remove(index);
                self.selected = self.selected.min(self.items.len().saturating_sub(1));
            }
            Err(err) => {
                tracing::warn!(error = %err, id, "failed to delete entry");
                notifier.alert(DELETE_FAILURE);
            }
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }
}
