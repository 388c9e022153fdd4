//! Seams between the entry components and the outside world.
//!
//! The form and the list only talk to these traits, so their lifecycle runs
//! the same against the REST [`crate::client::Client`] and the in-memory
//! fakes used by the tests.

use api_types::{category::Category, entry::Entry};

use crate::{client::ClientError, route::Navigation};

/// Entry collaborator.
pub trait EntryGateway {
    async fn get_by_id(&self, id: i64) -> Result<Entry, ClientError>;
    async fn get_all(&self) -> Result<Vec<Entry>, ClientError>;
    async fn create(&self, entry: &Entry) -> Result<Entry, ClientError>;
    async fn update(&self, entry: &Entry) -> Result<Entry, ClientError>;
    async fn delete(&self, id: i64) -> Result<(), ClientError>;
}

/// Category collaborator.
pub trait CategoryGateway {
    async fn get_all(&self) -> Result<Vec<Category>, ClientError>;
}

/// Toasts and blocking alerts.
pub trait Notifier {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
    /// Blocking modal: input is swallowed until the user dismisses it.
    fn alert(&mut self, message: &str);
}

pub trait Navigator {
    fn navigate(&mut self, navigation: Navigation);
}
