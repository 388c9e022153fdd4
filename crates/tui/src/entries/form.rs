//! Entry form lifecycle: mode decision, load, submit and error surfacing.
//!
//! ```text
//! Initializing ─ "new" ─▶ New ───────────────┐
//!      │                                     ▼
//!      └─ id ─▶ EditLoading ─ ok ─▶ EditReady ─▶ Submitting ─┬▶ SubmitSucceeded
//!                    │ err: alert, stays                     └▶ SubmitFailed ─▶ Submitting …
//! ```

use api_types::{
    category::Category,
    entry::{Entry, EntryType},
};
use serde::Deserialize;

use crate::{
    client::ClientError,
    entries::schema::{EntryDraft, Field, FormVariant, SCHEMA, Violation, validate},
    ports::{CategoryGateway, EntryGateway, Navigator, Notifier},
    route::{Navigation, Route},
};

pub const LOAD_FAILURE: &str = "Ocorreu um erro no servidor, tente mais tarde.";
pub const SUBMIT_SUCCESS: &str = "Solicitação Processada com Sucesso!";
pub const SUBMIT_FAILURE: &str = "Ocorreu um Erro ao processar a sua solicitação!";
pub const COMMUNICATION_FAILURE: &str =
    "Falha na comunicação com o servidor. Por favor, tente mais tarde";

const NEW_TITLE: &str = "Cadastro de novo Lançamento";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    New,
    Edit,
}

impl FormMode {
    /// `"new"` selects creation; any other first segment is an entry id.
    pub fn from_segment(segment: Option<&str>) -> Self {
        match segment {
            Some("new") => Self::New,
            _ => Self::Edit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Initializing,
    New,
    EditLoading,
    EditReady,
    Submitting,
    SubmitSucceeded,
    SubmitFailed,
}

/// What a failed update reports to the error handler.
///
/// Creation always reports the transport error. Updates historically report
/// the locally loaded entry instead, which carries no status and therefore
/// always yields the generic message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateFailureReport {
    #[default]
    LocalEntry,
    TransportError,
}

/// Source of the failure messages. The local entry carries no
/// status, so it always maps to the fallback message.
enum FailureReport<'a> {
    Transport(&'a ClientError),
    LocalEntry,
}

fn server_error_messages(report: FailureReport<'_>) -> Vec<String> {
    let messages = match report {
        FailureReport::Transport(err) => err.validation_messages(),
        FailureReport::LocalEntry => None,
    };
    messages.unwrap_or_else(|| vec![COMMUNICATION_FAILURE.to_string()])
}

#[derive(Debug)]
pub struct EntryForm {
    variant: FormVariant,
    update_failure_report: UpdateFailureReport,
    mode: Option<FormMode>,
    state: FormState,
    /// Authoritative record: empty until an edit load succeeds, then replaced
    /// wholesale.
    pub entry: Entry,
    pub draft: EntryDraft,
    pub categories: Vec<Category>,
    pub server_error_messages: Option<Vec<String>>,
    pub submitting: bool,
    pub focus: Field,
    conversion_violations: Vec<Violation>,
}

impl EntryForm {
    pub fn new(variant: FormVariant, update_failure_report: UpdateFailureReport) -> Self {
        Self {
            variant,
            update_failure_report,
            mode: None,
            state: FormState::Initializing,
            entry: Entry::default(),
            draft: EntryDraft::for_variant(variant),
            categories: Vec::new(),
            server_error_messages: None,
            submitting: false,
            focus: SCHEMA[0].field,
            conversion_violations: Vec::new(),
        }
    }

    pub fn mode(&self) -> Option<FormMode> {
        self.mode
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Resolves the mode from the route segments relative to the form, then
    /// loads the entry (edit) and the categories (rich variant) together.
    pub async fn activate<E, C, N>(
        &mut self,
        segments: &[String],
        entries: &E,
        categories: &C,
        notifier: &mut N,
    ) where
        E: EntryGateway,
        C: CategoryGateway,
        N: Notifier,
    {
        let first = segments.first().map(String::as_str);
        let mode = FormMode::from_segment(first);
        self.mode = Some(mode);
        self.state = match mode {
            FormMode::New => FormState::New,
            FormMode::Edit => FormState::EditLoading,
        };
        tracing::info!(?mode, "entry form activated");

        let load_categories = self.variant == FormVariant::Rich;
        let entry_load = async {
            if mode == FormMode::New {
                return None;
            }
            let raw = first.unwrap_or_default();
            Some(match raw.parse::<i64>() {
                Ok(id) => entries.get_by_id(id).await,
                Err(_) => Err(ClientError::Endpoint(format!("invalid entry id {raw:?}"))),
            })
        };
        let category_load = async {
            if load_categories {
                Some(categories.get_all().await)
            } else {
                None
            }
        };

        let (entry_result, category_result) = tokio::join!(entry_load, category_load);

        match entry_result {
            Some(Ok(entry)) => {
                self.entry = entry;
                self.draft.overlay(&self.entry);
                self.state = FormState::EditReady;
            }
            Some(Err(err)) => {
                tracing::warn!(error = %err, "failed to load entry");
                notifier.alert(LOAD_FAILURE);
            }
            None => {}
        }

        match category_result {
            Some(Ok(categories)) => self.categories = categories,
            Some(Err(err)) => {
                tracing::warn!(error = %err, "failed to load categories");
                notifier.alert(LOAD_FAILURE);
            }
            None => {}
        }
    }

    pub fn page_title(&self) -> String {
        match self.mode {
            Some(FormMode::Edit) => format!(
                "Editar Lançamento: {}",
                self.entry.name.as_deref().unwrap_or_default()
            ),
            _ => NEW_TITLE.to_string(),
        }
    }

    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = validate(&self.draft);
        for extra in &self.conversion_violations {
            if !violations.contains(extra) {
                violations.push(extra.clone());
            }
        }
        violations
    }

    /// Gate honored by the submit key. `submit` itself does not check it.
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.violations().is_empty()
    }

    pub async fn submit<E, N, R>(&mut self, entries: &E, notifier: &mut N, navigator: &mut R)
    where
        E: EntryGateway,
        N: Notifier,
        R: Navigator,
    {
        self.state = FormState::Submitting;
        self.submitting = true;

        let creating = self.mode == Some(FormMode::New);
        let id = if creating { None } else { self.draft.id };
        let payload = match self.draft.to_entry(id) {
            Ok(payload) => payload,
            Err(violations) => {
                self.conversion_violations = violations;
                self.submitting = false;
                self.state = FormState::SubmitFailed;
                return;
            }
        };

        if creating {
            match entries.create(&payload).await {
                Ok(saved) => self.succeed(&saved, notifier, navigator),
                Err(err) => {
                    tracing::warn!(error = %err, status = ?err.status(), "failed to create entry");
                    let messages = server_error_messages(FailureReport::Transport(&err));
                    self.fail(messages, notifier);
                }
            }
        } else {
            match entries.update(&payload).await {
                Ok(saved) => self.succeed(&saved, notifier, navigator),
                Err(err) => {
                    tracing::warn!(error = %err, status = ?err.status(), "failed to update entry");
                    let report = match self.update_failure_report {
                        UpdateFailureReport::LocalEntry => FailureReport::LocalEntry,
                        UpdateFailureReport::TransportError => FailureReport::Transport(&err),
                    };
                    let messages = server_error_messages(report);
                    self.fail(messages, notifier);
                }
            }
        }
    }

    fn succeed<N: Notifier, R: Navigator>(
        &mut self,
        saved: &Entry,
        notifier: &mut N,
        navigator: &mut R,
    ) {
        self.state = FormState::SubmitSucceeded;
        notifier.success(SUBMIT_SUCCESS);

        // Bounce through the list so the form re-activates against the
        // stored record.
        match saved.id {
            Some(id) => {
                navigator.navigate(Navigation::transient(Route::EntryList));
                navigator.navigate(Navigation::to(Route::edit(id)));
            }
            None => {
                tracing::warn!("saved entry came back without id");
                navigator.navigate(Navigation::to(Route::EntryList));
            }
        }
    }

    fn fail<N: Notifier>(&mut self, messages: Vec<String>, notifier: &mut N) {
        self.state = FormState::SubmitFailed;
        notifier.error(SUBMIT_FAILURE);
        self.submitting = false;
        self.server_error_messages = Some(messages);
    }

    pub fn focus_next(&mut self) {
        self.focus = step_field(self.focus, 1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = step_field(self.focus, SCHEMA.len() - 1);
    }

    pub fn input(&mut self, ch: char) {
        if !self.focus.accepts(ch) {
            return;
        }
        if let Some(value) = self.draft.text_mut(self.focus) {
            value.push(ch);
            self.conversion_violations.clear();
        }
    }

    pub fn backspace(&mut self) {
        if let Some(value) = self.draft.text_mut(self.focus) {
            value.pop();
            self.conversion_violations.clear();
        }
    }

    /// Moves a choice field to its next (or previous) value.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            Field::Type => {
                self.draft.entry_type = Some(match self.draft.entry_type {
                    Some(entry_type) => entry_type.toggled(),
                    None => EntryType::Expense,
                });
            }
            Field::Paid => {
                self.draft.paid = Some(!self.draft.paid.unwrap_or(false));
            }
            Field::Category => {
                let ids: Vec<i64> = self.categories.iter().filter_map(|c| c.id).collect();
                if ids.is_empty() {
                    return;
                }
                let current = self
                    .draft
                    .category_id
                    .and_then(|id| ids.iter().position(|candidate| *candidate == id));
                let next = match (current, forward) {
                    (None, true) => 0,
                    (None, false) => ids.len() - 1,
                    (Some(pos), true) => (pos + 1) % ids.len(),
                    (Some(pos), false) => (pos + ids.len() - 1) % ids.len(),
                };
                self.draft.category_id = Some(ids[next]);
            }
            _ => {}
        }
    }

    pub fn category_name(&self, id: i64) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.id == Some(id))
            .and_then(|category| category.name.as_deref())
    }
}

fn step_field(current: Field, step: usize) -> Field {
    let pos = SCHEMA
        .iter()
        .position(|rule| rule.field == current)
        .unwrap_or(0);
    SCHEMA[(pos + step) % SCHEMA.len()].field
}

#[cfg(test)]
mod tests {
    use api_types::{entry::EntryType, money::Amount};
    use chrono::NaiveDate;

    use super::*;
    use crate::ports::fakes::{
        Notice, RecordingNavigator, RecordingNotifier, ScriptedCategories, ScriptedEntries,
        status_error,
    };

    fn segments(path: &str) -> Vec<String> {
        Route::parse(path)
            .and_then(|route| route.form_segments())
            .unwrap()
    }

    fn rent() -> Entry {
        Entry {
            id: Some(7),
            name: Some("Rent".to_string()),
            description: Some("March".to_string()),
            entry_type: Some(EntryType::Expense),
            amount: Some(Amount::new(120_050)),
            date: NaiveDate::from_ymd_opt(2024, 3, 5),
            paid: Some(false),
            category_id: Some(2),
            category: None,
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: Some(1),
                name: Some("Casa".to_string()),
                description: None,
            },
            Category {
                id: Some(2),
                name: Some("Lazer".to_string()),
                description: None,
            },
        ]
    }

    fn rich_form() -> EntryForm {
        EntryForm::new(FormVariant::Rich, UpdateFailureReport::LocalEntry)
    }

    async fn loaded_edit_form(entries: &ScriptedEntries) -> EntryForm {
        entries.get_by_id.borrow_mut().push_back(Ok(rent()));
        let cats = ScriptedCategories::default();
        cats.get_all.borrow_mut().push_back(Ok(categories()));
        let mut notifier = RecordingNotifier::default();
        let mut form = rich_form();
        form.activate(&segments("entries/7/edit"), entries, &cats, &mut notifier)
            .await;
        assert_eq!(form.state(), FormState::EditReady);
        form
    }

    fn fill_valid(form: &mut EntryForm) {
        form.draft.name = "Salary".to_string();
        form.draft.amount = "3.500,00".to_string();
        form.draft.date = "01/04/2024".to_string();
        form.draft.category_id = Some(1);
    }

    #[test]
    fn mode_is_new_only_for_the_literal_segment() {
        assert_eq!(FormMode::from_segment(Some("new")), FormMode::New);
        assert_eq!(FormMode::from_segment(Some("7")), FormMode::Edit);
        assert_eq!(FormMode::from_segment(Some("New")), FormMode::Edit);
        assert_eq!(FormMode::from_segment(Some("")), FormMode::Edit);
        assert_eq!(FormMode::from_segment(None), FormMode::Edit);
    }

    #[tokio::test]
    async fn new_mode_loads_categories_but_no_entry() {
        let entries = ScriptedEntries::default();
        let cats = ScriptedCategories::default();
        cats.get_all.borrow_mut().push_back(Ok(categories()));
        let mut notifier = RecordingNotifier::default();
        let mut form = rich_form();

        form.activate(&segments("entries/new"), &entries, &cats, &mut notifier)
            .await;

        assert_eq!(form.mode(), Some(FormMode::New));
        assert_eq!(form.state(), FormState::New);
        assert!(entries.requested_ids.borrow().is_empty());
        assert_eq!(form.categories.len(), 2);
        assert_eq!(form.draft.entry_type, Some(EntryType::Expense));
        assert_eq!(form.draft.paid, Some(true));
        assert_eq!(form.page_title(), "Cadastro de novo Lançamento");
        assert!(notifier.notices.is_empty());
    }

    #[tokio::test]
    async fn edit_load_replaces_entry_and_overlays_draft() {
        let entries = ScriptedEntries::default();
        let form = loaded_edit_form(&entries).await;

        assert_eq!(*entries.requested_ids.borrow(), vec![7]);
        assert_eq!(form.entry, rent());
        assert_eq!(form.draft.id, Some(7));
        assert_eq!(form.draft.name, "Rent");
        assert_eq!(form.draft.description, "March");
        assert_eq!(form.draft.amount, "1.200,50");
        assert_eq!(form.draft.date, "05/03/2024");
        assert_eq!(form.draft.paid, Some(false));
        assert_eq!(form.draft.category_id, Some(2));
        assert_eq!(form.page_title(), "Editar Lançamento: Rent");
        assert_eq!(form.category_name(2), Some("Lazer"));
    }

    #[tokio::test]
    async fn edit_title_is_blank_before_the_load_lands() {
        let entries = ScriptedEntries::default();
        entries.get_by_id.borrow_mut().push_back(Err(status_error(500, None)));
        let cats = ScriptedCategories::default();
        cats.get_all.borrow_mut().push_back(Ok(categories()));
        let mut notifier = RecordingNotifier::default();
        let mut form = rich_form();

        form.activate(&segments("entries/7/edit"), &entries, &cats, &mut notifier)
            .await;

        assert_eq!(form.state(), FormState::EditLoading);
        assert_eq!(form.page_title(), "Editar Lançamento: ");
        assert_eq!(notifier.alerts(), vec![LOAD_FAILURE]);
        assert_eq!(form.entry, Entry::default());
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_load_failure() {
        let entries = ScriptedEntries::default();
        let cats = ScriptedCategories::default();
        cats.get_all.borrow_mut().push_back(Ok(categories()));
        let mut notifier = RecordingNotifier::default();
        let mut form = rich_form();

        form.activate(&segments("entries/abc/edit"), &entries, &cats, &mut notifier)
            .await;

        assert!(entries.requested_ids.borrow().is_empty());
        assert_eq!(form.state(), FormState::EditLoading);
        assert_eq!(notifier.alerts(), vec![LOAD_FAILURE]);
    }

    #[tokio::test]
    async fn category_failure_alerts_without_touching_the_entry() {
        let entries = ScriptedEntries::default();
        entries.get_by_id.borrow_mut().push_back(Ok(rent()));
        let cats = ScriptedCategories::default();
        cats.get_all.borrow_mut().push_back(Err(status_error(503, None)));
        let mut notifier = RecordingNotifier::default();
        let mut form = rich_form();

        form.activate(&segments("entries/7/edit"), &entries, &cats, &mut notifier)
            .await;

        assert_eq!(form.state(), FormState::EditReady);
        assert!(form.categories.is_empty());
        assert_eq!(notifier.alerts(), vec![LOAD_FAILURE]);
    }

    #[tokio::test]
    async fn basic_variant_skips_categories_and_presets() {
        let entries = ScriptedEntries::default();
        let cats = ScriptedCategories::default();
        let mut notifier = RecordingNotifier::default();
        let mut form = EntryForm::new(FormVariant::Basic, UpdateFailureReport::LocalEntry);

        form.activate(&segments("entries/new"), &entries, &cats, &mut notifier)
            .await;

        assert_eq!(form.draft, EntryDraft::default());
        // Nothing consumed, nothing alerted.
        assert!(notifier.notices.is_empty());
    }

    #[tokio::test]
    async fn create_never_sends_an_id_and_bounces_through_the_list() {
        let entries = ScriptedEntries::default();
        entries.create.borrow_mut().push_back(Ok(Entry {
            id: Some(12),
            ..Entry::default()
        }));
        let cats = ScriptedCategories::default();
        let mut notifier = RecordingNotifier::default();
        let mut navigator = RecordingNavigator::default();
        let mut form = EntryForm::new(FormVariant::Basic, UpdateFailureReport::LocalEntry);
        form.activate(&segments("entries/new"), &entries, &cats, &mut notifier)
            .await;
        fill_valid(&mut form);
        form.draft.entry_type = Some(EntryType::Revenue);
        form.draft.paid = Some(true);
        form.draft.id = Some(99);
        assert!(form.can_submit());

        form.submit(&entries, &mut notifier, &mut navigator).await;

        let created = entries.created.borrow();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].id, None);
        assert_eq!(created[0].name.as_deref(), Some("Salary"));
        assert_eq!(created[0].amount, Some(Amount::new(350_000)));
        assert_eq!(form.state(), FormState::SubmitSucceeded);
        assert_eq!(
            notifier.notices,
            vec![Notice::Success(SUBMIT_SUCCESS.to_string())]
        );
        assert_eq!(
            navigator.navigations,
            vec![
                Navigation::transient(Route::EntryList),
                Navigation::to(Route::edit(12)),
            ]
        );
    }

    #[tokio::test]
    async fn update_sends_the_loaded_id() {
        let entries = ScriptedEntries::default();
        let mut form = loaded_edit_form(&entries).await;
        entries.update.borrow_mut().push_back(Ok(rent()));
        let mut notifier = RecordingNotifier::default();
        let mut navigator = RecordingNavigator::default();
        form.draft.name = "Rent (April)".to_string();

        form.submit(&entries, &mut notifier, &mut navigator).await;

        let updated = entries.updated.borrow();
        assert_eq!(updated[0].id, Some(7));
        assert_eq!(updated[0].name.as_deref(), Some("Rent (April)"));
        // The loaded record is untouched by draft edits.
        assert_eq!(form.entry.name.as_deref(), Some("Rent"));
        assert_eq!(
            navigator.navigations,
            vec![
                Navigation::transient(Route::EntryList),
                Navigation::to(Route::edit(7)),
            ]
        );
    }

    #[tokio::test]
    async fn create_422_surfaces_server_messages_verbatim() {
        let entries = ScriptedEntries::default();
        entries
            .create
            .borrow_mut()
            .push_back(Err(status_error(422, Some(r#"{"errors":["Name too short"]}"#))));
        let cats = ScriptedCategories::default();
        cats.get_all.borrow_mut().push_back(Ok(categories()));
        let mut notifier = RecordingNotifier::default();
        let mut navigator = RecordingNavigator::default();
        let mut form = rich_form();
        form.activate(&segments("entries/new"), &entries, &cats, &mut notifier)
            .await;
        fill_valid(&mut form);

        form.submit(&entries, &mut notifier, &mut navigator).await;

        assert_eq!(form.state(), FormState::SubmitFailed);
        assert!(!form.submitting);
        assert_eq!(
            form.server_error_messages,
            Some(vec!["Name too short".to_string()])
        );
        assert_eq!(
            notifier.notices,
            vec![Notice::Error(SUBMIT_FAILURE.to_string())]
        );
        assert!(navigator.navigations.is_empty());
    }

    #[tokio::test]
    async fn create_other_failures_use_the_fallback_message() {
        for status in [400, 404, 500, 503] {
            let entries = ScriptedEntries::default();
            entries
                .create
                .borrow_mut()
                .push_back(Err(status_error(status, Some(r#"{"errors":["ignored"]}"#))));
            let cats = ScriptedCategories::default();
            cats.get_all.borrow_mut().push_back(Ok(categories()));
            let mut notifier = RecordingNotifier::default();
            let mut navigator = RecordingNavigator::default();
            let mut form = rich_form();
            form.activate(&segments("entries/new"), &entries, &cats, &mut notifier)
                .await;
            fill_valid(&mut form);

            form.submit(&entries, &mut notifier, &mut navigator).await;

            assert_eq!(
                form.server_error_messages,
                Some(vec![COMMUNICATION_FAILURE.to_string()])
            );
        }
    }

    #[tokio::test]
    async fn update_failure_reports_the_local_entry_by_default() {
        let entries = ScriptedEntries::default();
        let mut form = loaded_edit_form(&entries).await;
        entries
            .update
            .borrow_mut()
            .push_back(Err(status_error(422, Some(r#"{"errors":["Name too short"]}"#))));
        let mut notifier = RecordingNotifier::default();
        let mut navigator = RecordingNavigator::default();

        form.submit(&entries, &mut notifier, &mut navigator).await;

        assert_eq!(form.state(), FormState::SubmitFailed);
        assert_eq!(
            form.server_error_messages,
            Some(vec![COMMUNICATION_FAILURE.to_string()])
        );
    }

    #[tokio::test]
    async fn update_failure_can_report_the_transport_error() {
        let entries = ScriptedEntries::default();
        entries.get_by_id.borrow_mut().push_back(Ok(rent()));
        entries
            .update
            .borrow_mut()
            .push_back(Err(status_error(422, Some(r#"{"errors":["Amount required"]}"#))));
        let cats = ScriptedCategories::default();
        cats.get_all.borrow_mut().push_back(Ok(categories()));
        let mut notifier = RecordingNotifier::default();
        let mut navigator = RecordingNavigator::default();
        let mut form = EntryForm::new(FormVariant::Rich, UpdateFailureReport::TransportError);
        form.activate(&segments("entries/7/edit"), &entries, &cats, &mut notifier)
            .await;

        form.submit(&entries, &mut notifier, &mut navigator).await;

        assert_eq!(
            form.server_error_messages,
            Some(vec!["Amount required".to_string()])
        );
    }

    #[tokio::test]
    async fn failed_submit_can_be_retried() {
        let entries = ScriptedEntries::default();
        entries.create.borrow_mut().push_back(Err(status_error(500, None)));
        entries.create.borrow_mut().push_back(Ok(Entry {
            id: Some(3),
            ..Entry::default()
        }));
        let cats = ScriptedCategories::default();
        cats.get_all.borrow_mut().push_back(Ok(categories()));
        let mut notifier = RecordingNotifier::default();
        let mut navigator = RecordingNavigator::default();
        let mut form = rich_form();
        form.activate(&segments("entries/new"), &entries, &cats, &mut notifier)
            .await;
        fill_valid(&mut form);

        form.submit(&entries, &mut notifier, &mut navigator).await;
        assert!(form.can_submit());
        form.submit(&entries, &mut notifier, &mut navigator).await;

        assert_eq!(entries.created.borrow().len(), 2);
        assert_eq!(form.state(), FormState::SubmitSucceeded);
    }

    #[tokio::test]
    async fn unparseable_amount_blocks_the_call() {
        let entries = ScriptedEntries::default();
        let cats = ScriptedCategories::default();
        cats.get_all.borrow_mut().push_back(Ok(categories()));
        let mut notifier = RecordingNotifier::default();
        let mut navigator = RecordingNavigator::default();
        let mut form = rich_form();
        form.activate(&segments("entries/new"), &entries, &cats, &mut notifier)
            .await;
        fill_valid(&mut form);
        form.draft.amount = "1.2".to_string();
        assert!(!form.can_submit());

        form.submit(&entries, &mut notifier, &mut navigator).await;

        assert!(entries.created.borrow().is_empty());
        assert_eq!(form.state(), FormState::SubmitFailed);
        assert!(!form.submitting);
        assert!(
            form.violations()
                .iter()
                .any(|violation| violation.field == Field::Amount)
        );
    }

    #[test]
    fn editing_follows_field_masks_and_choices() {
        let mut form = rich_form();
        form.categories = categories();

        form.input('R');
        form.input('e');
        assert_eq!(form.draft.name, "Re");
        form.backspace();
        assert_eq!(form.draft.name, "R");

        form.focus = Field::Amount;
        for ch in "1a.200,5x0".chars() {
            form.input(ch);
        }
        assert_eq!(form.draft.amount, "1.200,50");

        form.focus = Field::Type;
        form.cycle(true);
        assert_eq!(form.draft.entry_type, Some(EntryType::Revenue));

        form.focus = Field::Paid;
        form.cycle(true);
        assert_eq!(form.draft.paid, Some(false));

        form.focus = Field::Category;
        form.cycle(true);
        assert_eq!(form.draft.category_id, Some(1));
        form.cycle(true);
        assert_eq!(form.draft.category_id, Some(2));
        form.cycle(true);
        assert_eq!(form.draft.category_id, Some(1));
        form.cycle(false);
        assert_eq!(form.draft.category_id, Some(2));
    }

    #[test]
    fn focus_wraps_around_the_schema() {
        let mut form = rich_form();
        assert_eq!(form.focus, Field::Name);
        form.focus_prev();
        assert_eq!(form.focus, Field::Category);
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus, Field::Description);
    }
}
