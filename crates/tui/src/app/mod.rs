use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyEvent};

use crate::{
    client::Client,
    config::AppConfig,
    entries::{
        form::{EntryForm, UpdateFailureReport},
        list::EntryList,
        schema::FormVariant,
    },
    error::{AppError, Result},
    ports::{CategoryGateway, EntryGateway, Navigator, Notifier},
    route::{Navigation, Route},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub level: ToastLevel,
    pub message: String,
    pub expires_at: Instant,
}

/// Toasts and the queue of blocking alerts.
#[derive(Debug)]
pub struct Notices {
    pub toast: Option<ToastState>,
    pub alerts: VecDeque<String>,
    ttl: Duration,
}

impl Notices {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toast: None,
            alerts: VecDeque::new(),
            ttl,
        }
    }

    fn show(&mut self, level: ToastLevel, message: &str) {
        self.toast = Some(ToastState {
            level,
            message: message.to_string(),
            expires_at: Instant::now() + self.ttl,
        });
    }

    pub fn expire(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }
}

impl Notifier for Notices {
    fn success(&mut self, message: &str) {
        self.show(ToastLevel::Success, message);
    }

    fn error(&mut self, message: &str) {
        self.show(ToastLevel::Error, message);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push_back(message.to_string());
    }
}

/// Collects navigations issued while an action runs; the app applies them
/// once the action is done.
#[derive(Debug, Default)]
pub struct Router {
    pending: Vec<Navigation>,
}

impl Navigator for Router {
    fn navigate(&mut self, navigation: Navigation) {
        tracing::debug!(path = %navigation.route.path(), "navigate");
        self.pending.push(navigation);
    }
}

#[derive(Debug)]
pub struct AppState {
    pub route: Route,
    pub history: Vec<Route>,
    pub list: EntryList,
    pub form: EntryForm,
    pub notices: Notices,
    pub router: Router,
    pub base_url: String,
    form_variant: FormVariant,
    update_failure_report: UpdateFailureReport,
}

impl AppState {
    fn new(config: &AppConfig) -> Self {
        Self {
            route: Route::EntryList,
            history: Vec::new(),
            list: EntryList::default(),
            form: EntryForm::new(config.form_variant, config.update_failure_report),
            notices: Notices::new(Duration::from_millis(config.toast_ttl_ms)),
            router: Router::default(),
            base_url: config.base_url.clone(),
            form_variant: config.form_variant,
            update_failure_report: config.update_failure_report,
        }
    }

    /// Moves to `navigation.route`, remembering where we came from unless the
    /// navigation skips the location change.
    fn record(&mut self, navigation: &Navigation) {
        if !navigation.skip_location_change
            && self.route != navigation.route
            && self.history.last() != Some(&self.route)
        {
            self.history.push(self.route.clone());
        }
        self.route = navigation.route.clone();
    }

    pub fn is_form(&self) -> bool {
        self.route != Route::EntryList
    }

    /// Returns to the previous route without recording the one we leave.
    pub fn back(&mut self) {
        let previous = self.history.pop().unwrap_or(Route::EntryList);
        self.router.navigate(Navigation::transient(previous));
    }

    /// Applies the navigations issued by the last action, in order.
    ///
    /// A transient navigation followed by another one still moves the
    /// location, so the next route is recorded against it, but its component
    /// is not activated.
    pub async fn apply_navigations<E, C>(&mut self, entries: &E, categories: &C)
    where
        E: EntryGateway,
        C: CategoryGateway,
    {
        let pending = std::mem::take(&mut self.router.pending);
        let count = pending.len();
        for (i, navigation) in pending.into_iter().enumerate() {
            if navigation.skip_location_change && i + 1 < count {
                self.record(&navigation);
                continue;
            }
            self.enter(navigation, entries, categories).await;
        }
    }

    pub async fn enter<E, C>(&mut self, navigation: Navigation, entries: &E, categories: &C)
    where
        E: EntryGateway,
        C: CategoryGateway,
    {
        self.record(&navigation);
        tracing::info!(path = %self.route.path(), "entering route");

        match self.route.form_segments() {
            None => self.load_list(entries, categories).await,
            Some(segments) => {
                self.form = EntryForm::new(self.form_variant, self.update_failure_report);
                self.form
                    .activate(&segments, entries, categories, &mut self.notices)
                    .await;
                tracing::debug!(
                    mode = ?self.form.mode(),
                    state = ?self.form.state(),
                    "entry form ready"
                );
            }
        }
    }

    /// Loads the entries and, alongside, the category names shown in the rows.
    pub async fn load_list<E, C>(&mut self, entries: &E, categories: &C)
    where
        E: EntryGateway,
        C: CategoryGateway,
    {
        let (_, fetched) = tokio::join!(
            self.list.load(entries, &mut self.notices),
            categories.get_all()
        );
        self.list.cache_categories(fetched);
    }
}

pub struct App {
    config: AppConfig,
    client: Client,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url, &config.api_prefix)?;
        let state = AppState::new(&config);

        Ok(Self {
            config,
            client,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let start = Route::parse(&self.config.start_path).unwrap_or_else(|| {
            tracing::warn!(path = %self.config.start_path, "unknown start path, opening the list");
            Route::EntryList
        });

        let mut terminal = ui::setup_terminal()?;
        self.state
            .enter(Navigation::transient(start), &self.client, &self.client)
            .await;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key).await;
                    self.state
                        .apply_navigations(&self.client, &self.client)
                        .await;
                }
            }
            self.state.notices.expire(Instant::now());
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key, self.state.is_form());

        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        // Modals swallow everything but their own answers.
        if self.state.notices.current_alert().is_some() {
            if matches!(action, AppAction::Submit | AppAction::Cancel) {
                self.state.notices.dismiss_alert();
            }
            return;
        }
        if self.state.list.pending_delete().is_some() {
            let answer = match action {
                AppAction::Input('y' | 'Y' | 's' | 'S') | AppAction::Submit => Some(true),
                AppAction::Input('n' | 'N') | AppAction::Cancel => Some(false),
                _ => None,
            };
            if let Some(confirmed) = answer {
                let AppState { list, notices, .. } = &mut self.state;
                list.resolve_delete(confirmed, &self.client, notices).await;
            }
            return;
        }

        if self.state.is_form() {
            self.handle_form_action(action).await;
        } else {
            self.handle_list_action(action).await;
        }
    }

    async fn handle_list_action(&mut self, action: AppAction) {
        let list = &mut self.state.list;
        match action {
            AppAction::Up | AppAction::Input('k') => list.select_prev(),
            AppAction::Down | AppAction::Input('j') => list.select_next(),
            AppAction::Input('n') => {
                self.state.router.navigate(Navigation::to(Route::NewEntry));
            }
            AppAction::Submit | AppAction::Input('e') => {
                if let Some(id) = list.selected_entry().and_then(|entry| entry.id) {
                    self.state.router.navigate(Navigation::to(Route::edit(id)));
                }
            }
            AppAction::Input('d') => {
                list.request_delete(list.selected);
            }
            AppAction::Input('r') => {
                self.state.load_list(&self.client, &self.client).await;
            }
            _ => {}
        }
    }

    async fn handle_form_action(&mut self, action: AppAction) {
        let form = &mut self.state.form;
        match action {
            AppAction::NextField | AppAction::Down => form.focus_next(),
            AppAction::PrevField | AppAction::Up => form.focus_prev(),
            AppAction::Left => form.cycle(false),
            AppAction::Right => form.cycle(true),
            AppAction::Backspace => form.backspace(),
            AppAction::Input(' ') if !form.focus.is_text() => form.cycle(true),
            AppAction::Input(ch) => form.input(ch),
            AppAction::Submit => {
                if form.can_submit() {
                    let AppState {
                        form,
                        notices,
                        router,
                        ..
                    } = &mut self.state;
                    form.submit(&self.client, notices, router).await;
                }
            }
            AppAction::Cancel => self.state.back(),
            _ => {}
        }
    }
}
