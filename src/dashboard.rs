pub mod api;
pub mod debounce;
pub mod detail;

use chrono::{NaiveDate, Utc};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};

use crate::export::document::{self, RegionRenderer};
use crate::export::{spreadsheet, ExportError, ExportFile};
use crate::models::application::{ApplicationRecord, ApplicationStatus, StatusFilter};
use crate::request::{ListParams, StatusUpdate};
use api::{ApplicationsApi, Notice, Notifier};
use debounce::{Debouncer, QUIET_PERIOD};
use detail::DetailView;

pub const UPDATE_SUCCEEDED: &str = "Application status updated successfully!";

/// What the admin applications page shows. The detail panel is open exactly when an
/// application is selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub applications: Vec<ApplicationRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub search: String,
    pub status_filter: StatusFilter,
    pub selected: Option<ApplicationRecord>,
    pub updating: bool,
}

impl DashboardState {
    pub fn detail_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn detail(&self) -> Option<DetailView> {
        self.selected.as_ref().map(DetailView::from)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Search(String),
    Filter(StatusFilter),
    Select(i32),
    CloseDetail,
    UpdateStatus { id: i32, status: ApplicationStatus, notes: String },
    Reload,
}

pub struct Dashboard<A, N> {
    api: A,
    notifier: N,
    state: DashboardState,
    debouncer: Debouncer,
    observer: Option<watch::Sender<DashboardState>>,
}

impl<A, N> Dashboard<A, N>
where
    A: ApplicationsApi,
    N: Notifier,
{
    pub fn new(api: A, notifier: N) -> Self {
        Self::with_quiet_period(api, notifier, QUIET_PERIOD)
    }

    pub fn with_quiet_period(api: A, notifier: N, quiet: Duration) -> Self {
        Self {
            api,
            notifier,
            state: DashboardState {
                loading: true,
                ..Default::default()
            },
            debouncer: Debouncer::new(quiet),
            observer: None,
        }
    }

    fn publish(&self) {
        if let Some(observer) = &self.observer {
            observer.send_replace(self.state.clone());
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Initial load of the page.
    pub async fn open(&mut self) {
        self.fetch().await
    }

    /// Tears the page down; a pending re-query never fires.
    pub fn close(&mut self) {
        self.debouncer.cancel();
    }

    pub fn set_search(&mut self, search: impl Into<String>, now: Instant) {
        self.state.search = search.into();
        self.debouncer.schedule(now);
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter, now: Instant) {
        self.state.status_filter = filter;
        self.debouncer.schedule(now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Issues the pending re-query once the input has been quiet long enough.
    pub async fn tick(&mut self, now: Instant) -> bool {
        if !self.debouncer.fire(now) {
            return false;
        }
        self.fetch().await;
        true
    }

    pub async fn fetch(&mut self) {
        let params = ListParams {
            search: Some(self.state.search.clone()),
            status: self.state.status_filter,
        };
        self.state.loading = true;
        match self.api.list(&params).await {
            Ok(applications) => {
                self.state.applications = applications;
                self.state.error = None;
            }
            Err(e) => {
                log::warn!("fetching applications failed: {}", e);
                self.state.error = Some(e.to_string());
            }
        }
        self.state.loading = false;
    }

    pub fn select(&mut self, id: i32) -> bool {
        self.state.selected = self.state.applications.iter().find(|app| app.id == id).cloned();
        self.state.selected.is_some()
    }

    pub fn close_detail(&mut self) {
        self.state.selected = None;
    }

    /// Sends a review and, once the server accepts it, patches the listed application in place.
    /// Returns whether the update went through.
    pub async fn update_status(&mut self, id: i32, status: ApplicationStatus, notes: impl Into<String>) -> bool {
        if self.state.updating {
            return false;
        }
        let notes = notes.into();
        self.state.updating = true;
        // observers disable the submit action while the request is out
        self.publish();
        let update = StatusUpdate {
            status,
            admin_notes: Some(notes.clone()),
        };
        let res = self.api.update_status(id, &update).await;
        self.state.updating = false;
        match res {
            Ok(()) => {
                let review_date = Utc::now().to_rfc3339();
                if let Some(app) = self.state.applications.iter_mut().find(|app| app.id == id) {
                    app.status = Some(status.as_str().into());
                    app.admin_notes = Some(notes);
                    app.review_date = Some(review_date);
                }
                self.state.selected = None;
                self.notifier.notify(Notice::Success(UPDATE_SUCCEEDED.into()));
                true
            }
            Err(e) => {
                self.notifier.notify(Notice::Error(e.to_string()));
                false
            }
        }
    }

    /// Spreadsheet of the applications currently listed.
    pub fn export_spreadsheet(&self, today: NaiveDate) -> Result<ExportFile, ExportError> {
        spreadsheet::export(&self.state.applications, today)
    }

    /// PDF capture of the open detail panel.
    pub fn export_document<R>(&self, renderer: &R) -> Result<ExportFile, ExportError>
    where
        R: RegionRenderer,
    {
        let selected = self.state.selected.as_ref().ok_or(ExportError::NothingSelected)?;
        document::export(renderer, &DetailView::from(selected), Some(selected.id))
    }

    pub async fn handle(&mut self, event: DashboardEvent, now: Instant) {
        match event {
            DashboardEvent::Search(search) => self.set_search(search, now),
            DashboardEvent::Filter(filter) => self.set_status_filter(filter, now),
            DashboardEvent::Select(id) => {
                if !self.select(id) {
                    log::debug!("application {} is not listed", id);
                }
            }
            DashboardEvent::CloseDetail => self.close_detail(),
            DashboardEvent::UpdateStatus { id, status, notes } => {
                if self.state.selected.as_ref().map(|app| app.id) != Some(id) {
                    log::debug!("status update for application {} dropped, it is not the open one", id);
                    return;
                }
                self.update_status(id, status, notes).await;
            }
            DashboardEvent::Reload => self.fetch().await,
        }
    }

    /// Processes events until the sender goes away, re-querying when the debounce deadline
    /// passes. A snapshot of the state is published after every step, and when a status update
    /// goes out.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<DashboardEvent>, state_tx: watch::Sender<DashboardState>) -> Self {
        self.observer = Some(state_tx);
        self.publish();
        loop {
            let deadline = self.debouncer.deadline();
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle(event, Instant::now()).await,
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.tick(Instant::now()).await;
                }
            }
            self.publish();
        }
        self.close();
        self.observer = None;
        self
    }
}
