/// View controller for the checker page
///
/// Owns everything the page shows: the last accepted snapshot, the poller,
/// the favorites store and the rendered result lists. UI components call in
/// here and render whatever the dashboard exposes; nothing in this module
/// touches the DOM.

use crate::check_data::{CheckRequest, ProgressSnapshot};
use crate::domain::{parse_domains, pluralize};
use crate::error::{CheckError, ListKind};
use crate::links::{ExternalLinks, LinkBuilder};
use crate::poller::{Poller, Ticket, TickOutcome};
use crate::render::{Renderer, empty_state, EMPTY_INDEXED, EMPTY_NOT_INDEXED};
use crate::storage::{Favorites, FavoritesStore};

const REQUEST_FAILED: &str = "Failed to start processing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Toast {
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Toast {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }
}

impl From<CheckError> for Toast {
    fn from(e: CheckError) -> Self {
        Toast::error(e.to_string())
    }
}

/// One list ready for the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedList {
    pub kind: ListKind,
    pub count: usize,
    pub text: String,
}

impl CopiedList {
    /// Confirmation after a successful clipboard write
    pub fn toast(&self) -> Toast {
        let noun = match self.kind {
            ListKind::Favorites => "favorite",
            ListKind::Indexed | ListKind::NotIndexed => "domain",
        };
        Toast::success(format!("{} copied to clipboard!", pluralize(self.count, noun)))
    }
}

/// Progress badge: a percentage while running, "Complete" at the end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Percent(u8),
    Complete,
}

/// What the UI should do after a poll response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Ignored,
    Skipped,
    Updated,
    Completed(Toast),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    pub is_favorite: bool,
    pub toast: Toast,
}

/// Markup for the three result panels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLists {
    pub indexed: String,
    pub not_indexed: String,
    pub errors: String,
}

impl RenderedLists {
    fn placeholders() -> Self {
        RenderedLists {
            indexed: empty_state(EMPTY_INDEXED),
            not_indexed: empty_state(EMPTY_NOT_INDEXED),
            errors: String::new(),
        }
    }
}

pub struct Dashboard {
    favorites: FavoritesStore,
    links: Box<dyn LinkBuilder>,
    poller: Poller,
    snapshot: ProgressSnapshot,
    lists: RenderedLists,
    badge: Badge,
    submitting: bool,
    started: bool,
}

impl Dashboard {
    pub fn new(favorites: FavoritesStore) -> Self {
        Self::with_links(favorites, Box::new(ExternalLinks))
    }

    pub fn with_links(favorites: FavoritesStore, links: Box<dyn LinkBuilder>) -> Self {
        Dashboard {
            favorites,
            links,
            poller: Poller::new(),
            snapshot: ProgressSnapshot::default(),
            lists: RenderedLists::placeholders(),
            badge: Badge::Percent(0),
            submitting: false,
            started: false,
        }
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    pub fn lists(&self) -> &RenderedLists {
        &self.lists
    }

    pub fn badge(&self) -> Badge {
        self.badge
    }

    pub fn percent(&self) -> u8 {
        self.snapshot.percent()
    }

    /// Submit affordance is disabled while a job is starting or running
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Progress and result panels are shown once a check has been submitted
    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn show_errors(&self) -> bool {
        !self.snapshot.errors.is_empty()
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    /// Validate the textarea and reset the page for a new job
    ///
    /// Blank input is rejected without touching any state.
    pub fn submit(&mut self, text: &str, max_workers: u32) -> Result<CheckRequest, CheckError> {
        let domains = parse_domains(text);
        if domains.is_empty() {
            return Err(CheckError::Validation);
        }

        log::info!("Submitting {} domains with {} workers", domains.len(), max_workers);
        self.submitting = true;
        self.started = true;
        self.reset_results();

        Ok(CheckRequest {
            domains: text.trim().to_string(),
            max_workers,
        })
    }

    /// The backend refused the job; polling is not started
    pub fn submit_rejected(&mut self, message: Option<String>) -> Toast {
        self.submitting = false;
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| REQUEST_FAILED.to_string());
        log::warn!("Check request rejected: {}", message);
        Toast::from(CheckError::Request(format!("Error starting check: {}", message)))
    }

    pub fn submit_accepted(&mut self, interval_ms: u32) -> bool {
        self.poller.start(interval_ms)
    }

    pub fn begin_tick(&mut self) -> Option<Ticket> {
        self.poller.begin_tick()
    }

    pub fn deliver(
        &mut self,
        ticket: Ticket,
        result: Result<ProgressSnapshot, CheckError>,
    ) -> Delivery {
        match self.poller.deliver(ticket, result) {
            TickOutcome::Stale => Delivery::Ignored,
            TickOutcome::Failed => Delivery::Skipped,
            TickOutcome::Snapshot(snapshot) => {
                self.on_snapshot(snapshot);
                Delivery::Updated
            }
            TickOutcome::Finished(snapshot) => {
                self.on_snapshot(snapshot);
                Delivery::Completed(self.on_complete())
            }
        }
    }

    /// Replace everything shown with this snapshot
    pub fn on_snapshot(&mut self, snapshot: ProgressSnapshot) {
        let favorites = self.favorites.list();
        let renderer = Renderer::new(self.links.as_ref());

        self.lists = RenderedLists {
            indexed: renderer.indexed_list(&snapshot.indexed, |d| favorites.contains(d)),
            not_indexed: renderer.not_indexed_list(&snapshot.not_indexed),
            errors: renderer.error_list(&snapshot.errors),
        };
        self.badge = Badge::Percent(snapshot.percent());
        self.snapshot = snapshot;
    }

    pub fn on_complete(&mut self) -> Toast {
        log::info!(
            "Check complete: {} indexed, {} not indexed, {} errors",
            self.snapshot.indexed.len(),
            self.snapshot.not_indexed.len(),
            self.snapshot.errors.len()
        );
        self.poller.stop();
        self.badge = Badge::Complete;
        self.submitting = false;
        Toast::success("All domains checked successfully!")
    }

    pub fn favorites(&self) -> Favorites {
        self.favorites.list()
    }

    pub fn favorites_markup(&self) -> String {
        let renderer = Renderer::new(self.links.as_ref());
        renderer.favorites_list(&self.favorites.list().entries)
    }

    pub fn is_favorite(&self, domain: &str) -> bool {
        self.favorites.contains(domain)
    }

    /// Flip membership of one domain; count is the one shown when clicked
    pub fn toggle_favorite(&mut self, domain: &str, count: u32) -> FavoriteToggle {
        if self.favorites.contains(domain) {
            FavoriteToggle {
                is_favorite: false,
                toast: self.remove_favorite(domain),
            }
        } else {
            self.favorites.add(domain, count);
            FavoriteToggle {
                is_favorite: true,
                toast: Toast::success(format!("Added \"{}\" to favorites", domain)),
            }
        }
    }

    pub fn remove_favorite(&mut self, domain: &str) -> Toast {
        self.favorites.remove(domain);
        Toast::success(format!("Removed \"{}\" from favorites", domain))
    }

    /// Callers confirm with the user before calling this
    pub fn clear_favorites(&mut self) -> Toast {
        self.favorites.clear();
        Toast::success("All favorites cleared")
    }

    /// Newline-joined domains of one list, for the clipboard
    pub fn copy_list(&self, kind: ListKind) -> Result<CopiedList, CheckError> {
        let domains: Vec<String> = match kind {
            ListKind::Indexed => self.snapshot.indexed.iter().map(|r| r.domain.clone()).collect(),
            ListKind::NotIndexed => self.snapshot.not_indexed.clone(),
            ListKind::Favorites => self
                .favorites
                .list()
                .entries
                .into_iter()
                .map(|f| f.domain)
                .collect(),
        };
        if domains.is_empty() {
            return Err(CheckError::EmptyList(kind));
        }
        Ok(CopiedList {
            kind,
            count: domains.len(),
            text: domains.join("\n"),
        })
    }

    /// Page teardown
    pub fn shutdown(&mut self) {
        self.poller.stop();
    }

    fn reset_results(&mut self) {
        self.snapshot = ProgressSnapshot::default();
        self.lists = RenderedLists::placeholders();
        self.badge = Badge::Percent(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check_data::{DomainRecord, ErrorRecord};
    use crate::poller::{PollerState, DEFAULT_POLL_INTERVAL_MS};
    use crate::storage::MemoryBackend;

    fn create_test_dashboard() -> Dashboard {
        Dashboard::new(FavoritesStore::new(Box::new(MemoryBackend::new())))
    }

    fn running(completed: u32, total: u32) -> ProgressSnapshot {
        ProgressSnapshot {
            total,
            completed,
            in_progress: true,
            ..Default::default()
        }
    }

    fn finished() -> ProgressSnapshot {
        ProgressSnapshot {
            total: 10,
            completed: 10,
            indexed: vec![DomainRecord::new("a.com", 3)],
            not_indexed: vec!["b.com".to_string()],
            errors: vec![],
            in_progress: false,
        }
    }

    fn submitted() -> Dashboard {
        let mut dashboard = create_test_dashboard();
        dashboard.submit("a.com\nb.com", 3).unwrap();
        dashboard.submit_accepted(DEFAULT_POLL_INTERVAL_MS);
        dashboard
    }

    #[test]
    fn test_submit_blank_input_is_rejected() {
        for text in ["", "   ", "\n\n", " \t \n  \r\n"] {
            let mut dashboard = create_test_dashboard();

            assert_eq!(dashboard.submit(text, 3), Err(CheckError::Validation));
            assert!(!dashboard.is_submitting());
            assert!(!dashboard.has_started());
            assert_eq!(dashboard.begin_tick(), None);
        }
    }

    #[test]
    fn test_submit_builds_request_and_resets() {
        let mut dashboard = create_test_dashboard();
        dashboard.on_snapshot(finished());

        let request = dashboard.submit("  a.com\n\nb.com  \n", 5).unwrap();

        assert_eq!(request.domains, "a.com\n\nb.com");
        assert_eq!(request.max_workers, 5);
        assert!(dashboard.is_submitting());
        assert_eq!(dashboard.snapshot(), &ProgressSnapshot::default());
        assert_eq!(dashboard.badge(), Badge::Percent(0));
        assert!(dashboard.lists().indexed.contains(EMPTY_INDEXED));
        // Polling waits for the backend to accept the job
        assert!(!dashboard.poller().is_polling());
    }

    #[test]
    fn test_submit_rejected_uses_server_message() {
        let mut dashboard = create_test_dashboard();
        dashboard.submit("a.com", 3).unwrap();

        let toast = dashboard.submit_rejected(Some("No API keys configured".to_string()));

        assert_eq!(toast, Toast::error("Error starting check: No API keys configured"));
        assert!(!dashboard.is_submitting());
        assert!(!dashboard.poller().is_polling());
    }

    #[test]
    fn test_submit_rejected_without_message() {
        let mut dashboard = create_test_dashboard();
        dashboard.submit("a.com", 3).unwrap();

        let toast = dashboard.submit_rejected(None);

        assert_eq!(toast.message, "Error starting check: Failed to start processing");
        assert_eq!(toast.kind, ToastKind::Error);
    }

    #[test]
    fn test_snapshot_updates_counters() {
        let mut dashboard = submitted();
        let ticket = dashboard.begin_tick().unwrap();
        let snapshot = ProgressSnapshot {
            total: 3,
            completed: 1,
            indexed: vec![DomainRecord::new("a.com", 4)],
            not_indexed: vec![],
            errors: vec![],
            in_progress: true,
        };

        assert_eq!(dashboard.deliver(ticket, Ok(snapshot)), Delivery::Updated);

        assert_eq!(dashboard.percent(), 33);
        assert_eq!(dashboard.badge(), Badge::Percent(33));
        assert!(dashboard.lists().indexed.contains("a.com"));
        assert!(dashboard.lists().not_indexed.contains(EMPTY_NOT_INDEXED));
        assert!(!dashboard.show_errors());
    }

    #[test]
    fn test_error_panel_visibility() {
        let mut dashboard = submitted();
        let mut snapshot = running(1, 2);
        snapshot.errors = vec![ErrorRecord {
            domain: "c.com".to_string(),
            error: "Request timeout".to_string(),
        }];

        dashboard.on_snapshot(snapshot);

        assert!(dashboard.show_errors());
        assert!(dashboard.lists().errors.contains("Request timeout"));
    }

    #[test]
    fn test_terminal_snapshot_completes_once() {
        let mut dashboard = submitted();
        let first = dashboard.begin_tick().unwrap();
        let second = dashboard.begin_tick().unwrap();

        let outcome = dashboard.deliver(first, Ok(finished()));
        assert_eq!(
            outcome,
            Delivery::Completed(Toast::success("All domains checked successfully!"))
        );
        assert_eq!(dashboard.poller().state(), PollerState::Idle);
        assert_eq!(dashboard.badge(), Badge::Complete);
        assert!(!dashboard.is_submitting());

        assert_eq!(dashboard.deliver(second, Ok(finished())), Delivery::Ignored);
        assert_eq!(dashboard.begin_tick(), None);
    }

    #[test]
    fn test_late_older_snapshot_does_not_regress() {
        let mut dashboard = submitted();
        let a = dashboard.begin_tick().unwrap();
        let b = dashboard.begin_tick().unwrap();

        dashboard.deliver(b, Ok(running(7, 10)));
        assert_eq!(dashboard.deliver(a, Ok(running(4, 10))), Delivery::Ignored);

        assert_eq!(dashboard.snapshot().completed, 7);
        assert_eq!(dashboard.percent(), 70);
    }

    #[test]
    fn test_failed_tick_keeps_state() {
        let mut dashboard = submitted();
        let ok = dashboard.begin_tick().unwrap();
        dashboard.deliver(ok, Ok(running(2, 10)));

        let bad = dashboard.begin_tick().unwrap();
        let outcome = dashboard.deliver(bad, Err(CheckError::PollTransport("timeout".into())));

        assert_eq!(outcome, Delivery::Skipped);
        assert_eq!(dashboard.snapshot().completed, 2);
        assert!(dashboard.poller().is_polling());
    }

    #[test]
    fn test_response_after_shutdown_is_ignored() {
        let mut dashboard = submitted();
        let ticket = dashboard.begin_tick().unwrap();

        dashboard.shutdown();

        assert_eq!(dashboard.deliver(ticket, Ok(running(5, 10))), Delivery::Ignored);
        assert_eq!(dashboard.snapshot().completed, 0);
    }

    #[test]
    fn test_star_state_follows_favorites() {
        let mut dashboard = submitted();
        dashboard.toggle_favorite("a.com", 3);

        dashboard.on_snapshot(finished());

        assert!(dashboard.lists().indexed.contains("action-btn favorite active"));
    }

    #[test]
    fn test_toggle_favorite() {
        let mut dashboard = create_test_dashboard();

        let on = dashboard.toggle_favorite("a.com", 3);
        assert!(on.is_favorite);
        assert_eq!(on.toast.message, "Added \"a.com\" to favorites");
        assert!(dashboard.is_favorite("a.com"));
        assert_eq!(dashboard.favorites().entries[0].count, 3);

        let off = dashboard.toggle_favorite("a.com", 3);
        assert!(!off.is_favorite);
        assert_eq!(off.toast.message, "Removed \"a.com\" from favorites");
        assert!(dashboard.favorites().is_empty());
    }

    #[test]
    fn test_favorites_markup() {
        let mut dashboard = create_test_dashboard();
        assert!(dashboard.favorites_markup().contains("No favorite domains yet"));

        dashboard.toggle_favorite("a.com", 2);

        assert!(dashboard.favorites_markup().contains("action-btn remove"));
    }

    #[test]
    fn test_clear_favorites() {
        let mut dashboard = create_test_dashboard();
        dashboard.toggle_favorite("a.com", 1);
        dashboard.toggle_favorite("b.com", 1);

        let toast = dashboard.clear_favorites();

        assert_eq!(toast.message, "All favorites cleared");
        assert!(dashboard.favorites().is_empty());
    }

    #[test]
    fn test_copy_empty_favorites() {
        let dashboard = create_test_dashboard();

        assert_eq!(
            dashboard.copy_list(ListKind::Favorites),
            Err(CheckError::EmptyList(ListKind::Favorites))
        );
    }

    #[test]
    fn test_copy_favorites() {
        let mut dashboard = create_test_dashboard();
        dashboard.toggle_favorite("a.com", 1);
        dashboard.toggle_favorite("b.com", 2);

        let copied = dashboard.copy_list(ListKind::Favorites).unwrap();

        assert_eq!(copied.text, "a.com\nb.com");
        assert_eq!(copied.count, 2);
        assert_eq!(copied.toast().message, "2 favorites copied to clipboard!");
    }

    #[test]
    fn test_copy_result_lists() {
        let mut dashboard = submitted();
        assert_eq!(
            dashboard.copy_list(ListKind::Indexed),
            Err(CheckError::EmptyList(ListKind::Indexed))
        );

        dashboard.on_snapshot(finished());

        let indexed = dashboard.copy_list(ListKind::Indexed).unwrap();
        assert_eq!(indexed.text, "a.com");
        assert_eq!(indexed.toast().message, "1 domain copied to clipboard!");
        assert_eq!(dashboard.copy_list(ListKind::NotIndexed).unwrap().text, "b.com");
    }

    #[test]
    fn test_copy_count_comes_from_the_list() {
        let mut dashboard = create_test_dashboard();
        dashboard.toggle_favorite("a.com", 1);
        dashboard.toggle_favorite("b.com\nc.com", 0);
        dashboard.toggle_favorite("d.com", 3);

        let copied = dashboard.copy_list(ListKind::Favorites).unwrap();

        assert_eq!(copied.count, dashboard.favorites().len());
        assert_eq!(copied.toast().message, "3 favorites copied to clipboard!");
    }
}
