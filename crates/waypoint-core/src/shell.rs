//! Browser shell controller
//!
//! Owns the policy, page selector, progress and page-load state. The page
//! loader and the display surface are external and reached through traits.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;
use url::Url;

use waypoint_navigation::{DisplayFraction, LoadState, PageSelector, ProgressObserver};
use waypoint_policy::{DecisionHandler, NavigationPolicy, NavigationRequest, PolicyDecision};

use crate::config::Config;
use crate::delegate::{NavigationDelegate, PageLoader, Presenter};
use crate::Result;

/// Snapshot of the current page load
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageLoad {
    pub state: LoadState,
    /// Last URL the policy allowed
    pub url: Option<Url>,
    /// Title reported when the last load finished
    pub title: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl PageLoad {
    /// An allowed load has started and not yet finished.
    pub fn in_flight(&self) -> bool {
        self.started_at.is_some() && self.finished_at.is_none()
    }
}

#[derive(Clone)]
pub struct Shell {
    config: Config,
    policy: Arc<NavigationPolicy>,
    selector: PageSelector,
    loader: Arc<dyn PageLoader>,
    presenter: Arc<dyn Presenter>,
    progress: Arc<Mutex<ProgressObserver>>,
    page: Arc<RwLock<PageLoad>>,
}

impl Shell {
    pub fn new(
        config: Config,
        loader: Arc<dyn PageLoader>,
        presenter: Arc<dyn Presenter>,
    ) -> Result<Self> {
        config.validate()?;
        let policy = config.build_policy()?;
        let selector = config.build_selector()?;

        Ok(Self {
            config,
            policy: Arc::new(policy),
            selector,
            loader,
            presenter,
            progress: Arc::new(Mutex::new(ProgressObserver::new())),
            page: Arc::new(RwLock::new(PageLoad::default())),
        })
    }

    /// Load the first allow-list entry.
    pub fn start(&self) -> Result<Url> {
        self.loader
            .set_back_forward_gestures(self.config.back_forward_gestures);

        let url = self.selector.initial()?;
        tracing::info!(url = %url, "Shell started");
        self.loader.load(&url);
        Ok(url)
    }

    // === Page selection ===

    /// Ask the presenter to show the page chooser.
    pub fn open_page_menu(&self) {
        self.presenter
            .present_choices(self.selector.menu_title(), self.selector.choices());
    }

    /// Load the chosen entry. An invalid choice loads nothing.
    pub fn open_page(&self, choice: &str) -> Result<Url> {
        match self.selector.select(choice) {
            Ok(url) => {
                self.loader.load(&url);
                Ok(url)
            }
            Err(e) => {
                tracing::debug!(choice = %choice, error = %e, "Ignoring page selection");
                Err(e.into())
            }
        }
    }

    // === Toolbar ===

    pub fn reload(&self) {
        self.loader.reload();
    }

    pub fn go_back(&self) {
        self.loader.go_back();
    }

    pub fn go_forward(&self) {
        self.loader.go_forward();
    }

    // === State ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn policy(&self) -> &NavigationPolicy {
        &self.policy
    }

    pub fn selector(&self) -> &PageSelector {
        &self.selector
    }

    pub fn page(&self) -> PageLoad {
        self.page.read().clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.page.read().state
    }

    pub fn title(&self) -> Option<String> {
        self.page.read().title.clone()
    }

    pub fn progress(&self) -> f64 {
        self.progress.lock().current()
    }

    fn record_decision(&self, request: &NavigationRequest, decision: PolicyDecision) {
        let mut page = self.page.write();

        let target = match decision {
            PolicyDecision::Allow => LoadState::Loading,
            PolicyDecision::Cancel => LoadState::Cancelled,
        };

        if let Err(e) = page.state.transition_to(target) {
            tracing::warn!(request_id = %request.id, error = %e, "Unexpected load state");
            return;
        }

        if decision.is_allowed() {
            page.url = request.url.clone();
            page.started_at = Some(Utc::now());
            page.finished_at = None;
        }
    }
}

impl NavigationDelegate for Shell {
    fn on_navigation_requested(
        &self,
        request: NavigationRequest,
        decision_handler: DecisionHandler,
    ) {
        let decision = self.policy.decide(&request);
        self.record_decision(&request, decision);

        if !decision.is_allowed() {
            tracing::info!(request_id = %request.id, url = %request.raw, "Navigation blocked");
        }

        // Locks are released before the loader hears back, it may re-enter.
        decision_handler.decide(decision);
    }

    fn on_load_started(&self) {
        let fraction = self.progress.lock().reset();
        self.presenter.update_progress(fraction);
    }

    fn on_progress_changed(&self, new_value: f64) {
        let fraction: DisplayFraction = self.progress.lock().on_progress_changed(new_value);
        self.presenter.update_progress(fraction);
    }

    fn on_load_finished(&self, title: &str) {
        {
            let mut page = self.page.write();

            // A blocked sub-navigation leaves the allowed load still running.
            if page.state == LoadState::Cancelled && page.in_flight() {
                page.state = LoadState::Loading;
            }

            if let Err(e) = page.state.transition_to(LoadState::Finished) {
                tracing::warn!(title = %title, error = %e, "Load finished outside of a load");
                return;
            }
            page.title = Some(title.to_string());
            page.finished_at = Some(Utc::now());
        }

        tracing::debug!(title = %title, "Page load finished");
        self.presenter.update_title(title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum LoaderCall {
        Load(String),
        Reload,
        Back,
        Forward,
        Gestures(bool),
    }

    #[derive(Default)]
    struct RecordingLoader {
        calls: Mutex<Vec<LoaderCall>>,
    }

    impl PageLoader for RecordingLoader {
        fn load(&self, url: &Url) {
            self.calls.lock().push(LoaderCall::Load(url.to_string()));
        }

        fn reload(&self) {
            self.calls.lock().push(LoaderCall::Reload);
        }

        fn go_back(&self) {
            self.calls.lock().push(LoaderCall::Back);
        }

        fn go_forward(&self) {
            self.calls.lock().push(LoaderCall::Forward);
        }

        fn set_back_forward_gestures(&self, enabled: bool) {
            self.calls.lock().push(LoaderCall::Gestures(enabled));
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        menus: Mutex<Vec<(String, Vec<String>)>>,
        progress: Mutex<Vec<f32>>,
        titles: Mutex<Vec<String>>,
    }

    impl Presenter for RecordingPresenter {
        fn present_choices(&self, title: &str, choices: &[String]) {
            self.menus.lock().push((title.to_string(), choices.to_vec()));
        }

        fn update_progress(&self, fraction: DisplayFraction) {
            self.progress.lock().push(fraction.value());
        }

        fn update_title(&self, title: &str) {
            self.titles.lock().push(title.to_string());
        }
    }

    fn shell() -> (Shell, Arc<RecordingLoader>, Arc<RecordingPresenter>) {
        let loader = Arc::new(RecordingLoader::default());
        let presenter = Arc::new(RecordingPresenter::default());
        let shell = Shell::new(Config::default(), loader.clone(), presenter.clone()).unwrap();
        (shell, loader, presenter)
    }

    fn request(shell: &Shell, raw: &str) -> Vec<PolicyDecision> {
        let decisions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&decisions);
        shell.on_navigation_requested(
            NavigationRequest::parse(raw),
            DecisionHandler::new(move |d| sink.lock().push(d)),
        );
        let recorded = decisions.lock().clone();
        recorded
    }

    #[test]
    fn test_start_loads_first_entry() {
        let (shell, loader, _) = shell();
        let url = shell.start().unwrap();

        assert_eq!(url.host_str(), Some("apple.com"));
        assert_eq!(
            *loader.calls.lock(),
            vec![
                LoaderCall::Gestures(true),
                LoaderCall::Load("https://apple.com/".to_string()),
            ]
        );
    }

    #[test]
    fn test_open_page_menu() {
        let (shell, _, presenter) = shell();
        shell.open_page_menu();

        assert_eq!(
            *presenter.menus.lock(),
            vec![(
                "Open page...".to_string(),
                vec!["apple.com".to_string(), "hackingwithswift.com".to_string()],
            )]
        );
    }

    #[test]
    fn test_open_page() {
        let (shell, loader, _) = shell();

        shell.open_page("hackingwithswift.com").unwrap();
        assert!(shell.open_page("not a url").is_err());

        assert_eq!(
            *loader.calls.lock(),
            vec![LoaderCall::Load("https://hackingwithswift.com/".to_string())]
        );
    }

    #[test]
    fn test_toolbar_commands() {
        let (shell, loader, _) = shell();
        shell.go_back();
        shell.reload();
        shell.go_forward();

        assert_eq!(
            *loader.calls.lock(),
            vec![LoaderCall::Back, LoaderCall::Reload, LoaderCall::Forward]
        );
    }

    #[test]
    fn test_each_request_decided_once() {
        let (shell, _, _) = shell();

        assert_eq!(request(&shell, "https://apple.com"), vec![PolicyDecision::Allow]);
        assert_eq!(request(&shell, "https://slashdot.org"), vec![PolicyDecision::Cancel]);
        assert_eq!(request(&shell, "not a url"), vec![PolicyDecision::Cancel]);
        assert_eq!(request(&shell, "about:blank"), vec![PolicyDecision::Cancel]);
    }

    #[test]
    fn test_cancel_leaves_progress_and_title() {
        let (shell, _, presenter) = shell();

        request(&shell, "https://apple.com");
        shell.on_progress_changed(0.5);
        shell.on_load_finished("Apple");

        request(&shell, "https://slashdot.org");

        assert_eq!(shell.load_state(), LoadState::Cancelled);
        assert_eq!(shell.title().as_deref(), Some("Apple"));
        assert_eq!(shell.progress(), 0.5);
        assert_eq!(shell.page().url.unwrap().host_str(), Some("apple.com"));
        assert_eq!(*presenter.titles.lock(), vec!["Apple".to_string()]);
    }

    #[test]
    fn test_load_started_resets_progress() {
        let (shell, _, presenter) = shell();

        shell.on_progress_changed(1.0);
        shell.on_load_started();

        assert_eq!(shell.progress(), 0.0);
        assert_eq!(*presenter.progress.lock(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_progress_not_reset_implicitly() {
        let (shell, _, _) = shell();

        request(&shell, "https://apple.com");
        shell.on_progress_changed(1.0);
        shell.on_load_finished("Apple");
        request(&shell, "https://www.apple.com/iphone");

        assert_eq!(shell.load_state(), LoadState::Loading);
        assert_eq!(shell.progress(), 1.0);
    }

    #[test]
    fn test_end_to_end() {
        let (shell, _, presenter) = shell();

        assert_eq!(
            request(&shell, "https://m.hackingwithswift.com"),
            vec![PolicyDecision::Allow]
        );
        assert_eq!(shell.load_state(), LoadState::Loading);
        assert!(shell.page().started_at.is_some());

        assert_eq!(request(&shell, "https://slashdot.org"), vec![PolicyDecision::Cancel]);
        assert_eq!(request(&shell, "https://m.slashdot.org"), vec![PolicyDecision::Cancel]);

        request(&shell, "https://apple.com");
        shell.on_progress_changed(0.42);
        let shown = presenter.progress.lock().last().copied().unwrap();
        assert!((shown - 0.42).abs() < f32::EPSILON);

        shell.on_load_finished("Apple");
        assert_eq!(shell.load_state(), LoadState::Finished);
        assert_eq!(shell.title().as_deref(), Some("Apple"));
        assert!(shell.page().finished_at.is_some());
        assert_eq!(presenter.titles.lock().last().map(String::as_str), Some("Apple"));
    }

    #[test]
    fn test_blocked_subframe_does_not_hide_finished_load() {
        let (shell, _, presenter) = shell();

        assert_eq!(request(&shell, "https://apple.com"), vec![PolicyDecision::Allow]);
        assert_eq!(
            request(&shell, "https://ads.tracker.net/frame"),
            vec![PolicyDecision::Cancel]
        );
        assert_eq!(shell.load_state(), LoadState::Cancelled);
        assert!(shell.page().in_flight());

        shell.on_load_finished("Apple");

        let page = shell.page();
        assert_eq!(page.state, LoadState::Finished);
        assert_eq!(page.title.as_deref(), Some("Apple"));
        assert!(page.finished_at.is_some());
        assert!(!page.in_flight());
        assert_eq!(*presenter.titles.lock(), vec!["Apple".to_string()]);
    }

    #[test]
    fn test_finish_without_load_changes_nothing() {
        let (shell, _, presenter) = shell();

        shell.on_load_finished("Stray");

        let page = shell.page();
        assert_eq!(page.state, LoadState::Idle);
        assert!(page.title.is_none());
        assert!(page.finished_at.is_none());
        assert!(presenter.titles.lock().is_empty());

        // Blocked navigation after a finished page, then a second finish
        request(&shell, "https://apple.com");
        shell.on_load_finished("Apple");
        request(&shell, "https://slashdot.org");
        let finished_at = shell.page().finished_at;

        shell.on_load_finished("Slashdot");

        let page = shell.page();
        assert_eq!(page.state, LoadState::Cancelled);
        assert_eq!(page.title.as_deref(), Some("Apple"));
        assert_eq!(page.finished_at, finished_at);
        assert_eq!(*presenter.titles.lock(), vec!["Apple".to_string()]);
    }

    #[test]
    fn test_page_load_serializes() {
        let (shell, _, _) = shell();
        request(&shell, "https://apple.com");
        shell.on_load_finished("Apple");

        let json = serde_json::to_value(shell.page()).unwrap();
        assert_eq!(json["state"], "finished");
        assert_eq!(json["url"], "https://apple.com/");
        assert_eq!(json["title"], "Apple");
        assert!(json["finished_at"].is_string());
    }

    #[test]
    fn test_concurrent_requests_each_decided() {
        let (shell, _, _) = shell();
        let decisions = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = ["https://apple.com", "https://slashdot.org"]
            .into_iter()
            .cycle()
            .take(8)
            .map(|raw| {
                let shell = shell.clone();
                let sink = Arc::clone(&decisions);
                std::thread::spawn(move || {
                    shell.on_navigation_requested(
                        NavigationRequest::parse(raw),
                        DecisionHandler::new(move |d| sink.lock().push(d)),
                    );
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let decisions = decisions.lock();
        assert_eq!(decisions.len(), 8);
        assert_eq!(decisions.iter().filter(|d| d.is_allowed()).count(), 4);
    }
}
