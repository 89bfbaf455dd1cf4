use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use crate::analysis;
use crate::config::AppConfig;
use crate::state::{Action, Page, SessionState};
use crate::task::{Completion, TaskKind, TaskOutput, TaskRunner};
use crate::theme::Theme;

/// Seconds a status message stays on the info line
const STATUS_SECONDS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub state: SessionState,
    pub popup: Popup,
    pub config: AppConfig,
    pub theme: Theme,
    pub tasks: TaskRunner,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    // Drives the loading spinner
    pub spinner_frame: usize,

    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let theme = Theme::load(&config.theme);
        let tasks = TaskRunner::new(config.delay());
        tracing::info!(
            "Starting on {:?} page with {} ms analysis delay",
            config.start_page,
            config.delay_ms
        );

        Self {
            state: SessionState::new(config.start_page),
            popup: Popup::None,
            config,
            theme,
            tasks,
            status_message: None,
            status_message_time: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// Set a status message (auto-clears after a few seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Handle popups first
        if self.popup != Popup::None {
            self.handle_popup_key(key);
            return;
        }

        // Keys shared by every page
        match key.code {
            KeyCode::Tab => {
                self.state.apply(Action::SetPage(self.state.page.next()));
                return;
            }
            KeyCode::BackTab => {
                self.state.apply(Action::SetPage(self.state.page.prev()));
                return;
            }
            KeyCode::Home => {
                self.state.apply(Action::SetPage(Page::Optimizer));
                return;
            }
            KeyCode::F(1) => {
                self.popup = Popup::Help;
                return;
            }
            _ => {}
        }

        match self.state.page {
            Page::Optimizer => self.handle_optimizer_key(key),
            Page::Competitor => self.handle_competitor_key(key),
            Page::Pricing => self.handle_pricing_key(key),
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        match self.popup {
            Popup::Help => {
                let close = matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter | KeyCode::Char('q')
                );
                if close {
                    self.popup = Popup::None;
                }
            }
            Popup::None => {}
        }
    }

    fn handle_optimizer_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('t') if ctrl => self.run_analyzer(),
            KeyCode::Char('l') if ctrl => self.run_scorer(),
            KeyCode::Char('u') if ctrl => {
                self.state.apply(Action::ClearText);
                self.set_status("Listing cleared");
            }
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => self.state.apply(Action::InsertChar(c)),
            KeyCode::Enter => self.state.apply(Action::InsertChar('\n')),
            KeyCode::Backspace => self.state.apply(Action::DeleteBackward),
            _ => {}
        }
    }

    fn handle_competitor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('g') | KeyCode::Char(' ') => self.generate_snapshot(),
            KeyCode::Char('c') | KeyCode::Delete => self.state.apply(Action::SnapshotCleared),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_pricing_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
        }
    }

    /// Bracketed paste goes straight into the listing on the optimizer page
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.page == Page::Optimizer && self.popup == Popup::None {
            self.state.apply(Action::InsertStr(text.to_string()));
        }
    }

    /// Submit the "Text AI" advisor over the current listing
    pub fn run_analyzer(&mut self) {
        let id = self.tasks.submit(TaskKind::Analyzer, self.state.listing_text.clone());
        self.state.apply(Action::AnalyzerSubmitted(id));
    }

    /// Submit the Listing Health Score over the current listing
    pub fn run_scorer(&mut self) {
        let id = self.tasks.submit(TaskKind::Scorer, self.state.listing_text.clone());
        self.state.apply(Action::ScorerSubmitted(id));
    }

    pub fn generate_snapshot(&mut self) {
        let snapshot = analysis::competitor_snapshot();
        tracing::info!("Generated snapshot for {}", snapshot.shop_name);
        self.set_status(format!("Snapshot ready: {}", snapshot.shop_name));
        self.state.apply(Action::SnapshotGenerated(snapshot));
    }

    /// Route a finished task into its result slot
    pub fn apply_completion(&mut self, completion: Completion) {
        let Completion { id, output } = completion;
        match output {
            TaskOutput::Advice(advice) => {
                tracing::info!("TAI task {} resolved", id);
                self.state.apply(Action::AnalyzerResolved(id, advice));
            }
            TaskOutput::Health(report) => {
                tracing::info!("LHS task {} resolved with score {}", id, report.score);
                self.state.apply(Action::ScorerResolved(id, report));
            }
        }
    }

    pub fn tick(&mut self) {
        while let Some(completion) = self.tasks.try_next() {
            self.apply_completion(completion);
        }

        if self.state.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }

        // Clear status message after a few seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_SECONDS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ADVICE_DECENT, SUMMARY_SOLID};
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_app() -> App {
        App::new(AppConfig {
            delay_ms: 1200,
            ..AppConfig::default()
        })
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_page_navigation() {
        let mut app = test_app();
        assert_eq!(app.state.page, Page::Optimizer);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.state.page, Page::Competitor);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.state.page, Page::Pricing);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.state.page, Page::Competitor);
        app.handle_key(key(KeyCode::Home));
        assert_eq!(app.state.page, Page::Optimizer);
    }

    #[test]
    fn test_typing_edits_listing() {
        let mut app = test_app();
        type_text(&mut app, "quilt");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "q");
        assert!(!app.should_quit, "q is text on the optimizer page");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state.listing_text, "quilt\n");

        app.handle_key(ctrl('u'));
        assert!(app.state.listing_text.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Listing cleared"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);

        let mut app = test_app();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::F(1)));
        assert_eq!(app.popup, Popup::Help);

        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.state.listing_text.is_empty());

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_generate_snapshot() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('g')));

        let snapshot = app.state.snapshot.as_ref().expect("snapshot generated");
        assert_eq!(snapshot.shop_name, "The Vintage Vault Co.");
        assert_eq!(snapshot.estimated_revenue, 45000);
        assert!(app.state.advice().is_none());

        app.handle_key(key(KeyCode::Char('c')));
        assert!(app.state.snapshot.is_none());
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut app = test_app();
        type_text(&mut app, "mug");

        for page in Page::ALL {
            app.state.apply(Action::SetPage(page));
            let before = app.state.clone();
            for code in [KeyCode::Left, KeyCode::Up, KeyCode::F(5), KeyCode::Insert] {
                app.handle_key(key(code));
            }
            assert_eq!(app.state, before, "{:?} page", page);
            assert!(app.status_message.is_none());
            assert_eq!(app.popup, Popup::None);
            assert!(!app.should_quit);
        }
    }

    #[test]
    fn test_paste_only_on_optimizer() {
        let mut app = test_app();
        app.handle_paste("line one\r\nline two");
        assert_eq!(app.state.listing_text, "line one\nline two");

        app.handle_key(key(KeyCode::Tab));
        app.handle_paste("ignored");
        assert_eq!(app.state.listing_text, "line one\nline two");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_both_analyses() {
        let mut app = test_app();
        app.handle_paste(&"a".repeat(150));

        app.handle_key(ctrl('t'));
        app.handle_key(ctrl('l'));
        assert!(app.state.is_loading());

        tokio::time::sleep(Duration::from_millis(600)).await;
        app.tick();
        assert!(app.state.is_loading());
        assert!(app.state.advice().is_none());

        tokio::time::sleep(Duration::from_millis(700)).await;
        app.tick();
        assert!(!app.state.is_loading());
        assert_eq!(app.state.advice().map(|a| a.text.as_str()), Some(ADVICE_DECENT));
        let report = app.state.health().expect("LHS resolved");
        assert_eq!(report.score, 63);
        assert_eq!(report.summary, SUMMARY_SOLID);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rerun_clears_previous_result() {
        let mut app = test_app();
        app.run_scorer();
        tokio::time::sleep(Duration::from_millis(1300)).await;
        app.tick();
        assert_eq!(app.state.health().map(|h| h.score), Some(42));

        app.handle_paste(&"b".repeat(500));
        app.run_scorer();
        assert!(app.state.health().is_none());
        assert!(app.state.is_loading());

        tokio::time::sleep(Duration::from_millis(1300)).await;
        app.tick();
        assert_eq!(app.state.health().map(|h| h.score), Some(78));
    }
}
