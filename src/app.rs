use crate::editor::{DraftField, QuestionEditor};
use crate::error::StoreError;
use crate::logger;
use crate::models::{Question, StoreRequest, StoreResponse, Tab, OPTION_COUNT};
use crate::session::{QuizSession, Transition};
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// How long a status line message stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankStatus {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

/// All application state. Every input goes through here: key presses,
/// clock ticks and store responses.
#[derive(Debug)]
pub struct App {
    pub tab: Tab,
    pub bank: Vec<Question>,
    pub bank_status: BankStatus,
    pub session: QuizSession,
    pub editor: QuestionEditor,
    pub selected_question: usize,
    pub confirm_abandon: bool,
    pub confirm_quit: bool,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    pending_requests: usize,
    store_tx: Sender<StoreRequest>,
}

impl App {
    /// Creates the app and asks the store for the question bank.
    pub fn new(store_tx: Sender<StoreRequest>, now: Instant) -> Self {
        let mut app = Self {
            tab: Tab::Play,
            bank: Vec::new(),
            bank_status: BankStatus::Loading,
            session: QuizSession::new(),
            editor: QuestionEditor::new(),
            selected_question: 0,
            confirm_abandon: false,
            confirm_quit: false,
            notice: None,
            should_quit: false,
            pending_requests: 0,
            store_tx,
        };
        app.send(StoreRequest::Load, now);
        app
    }

    pub fn pending_requests(&self) -> usize {
        self.pending_requests
    }

    pub fn can_start(&self) -> bool {
        !self.bank.is_empty() && !self.session.is_running()
    }

    pub fn selected(&self) -> Option<&Question> {
        self.bank.get(self.selected_question)
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.confirm_quit {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.should_quit = true,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirm_quit = false;
                }
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::F(1) => return self.set_tab(Tab::Play),
            KeyCode::F(2) => return self.set_tab(Tab::Manage),
            KeyCode::F(3) => return self.set_tab(Tab::About),
            KeyCode::Tab if !self.editor.is_editing() || self.tab != Tab::Manage => {
                return self.set_tab(self.tab.next());
            }
            _ => {}
        }

        match self.tab {
            Tab::Play => self.handle_play_key(key, now),
            Tab::Manage => {
                if self.editor.is_editing() {
                    self.handle_editor_key(key, now);
                } else {
                    self.handle_list_key(key, now);
                }
            }
            Tab::About => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    self.confirm_quit = true;
                }
            }
        }
    }

    fn handle_play_key(&mut self, key: KeyEvent, now: Instant) {
        if self.confirm_abandon {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.session.abandon();
                    self.confirm_abandon = false;
                    logger::log("Quiz abandoned");
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirm_abandon = false;
                }
                _ => {}
            }
            return;
        }

        if self.session.is_running() {
            match key.code {
                KeyCode::Esc => self.confirm_abandon = true,
                KeyCode::Char(c) => {
                    if let Some(position) = option_position(c) {
                        self.select_option_at(position, now);
                    }
                }
                _ => {}
            }
        } else if self.session.results().is_some() {
            match key.code {
                KeyCode::Enter | KeyCode::Char('r') => self.session.restart(),
                KeyCode::Esc | KeyCode::Char('q') => self.confirm_quit = true,
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Enter | KeyCode::Char('s') => self.start_quiz(now),
                KeyCode::Esc | KeyCode::Char('q') => self.confirm_quit = true,
                _ => {}
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Up => {
                self.selected_question = self.selected_question.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_question < self.bank.len().saturating_sub(1) {
                    self.selected_question += 1;
                }
            }
            KeyCode::Char('a') => self.editor.begin_new(),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(question) = self.bank.get(self.selected_question) {
                    self.editor.begin_edit(question);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(now),
            KeyCode::Char('r') => self.reload(now),
            KeyCode::Esc | KeyCode::Char('q') => self.confirm_quit = true,
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => self.submit_draft(now),
            KeyCode::Esc => self.editor.cancel(),
            KeyCode::Tab | KeyCode::Down => self.editor.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.editor.focus_prev(),
            KeyCode::Enter => match self.editor.draft().map(|d| d.focus) {
                Some(DraftField::Option(_)) => self.editor.mark_focused_correct(),
                _ => self.editor.focus_next(),
            },
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Char(c) if !ctrl => self.editor.insert_char(c),
            _ => {}
        }
    }

    pub fn start_quiz(&mut self, now: Instant) {
        match self.session.start(&self.bank, now) {
            Ok(()) => {
                self.confirm_abandon = false;
                logger::log(&format!("Quiz started with {} questions", self.session.total()));
            }
            Err(e) => self.warn(e.to_string(), now),
        }
    }

    /// Picks the option at `position` in the current question's list.
    pub fn select_option_at(&mut self, position: usize, now: Instant) {
        let option_id = self
            .session
            .current_question()
            .and_then(|q| q.options.get(position))
            .map(|o| o.id);
        if let Some(id) = option_id {
            self.session.select_option(id, now);
        }
    }

    pub fn submit_draft(&mut self, now: Instant) {
        if self.editor.is_submitting() {
            self.warn("Still saving this question".to_string(), now);
            return;
        }
        match self.editor.submit() {
            Some(Ok(request)) => {
                let token = self.editor.draft().map(|d| d.token());
                if !self.send(request, now) {
                    if let Some(token) = token {
                        self.editor.release(token);
                    }
                }
            }
            Some(Err(e)) => self.warn(format!("Cannot save: {}", e), now),
            None => {}
        }
    }

    pub fn delete_selected(&mut self, now: Instant) {
        if let Some(id) = self.selected().map(|q| q.id.clone()) {
            self.send(StoreRequest::Delete(id), now);
        }
    }

    /// Re-fetches the bank. Refused mid-quiz.
    pub fn reload(&mut self, now: Instant) {
        if self.session.is_running() {
            self.warn("Finish the running quiz before reloading".to_string(), now);
            return;
        }
        self.bank_status = BankStatus::Loading;
        self.send(StoreRequest::Load, now);
    }

    /// Hands `request` to the store worker. Returns false if the worker is gone.
    fn send(&mut self, request: StoreRequest, now: Instant) -> bool {
        if self.store_tx.send(request).is_ok() {
            self.pending_requests += 1;
            true
        } else {
            logger::log("Store request dropped: worker is gone");
            self.fail(&StoreError::Unavailable, now);
            false
        }
    }

    pub fn apply_store_response(&mut self, response: StoreResponse, now: Instant) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
        match response {
            StoreResponse::Loaded(Ok(questions)) => {
                logger::log(&format!("Question bank loaded: {} questions", questions.len()));
                let invalid = questions.iter().filter(|q| q.validate().is_err()).count();
                self.bank = questions;
                self.bank_status = BankStatus::Loaded;
                self.clamp_selection();
                if invalid > 0 {
                    self.warn(
                        format!("{} question(s) need fixing before you can play", invalid),
                        now,
                    );
                }
            }
            StoreResponse::Loaded(Err(e)) => {
                // A failed reload keeps the bank already held.
                self.bank_status = if self.bank.is_empty() {
                    BankStatus::Failed(e.to_string())
                } else {
                    BankStatus::Loaded
                };
                self.fail(&e, now);
            }
            StoreResponse::Created {
                draft,
                result: Ok(question),
            } => {
                self.bank.push(question);
                self.editor.finish(draft);
                self.inform("Question added".to_string(), now);
            }
            StoreResponse::Updated {
                id,
                draft,
                question,
                result: Ok(()),
            } => {
                if let Some(slot) = self.bank.iter_mut().find(|q| q.id == id) {
                    *slot = Question::from_new(id, question);
                }
                self.editor.finish(draft);
                self.inform("Changes saved".to_string(), now);
            }
            StoreResponse::Deleted { id, result: Ok(()) } => {
                self.bank.retain(|q| q.id != id);
                self.editor.forget(&id);
                self.clamp_selection();
                self.inform("Question deleted".to_string(), now);
            }
            StoreResponse::Created {
                draft,
                result: Err(e),
            }
            | StoreResponse::Updated {
                draft,
                result: Err(e),
                ..
            } => {
                self.editor.release(draft);
                self.fail(&e, now);
            }
            StoreResponse::Deleted { result: Err(e), .. } => self.fail(&e, now),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        for transition in self.session.tick(now) {
            match transition {
                Transition::TimedOut { index } => {
                    logger::log(&format!("Question {} timed out", index + 1));
                }
                Transition::Advanced { .. } => {}
                Transition::Completed(results) => {
                    logger::log(&format!("Quiz completed: {}", results));
                }
            }
        }
        if let Some(notice) = &self.notice {
            if now.saturating_duration_since(notice.shown_at) >= NOTICE_TTL {
                self.notice = None;
            }
        }
    }

    fn clamp_selection(&mut self) {
        self.selected_question = self
            .selected_question
            .min(self.bank.len().saturating_sub(1));
    }

    fn fail(&mut self, err: &StoreError, now: Instant) {
        self.notice = Some(Notice {
            text: format!("Store error: {}", err),
            is_error: true,
            shown_at: now,
        });
    }

    fn warn(&mut self, text: String, now: Instant) {
        self.notice = Some(Notice {
            text,
            is_error: true,
            shown_at: now,
        });
    }

    fn inform(&mut self, text: String, now: Instant) {
        self.notice = Some(Notice {
            text,
            is_error: false,
            shown_at: now,
        });
    }
}

/// Maps `1`-`4` and `a`-`d` to an option position.
fn option_position(c: char) -> Option<usize> {
    let position = match c {
        '1'..='9' => c as usize - '1' as usize,
        'a'..='z' => c as usize - 'a' as usize,
        _ => return None,
    };
    (position < OPTION_COUNT).then_some(position)
}
