//! Terminal application state and key mapping.
//!
//! The app never mutates transfer state itself. Keys become
//! [`FlowCommand`]s which the caller sends through the flow handle; the
//! published [`ViewModel`] comes back through [`App::apply_view`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use transfer_flow::domain::{Amount, AmountLimits};
use transfer_flow::{FlowCommand, Recipient, RecipientDirectory, ScreenId, ViewModel};

/// What keyboard input currently edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the recipient search box
    Search,
    /// Typing the transfer memo
    Memo,
}

/// Main application model.
pub struct App {
    /// Last view published by the flow runtime
    pub view: ViewModel,
    pub directory: RecipientDirectory,
    pub quick_amounts: Vec<Amount>,
    pub mode: InputMode,
    pub query: String,
    /// Index into the filtered recipient list
    pub selected: usize,
    pub memo_draft: String,
    /// Rejection from the last command, cleared on the next key
    pub error_message: Option<String>,
    quit: bool,
}

impl App {
    pub fn new(
        directory: RecipientDirectory,
        limits: AmountLimits,
        quick_amounts: Vec<Amount>,
    ) -> Self {
        Self {
            view: ViewModel::new(limits, String::new()),
            directory,
            quick_amounts,
            mode: InputMode::Normal,
            query: String::new(),
            selected: 0,
            memo_draft: String::new(),
            error_message: None,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn screen(&self) -> ScreenId {
        self.view.active_screen
    }

    /// Recipients matching the current search query.
    pub fn filtered(&self) -> Vec<&Recipient> {
        self.directory.filter(&self.query)
    }

    /// Adopt a newly published view.
    pub fn apply_view(&mut self, view: ViewModel) {
        if view.active_screen == ScreenId::Home {
            self.query.clear();
            self.selected = 0;
        }
        // Memo draft follows the flow after a reset
        if self.mode != InputMode::Memo {
            self.memo_draft = view.memo.clone();
        }
        self.view = view;
    }

    /// Map one key press to the command it triggers, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FlowCommand> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return None;
        }
        self.error_message = None;

        match self.mode {
            InputMode::Search => self.handle_search_key(key.code),
            InputMode::Memo => self.handle_memo_key(key.code),
            InputMode::Normal => self.handle_screen_key(key.code),
        }
    }

    fn handle_screen_key(&mut self, code: KeyCode) -> Option<FlowCommand> {
        if code == KeyCode::Esc {
            return self.screen().back_target().map(FlowCommand::Activate);
        }
        if code == KeyCode::Char('q') {
            self.quit = true;
            return None;
        }

        match self.screen() {
            ScreenId::Home => match code {
                KeyCode::Enter | KeyCode::Char('t') => {
                    Some(FlowCommand::Activate(ScreenId::Recipient))
                }
                _ => None,
            },
            ScreenId::Recipient => self.handle_recipient_key(code),
            ScreenId::Amount => self.handle_amount_key(code),
            ScreenId::Auth => None,
            ScreenId::Success => match code {
                KeyCode::Char('s') => Some(FlowCommand::Share),
                KeyCode::Enter => Some(FlowCommand::Activate(ScreenId::Home)),
                _ => None,
            },
        }
    }

    fn handle_recipient_key(&mut self, code: KeyCode) -> Option<FlowCommand> {
        let count = self.filtered().len();
        match code {
            KeyCode::Char('/') => {
                self.mode = InputMode::Search;
                None
            }
            KeyCode::Up if count > 0 => {
                self.selected = if self.selected == 0 { count - 1 } else { self.selected - 1 };
                None
            }
            KeyCode::Down if count > 0 => {
                self.selected = (self.selected + 1) % count;
                None
            }
            KeyCode::Enter => self
                .filtered()
                .get(self.selected)
                .map(|r| FlowCommand::SelectRecipient((*r).clone())),
            _ => None,
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) -> Option<FlowCommand> {
        match code {
            KeyCode::Char(c) => self.query.push(c),
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Enter | KeyCode::Esc => self.mode = InputMode::Normal,
            _ => {}
        }
        self.selected = 0;
        None
    }

    fn handle_amount_key(&mut self, code: KeyCode) -> Option<FlowCommand> {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => Some(FlowCommand::AppendDigit(c)),
            KeyCode::Backspace => Some(FlowCommand::DeleteDigit),
            KeyCode::F(n) => self
                .quick_amounts
                .get(usize::from(n).checked_sub(1)?)
                .map(|&delta| FlowCommand::AddQuickAmount(delta)),
            KeyCode::Char('m') => {
                self.mode = InputMode::Memo;
                None
            }
            KeyCode::Enter if self.view.amount.next_enabled => {
                Some(FlowCommand::Activate(ScreenId::Auth))
            }
            _ => None,
        }
    }

    fn handle_memo_key(&mut self, code: KeyCode) -> Option<FlowCommand> {
        match code {
            KeyCode::Char(c) => {
                self.memo_draft.push(c);
                Some(FlowCommand::SetMemo(self.memo_draft.clone()))
            }
            KeyCode::Backspace => {
                self.memo_draft.pop();
                Some(FlowCommand::SetMemo(self.memo_draft.clone()))
            }
            KeyCode::Enter | KeyCode::Esc => {
                self.mode = InputMode::Normal;
                None
            }
            _ => None,
        }
    }
}
