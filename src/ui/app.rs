use chrono::{DateTime, Utc};

use crate::models::CategoryId;
use crate::state::{AppState, BudgetState, MonthTotal};
use crate::storage::KeyValueStore;
use crate::ui::util::clamp_index;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Home,
    Budget,
    Data,
    Settings,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Home, Self::Budget, Self::Data, Self::Settings]
    }

    /// Translation key of the tab title.
    pub(crate) fn label_key(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Budget => "budget",
            Self::Data => "data",
            Self::Settings => "settings",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Budget => write!(f, "Budget"),
            Self::Data => write!(f, "Data"),
            Self::Settings => write!(f, "Settings"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// What the inline editor is collecting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EditTarget {
    TotalBudget,
    CategoryBudget(CategoryId),
    /// `<amount> [description]`
    AddTransaction(CategoryId),
    NewCategory,
    RenameCategory(CategoryId),
    CurrencySymbol,
}

impl EditTarget {
    pub(crate) fn prompt(&self) -> &'static str {
        match self {
            Self::TotalBudget => "total budget> ",
            Self::CategoryBudget(_) => "category budget> ",
            Self::AddTransaction(_) => "amount [description]> ",
            Self::NewCategory => "new category> ",
            Self::RenameCategory(_) => "rename> ",
            Self::CurrencySymbol => "currency> ",
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteTransaction {
        category: CategoryId,
        date: DateTime<Utc>,
        description: String,
    },
    ResetCategory { id: CategoryId, name: String },
    ResetAll,
    DeleteCategory { id: CategoryId, name: String },
}

/// Rows of the settings screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingsRow {
    Currency,
    Language,
    DarkMode,
}

impl SettingsRow {
    pub(crate) const ALL: [SettingsRow; 3] = [Self::Currency, Self::Language, Self::DarkMode];
}

/// View state of the terminal UI. Budget data lives in [`AppState`]; this
/// only tracks what is on screen and where the cursors are.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Home
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Budget
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Data
    pub(crate) month_totals: Vec<MonthTotal>,

    // Settings: preference rows first, then one row per category
    pub(crate) settings_index: usize,

    // Inline editor
    pub(crate) edit_target: Option<EditTarget>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Home,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            transaction_index: 0,
            transaction_scroll: 0,

            category_index: 0,
            category_scroll: 0,

            month_totals: Vec::new(),

            settings_index: 0,

            edit_target: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn refresh_month_totals(&mut self, budget: &BudgetState, store: &dyn KeyValueStore) {
        self.month_totals = budget.month_totals(store);
    }

    /// Pull cursors back inside lists that may have shrunk.
    pub(crate) fn clamp_cursors(&mut self, state: &AppState) {
        let txn_len = state.budget.recent_transactions().len();
        clamp_index(&mut self.transaction_index, &mut self.transaction_scroll, txn_len);
        let cat_len = state.budget.categories().len();
        clamp_index(&mut self.category_index, &mut self.category_scroll, cat_len);
        let settings_len = SettingsRow::ALL.len() + cat_len;
        if self.settings_index >= settings_len {
            self.settings_index = settings_len.saturating_sub(1);
        }
    }

    /// Reset per-month cursors after the active month changes.
    pub(crate) fn on_month_changed(&mut self, state: &AppState, store: &dyn KeyValueStore) {
        self.transaction_index = 0;
        self.transaction_scroll = 0;
        self.clamp_cursors(state);
        self.refresh_month_totals(&state.budget, store);
    }

    pub(crate) fn selected_category(&self, state: &AppState) -> Option<CategoryId> {
        state.budget.categories().get(self.category_index).map(|c| c.id)
    }

    /// The category under the settings cursor, if the cursor is past the
    /// preference rows.
    pub(crate) fn selected_settings_category(&self, state: &AppState) -> Option<CategoryId> {
        self.settings_index
            .checked_sub(SettingsRow::ALL.len())
            .and_then(|i| state.budget.categories().get(i))
            .map(|c| c.id)
    }

    pub(crate) fn selected_settings_row(&self) -> Option<SettingsRow> {
        SettingsRow::ALL.get(self.settings_index).copied()
    }

    pub(crate) fn begin_edit(&mut self, target: EditTarget, initial: String) {
        self.command_input = initial;
        self.edit_target = Some(target);
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn confirm(&mut self, action: PendingAction, message: String) {
        self.pending_action = Some(action);
        self.confirm_message = message;
        self.input_mode = InputMode::Confirm;
    }

    /// Rows the budget list can show; the list sits under the summary header.
    pub(crate) fn category_page(&self) -> usize {
        self.visible_rows.saturating_sub(7).max(1)
    }

    pub(crate) fn transaction_page(&self) -> usize {
        self.visible_rows.saturating_sub(9).max(1)
    }
}
