//! Application state for the TUI
//!
//! `App` is the view-state controller: it owns the synchronizer, tracks which
//! dialogs are open and what is selected, holds the form buffers, and turns
//! synchronizer results into dialog transitions and toasts. Each dialog flag
//! is independent of the others.

use crate::config::Settings;
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{Family, Member, MemberId};
use crate::services::auth::{LOGIN_FALLBACK, REGISTER_FALLBACK};
use crate::services::{AuthService, Operation, PendingDeletion, SyncOutcome, Synchronizer};

use super::dialogs::expense::ExpenseFormState;
use super::dialogs::member::MemberFormState;
use super::views::auth::{LoginFormState, RegisterFormState};
use super::widgets::NotificationQueue;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
}

/// Dialog-open flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogFlags {
    pub add_member: bool,
    pub add_expense: bool,
    pub edit_member: bool,
    pub view_expenses: bool,
    pub confirm_delete: bool,
    pub help: bool,
}

impl DialogFlags {
    pub fn any(&self) -> bool {
        self.add_member
            || self.add_expense
            || self.edit_member
            || self.view_expenses
            || self.confirm_delete
            || self.help
    }
}

/// Main application state
pub struct App {
    pub sync: Synchronizer,
    pub settings: Settings,
    pub should_quit: bool,
    pub screen: Screen,
    pub dialogs: DialogFlags,

    /// Highlighted row in the member table
    pub member_cursor: usize,
    /// Highlighted row in the expense history dialog
    pub expense_cursor: usize,
    /// Target of "add expense" and "view expenses"
    pub selected_member: Option<MemberId>,
    /// Member whose history is shown inline
    pub expanded_member: Option<MemberId>,
    pub pending_deletion: Option<PendingDeletion>,

    pub login_form: LoginFormState,
    pub register_form: RegisterFormState,
    pub add_member_form: MemberFormState,
    pub edit_member_form: MemberFormState,
    pub expense_form: ExpenseFormState,

    pub notifications: NotificationQueue,
}

impl App {
    /// Dashboard if a session is stored, login screen otherwise
    pub fn new(sync: Synchronizer, settings: Settings) -> Self {
        let screen = if sync.session().is_authenticated() {
            Screen::Dashboard
        } else {
            Screen::Login
        };

        Self {
            sync,
            settings,
            should_quit: false,
            screen,
            dialogs: DialogFlags::default(),
            member_cursor: 0,
            expense_cursor: 0,
            selected_member: None,
            expanded_member: None,
            pending_deletion: None,
            login_form: LoginFormState::default(),
            register_form: RegisterFormState::default(),
            add_member_form: MemberFormState::new(),
            edit_member_form: MemberFormState::new(),
            expense_form: ExpenseFormState::new(),
            notifications: NotificationQueue::new(),
        }
    }

    /// Fetch right away when there is a session to fetch with
    pub fn start(&mut self) {
        if self.screen == Screen::Dashboard {
            self.load_family();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn family(&self) -> Option<&Family> {
        self.sync.family()
    }

    pub fn highlighted_member(&self) -> Option<&Member> {
        self.family()?.members.get(self.member_cursor)
    }

    pub fn selected_member_ref(&self) -> Option<&Member> {
        let id = self.selected_member.as_ref()?;
        self.family()?.member(id)
    }

    pub fn expanded_member_ref(&self) -> Option<&Member> {
        let id = self.expanded_member.as_ref()?;
        self.family()?.member(id)
    }

    fn highlighted_id(&self) -> Option<MemberId> {
        self.highlighted_member().map(|m| m.id.clone())
    }

    pub fn move_up(&mut self) {
        self.member_cursor = self.member_cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let count = self.family().map_or(0, |f| f.members.len());
        if self.member_cursor + 1 < count {
            self.member_cursor += 1;
        }
    }

    // Loading and outcomes

    pub fn load_family(&mut self) {
        match self.sync.refresh() {
            Ok(_) => self.reconcile_selection(),
            Err(e) => self.fetch_failed(e),
        }
    }

    fn fetch_failed(&mut self, error: HouseholdError) {
        self.notifications
            .error(error.user_message(Operation::FetchFamily.fallback_message()));
        if error.is_session_invalid() || !self.sync.session().is_authenticated() {
            self.to_login();
        }
    }

    /// Drop selections that point at members the new snapshot no longer has
    fn reconcile_selection(&mut self) {
        let Some(family) = self.sync.family() else {
            return;
        };
        let exists = |id: &Option<MemberId>| id.as_ref().is_some_and(|id| family.member(id).is_some());

        let expanded_ok = exists(&self.expanded_member);
        let selected_ok = exists(&self.selected_member);
        let count = family.members.len();
        let expense_count = self
            .selected_member
            .as_ref()
            .and_then(|id| family.member(id))
            .map_or(0, |m| m.expenses.len());

        if !expanded_ok {
            self.expanded_member = None;
        }
        if !selected_ok {
            self.selected_member = None;
            self.dialogs.add_expense = false;
            self.dialogs.view_expenses = false;
        }
        self.member_cursor = self.member_cursor.min(count.saturating_sub(1));
        self.expense_cursor = self.expense_cursor.min(expense_count.saturating_sub(1));
    }

    /// Toast the outcome of a mutation; true when the server accepted it
    fn finish(&mut self, operation: Operation, result: HouseholdResult<SyncOutcome>) -> bool {
        match result {
            Ok(outcome) => {
                self.notifications.success(operation.success_message());
                match outcome {
                    SyncOutcome::Refreshed(_) => self.reconcile_selection(),
                    SyncOutcome::Stale(e) => self.fetch_failed(e),
                }
                true
            }
            Err(e) => {
                self.notifications
                    .error(e.user_message(operation.fallback_message()));
                false
            }
        }
    }

    fn to_login(&mut self) {
        self.sync.discard_snapshot();
        self.dialogs = DialogFlags::default();
        self.member_cursor = 0;
        self.expense_cursor = 0;
        self.selected_member = None;
        self.expanded_member = None;
        self.pending_deletion = None;
        self.add_member_form = MemberFormState::new();
        self.edit_member_form = MemberFormState::new();
        self.expense_form = ExpenseFormState::new();
        self.screen = Screen::Login;
    }

    // Authentication

    pub fn switch_auth_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Login => Screen::Register,
            Screen::Register => Screen::Login,
            Screen::Dashboard => Screen::Dashboard,
        };
    }

    pub fn submit_login(&mut self) {
        let api = self.sync.api_handle();
        let result = AuthService::new(api.as_ref(), self.sync.session_mut()).login(
            self.login_form.name_input.value(),
            self.login_form.password_input.value(),
        );

        match result {
            Ok(_) => {
                self.notifications.success("Login successful!");
                self.login_form = LoginFormState::default();
                self.enter_dashboard();
            }
            Err(e) => self.notifications.error(e.user_message(LOGIN_FALLBACK)),
        }
    }

    pub fn submit_register(&mut self) {
        let api = self.sync.api_handle();
        let result = AuthService::new(api.as_ref(), self.sync.session_mut()).register(
            self.register_form.name_input.value(),
            self.register_form.password_input.value(),
            self.register_form.confirm_input.value(),
        );

        match result {
            Ok(_) => {
                self.notifications.success("Family registered successfully!");
                self.register_form = RegisterFormState::default();
                self.enter_dashboard();
            }
            Err(e) => self.notifications.error(e.user_message(REGISTER_FALLBACK)),
        }
    }

    fn enter_dashboard(&mut self) {
        self.sync.discard_snapshot();
        self.screen = Screen::Dashboard;
        self.load_family();
    }

    pub fn logout(&mut self) {
        let api = self.sync.api_handle();
        if let Err(e) = AuthService::new(api.as_ref(), self.sync.session_mut()).logout() {
            self.notifications.error(e.to_string());
        }
        self.to_login();
    }

    // Member dialogs

    pub fn open_add_member(&mut self) {
        self.dialogs.add_member = true;
    }

    pub fn close_add_member(&mut self) {
        self.dialogs.add_member = false;
    }

    pub fn submit_add_member(&mut self) {
        let draft = match self.add_member_form.to_draft() {
            Ok(draft) => draft,
            Err(msg) => return self.reject(msg, |app| &mut app.add_member_form.error_message),
        };

        let result = self.sync.add_member(draft);
        let local_error = local_message(&result);
        if self.finish(Operation::AddMember, result) {
            self.dialogs.add_member = false;
            self.add_member_form = MemberFormState::new();
        } else {
            self.add_member_form.error_message = local_error;
        }
    }

    pub fn open_edit_member(&mut self) {
        let Some(member) = self.highlighted_member() else {
            return;
        };
        self.edit_member_form = MemberFormState::from_member(member);
        self.dialogs.edit_member = true;
    }

    pub fn close_edit_member(&mut self) {
        self.dialogs.edit_member = false;
    }

    pub fn submit_edit_member(&mut self) {
        let Some(member_id) = self.edit_member_form.editing.clone() else {
            self.dialogs.edit_member = false;
            return;
        };
        let draft = match self.edit_member_form.to_draft() {
            Ok(draft) => draft,
            Err(msg) => return self.reject(msg, |app| &mut app.edit_member_form.error_message),
        };

        let result = self.sync.update_member(&member_id, draft);
        let local_error = local_message(&result);
        if self.finish(Operation::UpdateMember, result) {
            self.dialogs.edit_member = false;
            self.edit_member_form = MemberFormState::new();
        } else {
            self.edit_member_form.error_message = local_error;
        }
    }

    // Deletion

    /// Open the confirmation for the highlighted member
    pub fn request_delete(&mut self) {
        let Some(member_id) = self.highlighted_id() else {
            return;
        };
        match self.sync.request_member_deletion(&member_id) {
            Ok(pending) => {
                self.pending_deletion = Some(pending);
                self.dialogs.confirm_delete = true;
            }
            Err(e) => self
                .notifications
                .error(e.user_message(Operation::DeleteMember.fallback_message())),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_deletion = None;
        self.dialogs.confirm_delete = false;
    }

    /// Fire the deletion; a failure keeps the confirmation open for a retry
    pub fn confirm_delete(&mut self) {
        let Some(pending) = self.pending_deletion.clone() else {
            self.dialogs.confirm_delete = false;
            return;
        };

        let result = self.sync.confirm_member_deletion(pending);
        if self.finish(Operation::DeleteMember, result) {
            self.cancel_delete();
        }
    }

    // Expense dialogs

    pub fn open_add_expense(&mut self) {
        if let Some(id) = self.highlighted_id() {
            self.selected_member = Some(id);
            self.dialogs.add_expense = true;
        }
    }

    /// Add an expense for the member whose history is open
    pub fn open_add_expense_for_selected(&mut self) {
        if self.selected_member_ref().is_some() {
            self.dialogs.add_expense = true;
        }
    }

    pub fn close_add_expense(&mut self) {
        self.dialogs.add_expense = false;
    }

    pub fn submit_add_expense(&mut self) {
        let Some(member_id) = self.selected_member.clone() else {
            self.dialogs.add_expense = false;
            return;
        };
        let draft = match self.expense_form.to_draft() {
            Ok(draft) => draft,
            Err(msg) => return self.reject(msg, |app| &mut app.expense_form.error_message),
        };

        let result = self.sync.add_expense(&member_id, draft);
        let local_error = local_message(&result);
        if self.finish(Operation::AddExpense, result) {
            self.dialogs.add_expense = false;
            self.expense_form = ExpenseFormState::new();
        } else {
            self.expense_form.error_message = local_error;
        }
    }

    pub fn open_view_expenses(&mut self) {
        if let Some(id) = self.highlighted_id() {
            self.selected_member = Some(id);
            self.expense_cursor = 0;
            self.dialogs.view_expenses = true;
        }
    }

    pub fn close_view_expenses(&mut self) {
        self.dialogs.view_expenses = false;
    }

    /// Delete the highlighted expense in the history dialog
    pub fn delete_highlighted_expense(&mut self) {
        let Some(member) = self.selected_member_ref() else {
            return;
        };
        let Some(expense) = member.expenses.get(self.expense_cursor) else {
            return;
        };
        let (member_id, expense_id) = (member.id.clone(), expense.id.clone());

        let result = self.sync.delete_expense(&member_id, &expense_id);
        self.finish(Operation::DeleteExpense, result);
    }

    pub fn toggle_expanded(&mut self) {
        let Some(id) = self.highlighted_id() else {
            return;
        };
        if self.expanded_member.as_ref() == Some(&id) {
            self.expanded_member = None;
        } else {
            self.expanded_member = Some(id);
        }
    }

    pub fn toggle_help(&mut self) {
        self.dialogs.help = !self.dialogs.help;
    }

    /// Form-level failure that never reached the synchronizer
    fn reject(&mut self, msg: String, field: impl FnOnce(&mut Self) -> &mut Option<String>) {
        self.notifications.error(msg.clone());
        *field(self) = Some(msg);
    }
}

/// Message to keep on the form when the failure was local
fn local_message(result: &HouseholdResult<SyncOutcome>) -> Option<String> {
    match result {
        Err(e) if e.is_local() => Some(e.user_message("")),
        _ => None,
    }
}
