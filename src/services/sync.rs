//! Entity synchronizer
//!
//! Every mutation follows the same shape: check preconditions against the
//! local snapshot, send exactly one request, and on success fetch the whole
//! family again. The snapshot is only ever replaced by a fetched aggregate;
//! a failed request leaves it untouched.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{ExpensePayload, FamilyApi, MemberPayload};
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{ExpenseCategory, ExpenseId, Family, FamilyId, Member, MemberId, Money};
use crate::session::{Session, SessionStore};

use super::queue::MutationQueue;

/// The remote operations the synchronizer performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddMember,
    UpdateMember,
    DeleteMember,
    AddExpense,
    DeleteExpense,
    FetchFamily,
}

impl Operation {
    /// Message shown when the server gives no reason for a failure
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::AddMember => "Error adding member",
            Self::UpdateMember => "Error updating member",
            Self::DeleteMember => "Error deleting member. Please try again.",
            Self::AddExpense => "Error adding expense",
            Self::DeleteExpense => "Error deleting expense",
            Self::FetchFamily => "Error fetching family details",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::AddMember => "Member added successfully!",
            Self::UpdateMember => "Member updated successfully!",
            Self::DeleteMember => "Member deleted successfully!",
            Self::AddExpense => "Expense added successfully!",
            Self::DeleteExpense => "Expense deleted successfully!",
            Self::FetchFamily => "Family details refreshed",
        }
    }
}

/// Unvalidated member form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub is_earning: bool,
    /// Required when `is_earning`, ignored otherwise
    pub salary: Option<Money>,
}

impl MemberDraft {
    pub fn new(name: impl Into<String>, is_earning: bool, salary: Option<Money>) -> Self {
        Self {
            name: name.into(),
            is_earning,
            salary,
        }
    }

    /// Prefill for editing an existing member
    pub fn from_member(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            is_earning: member.is_earning,
            salary: member.is_earning.then_some(member.salary),
        }
    }

    fn into_payload(self) -> HouseholdResult<MemberPayload> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(HouseholdError::Validation("Member name is required".into()));
        }

        let salary = if self.is_earning {
            let salary = self.salary.ok_or_else(|| {
                HouseholdError::Validation("Salary is required for earning members".into())
            })?;
            if salary.is_negative() {
                return Err(HouseholdError::Validation("Salary cannot be negative".into()));
            }
            salary
        } else {
            Money::zero()
        };

        Ok(MemberPayload {
            name: name.to_string(),
            is_earning: self.is_earning,
            salary,
        })
    }
}

/// Unvalidated expense form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Option<Money>,
    pub category: Option<ExpenseCategory>,
}

impl ExpenseDraft {
    pub fn new(
        description: impl Into<String>,
        amount: Option<Money>,
        category: Option<ExpenseCategory>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category,
        }
    }

    fn into_payload(self) -> HouseholdResult<ExpensePayload> {
        let description = self.description.trim();
        let (Some(amount), Some(category)) = (self.amount, self.category) else {
            return Err(HouseholdError::Validation("All fields are required".into()));
        };
        if description.is_empty() {
            return Err(HouseholdError::Validation("All fields are required".into()));
        }
        if !amount.is_positive() {
            return Err(HouseholdError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }

        Ok(ExpensePayload {
            description: description.to_string(),
            amount,
            category,
        })
    }
}

/// Proof that a member deletion was looked at before being confirmed.
///
/// Only [`Synchronizer::request_member_deletion`] creates one, so the delete
/// request cannot be sent without going through that step first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    member_id: MemberId,
    member_name: String,
    expense_count: usize,
}

impl PendingDeletion {
    fn new(member: &Member) -> Self {
        Self {
            member_id: member.id.clone(),
            member_name: member.name.clone(),
            expense_count: member.expense_count(),
        }
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    pub fn expense_count(&self) -> usize {
        self.expense_count
    }

    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete {}? This action cannot be undone.",
            self.member_name
        )
    }

    /// Extra warning when the member's expenses go with them
    pub fn warning(&self) -> Option<String> {
        (self.expense_count > 0).then(|| {
            format!(
                "Warning: This member has {} recorded expenses that will also be deleted.",
                self.expense_count
            )
        })
    }
}

/// A validated write against the family
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddMember(MemberPayload),
    UpdateMember(MemberId, MemberPayload),
    DeleteMember(PendingDeletion),
    AddExpense(MemberId, ExpensePayload),
    DeleteExpense(MemberId, ExpenseId),
}

impl Mutation {
    pub fn operation(&self) -> Operation {
        match self {
            Self::AddMember(_) => Operation::AddMember,
            Self::UpdateMember(..) => Operation::UpdateMember,
            Self::DeleteMember(_) => Operation::DeleteMember,
            Self::AddExpense(..) => Operation::AddExpense,
            Self::DeleteExpense(..) => Operation::DeleteExpense,
        }
    }
}

/// Result of a mutation that the server accepted
#[derive(Debug)]
pub enum SyncOutcome {
    /// The follow-up fetch replaced the snapshot
    Refreshed(Arc<Family>),
    /// The mutation went through but the follow-up fetch failed, so the
    /// snapshot still shows the old state
    Stale(HouseholdError),
}

impl SyncOutcome {
    pub fn family(&self) -> Option<&Arc<Family>> {
        match self {
            Self::Refreshed(family) => Some(family),
            Self::Stale(_) => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale(_))
    }
}

/// Keeps the local snapshot in step with the server
pub struct Synchronizer {
    api: Arc<dyn FamilyApi>,
    session: SessionStore,
    queue: MutationQueue,
    snapshot: Option<Arc<Family>>,
}

impl Synchronizer {
    pub fn new(api: Arc<dyn FamilyApi>, session: SessionStore) -> Self {
        Self::with_queue(api, session, MutationQueue::new())
    }

    /// Share `queue` with other synchronizers for the same families
    pub fn with_queue(api: Arc<dyn FamilyApi>, session: SessionStore, queue: MutationQueue) -> Self {
        Self {
            api,
            session,
            queue,
            snapshot: None,
        }
    }

    /// The last fetched family, if any
    pub fn snapshot(&self) -> Option<&Arc<Family>> {
        self.snapshot.as_ref()
    }

    pub fn family(&self) -> Option<&Family> {
        self.snapshot.as_deref()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn api_handle(&self) -> Arc<dyn FamilyApi> {
        Arc::clone(&self.api)
    }

    /// Drop the cached family, e.g. after logout
    pub fn discard_snapshot(&mut self) {
        self.snapshot = None;
    }

    fn active_session(&self) -> HouseholdResult<&Session> {
        self.session.current().ok_or(HouseholdError::SessionInvalid)
    }

    fn loaded_family(&self) -> HouseholdResult<&Arc<Family>> {
        self.snapshot.as_ref().ok_or_else(|| {
            HouseholdError::Validation("Family details have not been loaded yet".into())
        })
    }

    /// Fetch the session's family and replace the snapshot with it.
    ///
    /// A rejected session is cleared along with the snapshot.
    pub fn refresh(&mut self) -> HouseholdResult<Arc<Family>> {
        let session = self.active_session()?;
        let family_id = session.family_id().clone();
        let fetched = self.api.fetch_family(&session.token, &family_id);

        match fetched {
            Ok(family) => {
                debug!(family = %family_id, members = family.members.len(), "snapshot replaced");
                let family = Arc::new(family);
                self.snapshot = Some(Arc::clone(&family));
                Ok(family)
            }
            Err(e) if e.is_session_invalid() => {
                warn!(family = %family_id, "session rejected while fetching family");
                self.snapshot = None;
                if let Err(clear_err) = self.session.clear() {
                    warn!(error = %clear_err, "failed to remove stored session");
                }
                Err(e)
            }
            Err(e) => {
                warn!(family = %family_id, error = %e, "fetching family failed");
                Err(e)
            }
        }
    }

    /// Send one validated mutation without touching the snapshot
    pub fn mutate(&self, mutation: &Mutation) -> HouseholdResult<()> {
        let session = self.active_session()?;
        let token = &session.token;
        let family = session.family_id();

        let result = match mutation {
            Mutation::AddMember(payload) => self.api.add_member(token, family, payload),
            Mutation::UpdateMember(member, payload) => {
                self.api.update_member(token, family, member, payload)
            }
            Mutation::DeleteMember(pending) => {
                self.api.delete_member(token, family, pending.member_id())
            }
            Mutation::AddExpense(member, payload) => {
                self.api.add_expense(token, family, member, payload)
            }
            Mutation::DeleteExpense(member, expense) => {
                self.api.delete_expense(token, family, member, expense)
            }
        };

        match &result {
            Ok(()) => info!(family = %family, operation = ?mutation.operation(), "mutation accepted"),
            Err(e) => warn!(family = %family, operation = ?mutation.operation(), error = %e, "mutation failed"),
        }
        result
    }

    /// Mutate then refresh, holding the family's slot in the queue for both
    pub fn execute(&mut self, mutation: Mutation) -> HouseholdResult<SyncOutcome> {
        let family_id: FamilyId = self.active_session()?.family_id().clone();
        let queue = self.queue.clone();

        queue.run(&family_id, || {
            self.mutate(&mutation)?;
            Ok(match self.refresh() {
                Ok(family) => SyncOutcome::Refreshed(family),
                Err(e) => SyncOutcome::Stale(e),
            })
        })
    }

    pub fn add_member(&mut self, draft: MemberDraft) -> HouseholdResult<SyncOutcome> {
        let payload = draft.into_payload()?;
        if self.loaded_family()?.name_taken(&payload.name, None) {
            return Err(HouseholdError::duplicate_member(payload.name));
        }
        self.execute(Mutation::AddMember(payload))
    }

    pub fn update_member(
        &mut self,
        member_id: &MemberId,
        draft: MemberDraft,
    ) -> HouseholdResult<SyncOutcome> {
        let payload = draft.into_payload()?;
        let family = self.loaded_family()?;
        if family.member(member_id).is_none() {
            return Err(HouseholdError::member_not_found(member_id.as_str()));
        }
        if family.name_taken(&payload.name, Some(member_id)) {
            return Err(HouseholdError::duplicate_member(payload.name));
        }
        self.execute(Mutation::UpdateMember(member_id.clone(), payload))
    }

    /// First step of deleting a member: look the member up and describe what
    /// will be lost
    pub fn request_member_deletion(&self, member_id: &MemberId) -> HouseholdResult<PendingDeletion> {
        self.loaded_family()?
            .member(member_id)
            .map(PendingDeletion::new)
            .ok_or_else(|| HouseholdError::member_not_found(member_id.as_str()))
    }

    pub fn confirm_member_deletion(
        &mut self,
        pending: PendingDeletion,
    ) -> HouseholdResult<SyncOutcome> {
        self.execute(Mutation::DeleteMember(pending))
    }

    pub fn add_expense(
        &mut self,
        member_id: &MemberId,
        draft: ExpenseDraft,
    ) -> HouseholdResult<SyncOutcome> {
        let payload = draft.into_payload()?;
        if self.loaded_family()?.member(member_id).is_none() {
            return Err(HouseholdError::member_not_found(member_id.as_str()));
        }
        self.execute(Mutation::AddExpense(member_id.clone(), payload))
    }

    pub fn delete_expense(
        &mut self,
        member_id: &MemberId,
        expense_id: &ExpenseId,
    ) -> HouseholdResult<SyncOutcome> {
        if self.loaded_family()?.expense(member_id, expense_id).is_none() {
            return Err(HouseholdError::expense_not_found(expense_id.as_str()));
        }
        self.execute(Mutation::DeleteExpense(member_id.clone(), expense_id.clone()))
    }
}
