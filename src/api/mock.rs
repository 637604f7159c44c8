//! In-memory stand-in for the family expense API used by unit tests

use std::sync::Mutex;

use chrono::{TimeZone, Utc};

use super::dto::{AuthResponse, Credentials, ExpensePayload, MemberPayload};
use super::FamilyApi;
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{Expense, ExpenseId, Family, FamilyId, Member, MemberId, Money};
use crate::session::AuthToken;

/// A request the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login(String),
    Register(String),
    Fetch,
    AddMember(String),
    UpdateMember(String),
    DeleteMember(String),
    AddExpense(String),
    DeleteExpense(String, String),
}

impl Call {
    pub fn is_fetch(&self) -> bool {
        matches!(self, Call::Fetch)
    }
}

/// Scripted failure for the next matching request
#[derive(Debug, Clone)]
pub enum Failure {
    Status(u16, Option<String>),
    Network,
    Unauthorized,
}

impl Failure {
    fn into_error(self) -> HouseholdError {
        match self {
            Failure::Status(status, message) => HouseholdError::Api { status, message },
            Failure::Network => HouseholdError::Network("connection refused".into()),
            Failure::Unauthorized => HouseholdError::SessionInvalid,
        }
    }
}

struct State {
    family: Family,
    calls: Vec<Call>,
    fail_mutation: Option<Failure>,
    fail_fetch: Option<Failure>,
    next_id: u32,
}

/// Mock server holding one family
pub struct MockApi {
    state: Mutex<State>,
}

impl MockApi {
    pub fn new(family: Family) -> Self {
        Self {
            state: Mutex::new(State {
                family,
                calls: Vec::new(),
                fail_mutation: None,
                fail_fetch: None,
                next_id: 100,
            }),
        }
    }

    /// Mock seeded with [`sample_family`]
    pub fn with_sample() -> Self {
        Self::new(sample_family())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// The next mutating request fails with `failure`
    pub fn fail_next_mutation(&self, failure: Failure) {
        self.state.lock().unwrap().fail_mutation = Some(failure);
    }

    /// The next fetch fails with `failure`
    pub fn fail_next_fetch(&self, failure: Failure) {
        self.state.lock().unwrap().fail_fetch = Some(failure);
    }

    pub fn family(&self) -> Family {
        self.state.lock().unwrap().family.clone()
    }

    fn mutate<F>(&self, call: Call, apply: F) -> HouseholdResult<()>
    where
        F: FnOnce(&mut Family, String) -> HouseholdResult<()>,
    {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if let Some(failure) = state.fail_mutation.take() {
            return Err(failure.into_error());
        }
        state.next_id += 1;
        let id = format!("id{}", state.next_id);
        apply(&mut state.family, id)?;
        recompute_totals(&mut state.family);
        Ok(())
    }

    fn auth(&self, call: Call, credentials: &Credentials) -> HouseholdResult<AuthResponse> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if let Some(failure) = state.fail_mutation.take() {
            return Err(failure.into_error());
        }
        if credentials.password != "secret1" {
            return Err(HouseholdError::Api {
                status: 401,
                message: Some("Invalid credentials".into()),
            });
        }
        Ok(AuthResponse {
            token: Some("token-123".into()),
            family: Some(state.family.summary()),
        })
    }
}

fn recompute_totals(family: &mut Family) {
    for member in &mut family.members {
        member.total_spent = member.expenses.iter().map(|e| e.amount).sum();
    }
    family.total_income = family
        .members
        .iter()
        .filter(|m| m.is_earning)
        .map(|m| m.salary)
        .sum();
    family.total_expenses = family.members.iter().map(|m| m.total_spent).sum();
}

impl FamilyApi for MockApi {
    fn login(&self, credentials: &Credentials) -> HouseholdResult<AuthResponse> {
        self.auth(Call::Login(credentials.name.clone()), credentials)
    }

    fn register(&self, credentials: &Credentials) -> HouseholdResult<AuthResponse> {
        self.auth(Call::Register(credentials.name.clone()), credentials)
    }

    fn fetch_family(&self, token: &AuthToken, family: &FamilyId) -> HouseholdResult<Family> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Fetch);
        if let Some(failure) = state.fail_fetch.take() {
            return Err(failure.into_error());
        }
        if token.is_empty() || &state.family.id != family {
            return Err(HouseholdError::SessionInvalid);
        }
        Ok(state.family.clone())
    }

    fn add_member(
        &self,
        _token: &AuthToken,
        _family: &FamilyId,
        payload: &MemberPayload,
    ) -> HouseholdResult<()> {
        let payload = payload.clone();
        self.mutate(Call::AddMember(payload.name.clone()), move |family, id| {
            family.members.push(Member {
                id: MemberId::new(id),
                name: payload.name,
                is_earning: payload.is_earning,
                salary: payload.salary,
                total_spent: Money::zero(),
                expenses: Vec::new(),
            });
            Ok(())
        })
    }

    fn update_member(
        &self,
        _token: &AuthToken,
        _family: &FamilyId,
        member: &MemberId,
        payload: &MemberPayload,
    ) -> HouseholdResult<()> {
        let payload = payload.clone();
        let member = member.clone();
        self.mutate(Call::UpdateMember(member.to_string()), move |family, _| {
            let target = family
                .members
                .iter_mut()
                .find(|m| m.id == member)
                .ok_or_else(|| HouseholdError::Api {
                    status: 404,
                    message: Some("Member not found".into()),
                })?;
            target.name = payload.name;
            target.is_earning = payload.is_earning;
            target.salary = payload.salary;
            Ok(())
        })
    }

    fn delete_member(
        &self,
        _token: &AuthToken,
        _family: &FamilyId,
        member: &MemberId,
    ) -> HouseholdResult<()> {
        let member = member.clone();
        self.mutate(Call::DeleteMember(member.to_string()), move |family, _| {
            family.members.retain(|m| m.id != member);
            Ok(())
        })
    }

    fn add_expense(
        &self,
        _token: &AuthToken,
        _family: &FamilyId,
        member: &MemberId,
        payload: &ExpensePayload,
    ) -> HouseholdResult<()> {
        let payload = payload.clone();
        let member = member.clone();
        self.mutate(Call::AddExpense(member.to_string()), move |family, id| {
            let target = family
                .members
                .iter_mut()
                .find(|m| m.id == member)
                .ok_or_else(|| HouseholdError::Api {
                    status: 404,
                    message: Some("Member not found".into()),
                })?;
            target.expenses.push(Expense {
                id: ExpenseId::new(id),
                description: payload.description,
                amount: payload.amount,
                category: payload.category,
                date: Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
            });
            Ok(())
        })
    }

    fn delete_expense(
        &self,
        _token: &AuthToken,
        _family: &FamilyId,
        member: &MemberId,
        expense: &ExpenseId,
    ) -> HouseholdResult<()> {
        let member = member.clone();
        let expense = expense.clone();
        self.mutate(
            Call::DeleteExpense(member.to_string(), expense.to_string()),
            move |family, _| {
                if let Some(target) = family.members.iter_mut().find(|m| m.id == member) {
                    target.expenses.retain(|e| e.id != expense);
                }
                Ok(())
            },
        )
    }
}

/// Family "Sharma": Ravi earns 50000 and spent 12000, Meena does not earn and
/// spent 950 across two expenses.
pub fn sample_family() -> Family {
    use crate::models::ExpenseCategory;

    let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut family = Family {
        id: FamilyId::from("f1"),
        name: "Sharma".into(),
        members: vec![
            Member {
                id: MemberId::from("m1"),
                name: "Ravi".into(),
                is_earning: true,
                salary: Money::from_major(50000),
                total_spent: Money::zero(),
                expenses: vec![Expense {
                    id: ExpenseId::from("e1"),
                    description: "Rent share".into(),
                    amount: Money::from_major(12000),
                    category: ExpenseCategory::Housing,
                    date,
                }],
            },
            Member {
                id: MemberId::from("m2"),
                name: "Meena".into(),
                is_earning: false,
                salary: Money::zero(),
                total_spent: Money::zero(),
                expenses: vec![
                    Expense {
                        id: ExpenseId::from("e2"),
                        description: "Vegetables".into(),
                        amount: Money::from_major(450),
                        category: ExpenseCategory::Food,
                        date,
                    },
                    Expense {
                        id: ExpenseId::from("e3"),
                        description: "Bus pass".into(),
                        amount: Money::from_major(500),
                        category: ExpenseCategory::Transportation,
                        date,
                    },
                ],
            },
        ],
        total_income: Money::zero(),
        total_expenses: Money::zero(),
    };
    recompute_totals(&mut family);
    family
}
