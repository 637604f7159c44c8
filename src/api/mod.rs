//! Boundary to the remote family expense API
//!
//! `FamilyApi` is the seam between the synchronizer and the network. The
//! production implementation is [`HttpApi`]; tests use an in-memory mock that
//! behaves like the server (it recomputes totals on every mutation).

pub mod dto;
pub mod http;

#[cfg(test)]
pub(crate) mod mock;

pub use dto::{AuthResponse, Credentials, ExpensePayload, MemberPayload};
pub use http::HttpApi;

use crate::error::HouseholdResult;
use crate::models::{ExpenseId, Family, FamilyId, MemberId};
use crate::session::AuthToken;

/// Operations exposed by the family expense API
pub trait FamilyApi: Send + Sync {
    /// `POST /auth/login`
    fn login(&self, credentials: &Credentials) -> HouseholdResult<AuthResponse>;

    /// `POST /auth/register`
    fn register(&self, credentials: &Credentials) -> HouseholdResult<AuthResponse>;

    /// `GET /family/{familyId}`
    fn fetch_family(&self, token: &AuthToken, family: &FamilyId) -> HouseholdResult<Family>;

    /// `POST /family/{familyId}/members`
    fn add_member(
        &self,
        token: &AuthToken,
        family: &FamilyId,
        payload: &MemberPayload,
    ) -> HouseholdResult<()>;

    /// `PUT /family/{familyId}/members/{memberId}`
    fn update_member(
        &self,
        token: &AuthToken,
        family: &FamilyId,
        member: &MemberId,
        payload: &MemberPayload,
    ) -> HouseholdResult<()>;

    /// `DELETE /family/{familyId}/members/{memberId}`
    fn delete_member(
        &self,
        token: &AuthToken,
        family: &FamilyId,
        member: &MemberId,
    ) -> HouseholdResult<()>;

    /// `POST /family/{familyId}/members/{memberId}/expenses`
    fn add_expense(
        &self,
        token: &AuthToken,
        family: &FamilyId,
        member: &MemberId,
        payload: &ExpensePayload,
    ) -> HouseholdResult<()>;

    /// `DELETE /family/{familyId}/members/{memberId}/expenses/{expenseId}`
    fn delete_expense(
        &self,
        token: &AuthToken,
        family: &FamilyId,
        member: &MemberId,
        expense: &ExpenseId,
    ) -> HouseholdResult<()>;
}
