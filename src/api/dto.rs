//! Request and response bodies of the family expense API

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{ExpenseCategory, FamilySummary, Money};
use crate::session::{AuthToken, Session};

/// Body of `POST /auth/login` and `POST /auth/register`
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("password", &"***")
            .finish()
    }
}

/// Response of the auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub family: Option<FamilySummary>,
}

impl AuthResponse {
    /// Both the token and the family must be present
    pub fn into_session(self) -> HouseholdResult<Session> {
        match (self.token, self.family) {
            (Some(token), Some(family)) if !token.trim().is_empty() => {
                Ok(Session::new(AuthToken::new(token), family))
            }
            _ => Err(HouseholdError::Api {
                status: 200,
                message: Some("Invalid response from server".into()),
            }),
        }
    }
}

/// Body of the member create/update endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub name: String,
    pub is_earning: bool,
    pub salary: Money,
}

/// Body of the expense create endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpensePayload {
    pub description: String,
    pub amount: Money,
    pub category: ExpenseCategory,
}

/// Error body the server sends alongside non-success statuses
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
