//! HTTP implementation of [`FamilyApi`] on top of `reqwest::blocking`

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{AuthResponse, Credentials, ErrorBody, ExpensePayload, MemberPayload};
use super::FamilyApi;
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{ExpenseId, Family, FamilyId, MemberId};
use crate::session::AuthToken;

/// Blocking HTTP client for the family expense API
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    /// Create a client for `base_url` (e.g. `http://localhost:5000/api`)
    pub fn new(base_url: impl Into<String>) -> HouseholdResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("household-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HouseholdError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn member_url(&self, family: &FamilyId, member: &MemberId) -> String {
        self.url(&format!("/family/{}/members/{}", family, member))
    }

    fn auth_headers(token: &AuthToken) -> HouseholdResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
            .map_err(|_| HouseholdError::SessionInvalid)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Send the request and turn non-success statuses into errors.
    ///
    /// For authenticated calls 401/403 mean the session is gone; for the auth
    /// endpoints they are ordinary rejections carrying the server's message.
    fn send(&self, request: RequestBuilder, authenticated: bool) -> HouseholdResult<Response> {
        let response = request.send()?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "api response");

        if status.is_success() {
            return Ok(response);
        }

        if authenticated && matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            warn!(status = status.as_u16(), "server rejected session");
            return Err(HouseholdError::SessionInvalid);
        }

        let body: ErrorBody = response.json().unwrap_or_default();
        warn!(status = status.as_u16(), message = ?body.message, "api request failed");
        Err(HouseholdError::Api {
            status: status.as_u16(),
            message: body.message,
        })
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        authenticated: bool,
    ) -> HouseholdResult<T> {
        let response = self.send(request, authenticated)?;
        response.json::<T>().map_err(HouseholdError::from)
    }
}

impl FamilyApi for HttpApi {
    fn login(&self, credentials: &Credentials) -> HouseholdResult<AuthResponse> {
        debug!(name = %credentials.name, "POST /auth/login");
        let request = self.client.post(self.url("/auth/login")).json(credentials);
        self.send_json(request, false)
    }

    fn register(&self, credentials: &Credentials) -> HouseholdResult<AuthResponse> {
        debug!(name = %credentials.name, "POST /auth/register");
        let request = self.client.post(self.url("/auth/register")).json(credentials);
        self.send_json(request, false)
    }

    fn fetch_family(&self, token: &AuthToken, family: &FamilyId) -> HouseholdResult<Family> {
        debug!(family = %family, "GET /family");
        let request = self
            .client
            .get(self.url(&format!("/family/{}", family)))
            .headers(Self::auth_headers(token)?);
        self.send_json(request, true)
    }

    fn add_member(
        &self,
        token: &AuthToken,
        family: &FamilyId,
        payload: &MemberPayload,
    ) -> HouseholdResult<()> {
        debug!(family = %family, "POST member");
        let request = self
            .client
            .post(self.url(&format!("/family/{}/members", family)))
            .headers(Self::auth_headers(token)?)
            .json(payload);
        self.send(request, true).map(|_| ())
    }

    fn update_member(
        &self,
        token: &AuthToken,
        family: &FamilyId,
        member: &MemberId,
        payload: &MemberPayload,
    ) -> HouseholdResult<()> {
        debug!(family = %family, member = %member, "PUT member");
        let request = self
            .client
            .put(self.member_url(family, member))
            .headers(Self::auth_headers(token)?)
            .json(payload);
        self.send(request, true).map(|_| ())
    }

    fn delete_member(
        &self,
        token: &AuthToken,
        family: &FamilyId,
        member: &MemberId,
    ) -> HouseholdResult<()> {
        debug!(family = %family, member = %member, "DELETE member");
        let request = self
            .client
            .delete(self.member_url(family, member))
            .headers(Self::auth_headers(token)?);
        self.send(request, true).map(|_| ())
    }

    fn add_expense(
        &self,
        token: &AuthToken,
        family: &FamilyId,
        member: &MemberId,
        payload: &ExpensePayload,
    ) -> HouseholdResult<()> {
        debug!(family = %family, member = %member, "POST expense");
        let request = self
            .client
            .post(format!("{}/expenses", self.member_url(family, member)))
            .headers(Self::auth_headers(token)?)
            .json(payload);
        self.send(request, true).map(|_| ())
    }

    fn delete_expense(
        &self,
        token: &AuthToken,
        family: &FamilyId,
        member: &MemberId,
        expense: &ExpenseId,
    ) -> HouseholdResult<()> {
        debug!(family = %family, member = %member, expense = %expense, "DELETE expense");
        let request = self
            .client
            .delete(format!("{}/expenses/{}", self.member_url(family, member), expense))
            .headers(Self::auth_headers(token)?);
        self.send(request, true).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpApi::new("http://localhost:5000/api/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(
            api.member_url(&FamilyId::from("f1"), &MemberId::from("m1")),
            "http://localhost:5000/api/family/f1/members/m1"
        );
    }

    #[test]
    fn test_auth_header_is_bearer() {
        let headers = HttpApi::auth_headers(&AuthToken::new("abc")).unwrap();
        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer abc");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let api = HttpApi::new("http://127.0.0.1:9/api").unwrap();
        let err = api
            .fetch_family(&AuthToken::new("t"), &FamilyId::from("f1"))
            .unwrap_err();
        assert!(matches!(err, HouseholdError::Network(_)));
    }
}
