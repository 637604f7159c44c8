//! Authentication service
//!
//! Login and registration both end in a fresh [`Session`] written to the
//! session store, replacing whatever was there before.

use tracing::{info, warn};

use crate::api::{Credentials, FamilyApi};
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::FamilySummary;
use crate::session::{Session, SessionStore};

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

pub const LOGIN_FALLBACK: &str = "Login failed";
pub const REGISTER_FALLBACK: &str = "Registration failed";

/// Service for establishing and ending sessions
pub struct AuthService<'a> {
    api: &'a dyn FamilyApi,
    session: &'a mut SessionStore,
}

impl<'a> AuthService<'a> {
    pub fn new(api: &'a dyn FamilyApi, session: &'a mut SessionStore) -> Self {
        Self { api, session }
    }

    /// Log in to an existing family
    pub fn login(&mut self, name: &str, password: &str) -> HouseholdResult<FamilySummary> {
        let name = name.trim();
        if name.is_empty() || password.is_empty() {
            return Err(HouseholdError::Validation("All fields are required".into()));
        }

        let credentials = Credentials::new(name, password);
        let response = self.api.login(&credentials).inspect_err(|e| {
            warn!(name = %name, error = %e, "login failed");
        })?;
        self.store(response.into_session()?)
    }

    /// Register a new family and log straight in
    pub fn register(
        &mut self,
        name: &str,
        password: &str,
        confirm_password: &str,
    ) -> HouseholdResult<FamilySummary> {
        let name = name.trim();
        if name.is_empty() || password.is_empty() || confirm_password.is_empty() {
            return Err(HouseholdError::Validation("All fields are required".into()));
        }
        if password != confirm_password {
            return Err(HouseholdError::Validation("Passwords do not match".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(HouseholdError::Validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }

        let credentials = Credentials::new(name, password);
        let response = self.api.register(&credentials).inspect_err(|e| {
            warn!(name = %name, error = %e, "registration failed");
        })?;
        self.store(response.into_session()?)
    }

    /// Forget the current session
    pub fn logout(&mut self) -> HouseholdResult<()> {
        self.session.clear()
    }

    fn store(&mut self, session: Session) -> HouseholdResult<FamilySummary> {
        let family = session.family.clone();
        self.session.establish(session)?;
        info!(family = %family.id, "logged in");
        Ok(family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{Call, Failure, MockApi};
    use crate::config::HouseholdPaths;
    use tempfile::TempDir;

    #[test]
    fn test_login_establishes_session() {
        let api = MockApi::with_sample();
        let mut store = SessionStore::in_memory();

        let family = AuthService::new(&api, &mut store)
            .login(" Sharma ", "secret1")
            .unwrap();

        assert_eq!(family.name, "Sharma");
        assert_eq!(store.current().unwrap().token.expose(), "token-123");
        assert_eq!(api.calls(), vec![Call::Login("Sharma".into())]);
    }

    #[test]
    fn test_login_requires_all_fields() {
        let api = MockApi::with_sample();
        let mut store = SessionStore::in_memory();

        let err = AuthService::new(&api, &mut store).login("", "secret1").unwrap_err();
        assert_eq!(err.user_message(LOGIN_FALLBACK), "All fields are required");
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_login_rejection_uses_server_message() {
        let api = MockApi::with_sample();
        let mut store = SessionStore::in_memory();

        let err = AuthService::new(&api, &mut store)
            .login("Sharma", "wrong-password")
            .unwrap_err();
        assert_eq!(err.user_message(LOGIN_FALLBACK), "Invalid credentials");
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_network_failure_uses_fallback() {
        let api = MockApi::with_sample();
        api.fail_next_mutation(Failure::Network);
        let mut store = SessionStore::in_memory();

        let err = AuthService::new(&api, &mut store)
            .register("Sharma", "secret1", "secret1")
            .unwrap_err();
        assert_eq!(err.user_message(REGISTER_FALLBACK), "Registration failed");
    }

    #[test]
    fn test_register_validation_order() {
        let api = MockApi::with_sample();
        let mut store = SessionStore::in_memory();
        let mut auth = AuthService::new(&api, &mut store);

        let err = auth.register("Sharma", "secret1", "").unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");

        let err = auth.register("Sharma", "secret1", "secret2").unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");

        let err = auth.register("Sharma", "abc", "abc").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters long");

        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_new_login_overwrites_and_logout_clears_file() {
        let temp = TempDir::new().unwrap();
        let paths = HouseholdPaths::with_base_dir(temp.path().to_path_buf());
        paths.ensure_directories().unwrap();
        let api = MockApi::with_sample();

        let mut store = SessionStore::open(&paths).unwrap();
        AuthService::new(&api, &mut store)
            .register("Sharma", "secret1", "secret1")
            .unwrap();
        AuthService::new(&api, &mut store)
            .login("Sharma", "secret1")
            .unwrap();
        assert!(paths.session_file().exists());

        let reopened = SessionStore::open(&paths).unwrap();
        assert_eq!(reopened.family().unwrap().name, "Sharma");

        AuthService::new(&api, &mut store).logout().unwrap();
        assert!(!store.is_authenticated());
        assert!(!paths.session_file().exists());
    }
}
