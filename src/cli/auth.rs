//! Login, registration and logout from the command line
//!
//! Passwords are always read with hidden input.

use super::with_fallback;
use crate::api::FamilyApi;
use crate::error::{HouseholdError, HouseholdResult};
use crate::services::auth::{LOGIN_FALLBACK, REGISTER_FALLBACK};
use crate::services::AuthService;
use crate::session::SessionStore;

fn prompt_password(prompt: &str) -> HouseholdResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| HouseholdError::Io(format!("Failed to read password: {}", e)))
}

pub fn handle_login(api: &dyn FamilyApi, session: &mut SessionStore, name: &str) -> HouseholdResult<()> {
    let password = prompt_password("Password: ")?;
    let family = AuthService::new(api, session)
        .login(name, &password)
        .map_err(|e| with_fallback(e, LOGIN_FALLBACK))?;

    println!("Login successful!");
    println!("  Family: {}", family.name);
    Ok(())
}

pub fn handle_register(
    api: &dyn FamilyApi,
    session: &mut SessionStore,
    name: &str,
) -> HouseholdResult<()> {
    let password = prompt_password("Password: ")?;
    let confirm = prompt_password("Confirm password: ")?;
    let family = AuthService::new(api, session)
        .register(name, &password, &confirm)
        .map_err(|e| with_fallback(e, REGISTER_FALLBACK))?;

    println!("Family registered successfully!");
    println!("  Family: {}", family.name);
    println!("  ID: {}", family.id);
    Ok(())
}

pub fn handle_logout(api: &dyn FamilyApi, session: &mut SessionStore) -> HouseholdResult<()> {
    if !session.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    AuthService::new(api, session).logout()?;
    println!("Logged out.");
    Ok(())
}
