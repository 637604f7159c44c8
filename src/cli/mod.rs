//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod expense;
pub mod member;

pub use auth::{handle_login, handle_logout, handle_register};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use member::{handle_member_command, MemberCommands};

use std::io::Write;
use std::sync::Arc;

use crate::config::Settings;
use crate::display::{format_family_summary, format_member_table};
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{Family, Member, MemberId};
use crate::services::{Operation, SyncOutcome, Synchronizer};

/// Fetch the session's family, with a hint when nobody is logged in
pub fn load_family(sync: &mut Synchronizer) -> HouseholdResult<Arc<Family>> {
    if !sync.session().is_authenticated() {
        return Err(HouseholdError::Validation(
            "Not logged in. Run 'household login <family>' first.".into(),
        ));
    }
    sync
        .refresh()
        .map_err(|e| with_fallback(e, Operation::FetchFamily.fallback_message()))
}

/// Print the family summary and member table
pub fn handle_show(sync: &mut Synchronizer, settings: &Settings) -> HouseholdResult<()> {
    let family = load_family(sync)?;
    print!("{}", format_family_summary(&family, &settings.currency_symbol));
    println!();
    print!("{}", format_member_table(&family, &settings.currency_symbol));
    Ok(())
}

/// Look a member up by id, then by name (case-insensitive)
pub(crate) fn find_member<'a>(family: &'a Family, identifier: &str) -> HouseholdResult<&'a Member> {
    family
        .member(&MemberId::from(identifier))
        .or_else(|| family.member_by_name(identifier))
        .ok_or_else(|| HouseholdError::member_not_found(identifier))
}

/// Report a mutation the server accepted
pub(crate) fn report(operation: Operation, outcome: &SyncOutcome) {
    println!("{}", operation.success_message());
    if let SyncOutcome::Stale(e) = outcome {
        eprintln!(
            "Warning: could not refresh family details: {}",
            e.user_message(Operation::FetchFamily.fallback_message())
        );
    }
}

/// Server failures are reported with their own message or `fallback`
pub(crate) fn with_fallback(error: HouseholdError, fallback: &str) -> HouseholdError {
    match error {
        HouseholdError::Api { .. } | HouseholdError::Network(_) => {
            HouseholdError::Validation(error.user_message(fallback))
        }
        other => other,
    }
}

/// Turn a failed mutation into the message the user sees
pub(crate) fn explain(operation: Operation, error: HouseholdError) -> HouseholdError {
    with_fallback(error, operation.fallback_message())
}

/// Ask a yes/no question on stdin; anything but "y"/"yes" is a no
pub(crate) fn confirm(question: &str) -> HouseholdResult<bool> {
    print!("{} (y/N): ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
