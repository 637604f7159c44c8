//! Member CLI commands
//!
//! Every command fetches the family first so that lookups and duplicate
//! checks run against what the server currently holds.

use clap::Subcommand;

use super::{confirm, explain, find_member, load_family, report};
use crate::config::Settings;
use crate::display::format_member_table;
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::Money;
use crate::services::{MemberDraft, Operation, Synchronizer};

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// List members with their budget figures
    List,

    /// Add a member
    Add {
        /// Member name
        name: String,
        /// Monthly salary; makes the member an earning member
        #[arg(short, long)]
        salary: Option<String>,
    },

    /// Edit a member
    Edit {
        /// Member name or ID
        member: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// Whether the member earns (true/false)
        #[arg(long)]
        earning: Option<bool>,
        /// New salary
        #[arg(short, long)]
        salary: Option<String>,
    },

    /// Delete a member and all of their expenses
    Delete {
        /// Member name or ID
        member: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_salary(raw: &str) -> HouseholdResult<Money> {
    Money::parse(raw).map_err(|e| HouseholdError::Validation(format!("Invalid salary: {}", e)))
}

/// Handle a member command
pub fn handle_member_command(
    sync: &mut Synchronizer,
    settings: &Settings,
    cmd: MemberCommands,
) -> HouseholdResult<()> {
    let family = load_family(sync)?;

    match cmd {
        MemberCommands::List => {
            print!("{}", format_member_table(&family, &settings.currency_symbol));
        }

        MemberCommands::Add { name, salary } => {
            let salary = salary.as_deref().map(parse_salary).transpose()?;
            let draft = MemberDraft::new(name, salary.is_some(), salary);

            let outcome = sync
                .add_member(draft)
                .map_err(|e| explain(Operation::AddMember, e))?;
            report(Operation::AddMember, &outcome);
        }

        MemberCommands::Edit {
            member,
            name,
            earning,
            salary,
        } => {
            let target = find_member(&family, &member)?;
            let member_id = target.id.clone();

            let mut draft = MemberDraft::from_member(target);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(salary) = salary {
                draft.salary = Some(parse_salary(&salary)?);
                draft.is_earning = true;
            }
            if let Some(earning) = earning {
                draft.is_earning = earning;
            }

            let outcome = sync
                .update_member(&member_id, draft)
                .map_err(|e| explain(Operation::UpdateMember, e))?;
            report(Operation::UpdateMember, &outcome);
        }

        MemberCommands::Delete { member, yes } => {
            let member_id = find_member(&family, &member)?.id.clone();
            let pending = sync.request_member_deletion(&member_id)?;

            if !yes {
                if let Some(warning) = pending.warning() {
                    println!("{}", warning);
                }
                if !confirm(&pending.prompt())? {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            let outcome = sync
                .confirm_member_deletion(pending)
                .map_err(|e| explain(Operation::DeleteMember, e))?;
            report(Operation::DeleteMember, &outcome);
        }
    }

    Ok(())
}
