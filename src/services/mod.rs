//! Service layer for the household client
//!
//! The service layer sits between the UI surfaces and the remote API:
//! derived metrics, authentication, and keeping the local family snapshot in
//! step with the server.

pub mod auth;
pub mod metrics;
pub mod queue;
pub mod sync;

pub use auth::AuthService;
pub use metrics::{FamilyOverview, MemberMetrics, SavingsStatus};
pub use queue::MutationQueue;
pub use sync::{
    ExpenseDraft, MemberDraft, Mutation, Operation, PendingDeletion, SyncOutcome, Synchronizer,
};
