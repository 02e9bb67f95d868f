pub mod checkout;
pub mod git;

pub use checkout::{BaseBranchPicker, BaseChoice, CheckoutOutcome, checkout_issue_branch};
pub use git::GitTracker;

use anyhow::Result;

/// Version-control collaborator the tree and checkout flow talk to.
///
/// `current_branch_name` returns `None` while the repository is not ready
/// (not opened yet, unborn or detached HEAD); callers treat that as
/// transient.
pub trait VersionControl: Send + Sync {
    fn current_branch_name(&self) -> Option<String>;

    fn branch_exists(&self, name: &str) -> Result<bool>;

    fn checkout(&self, name: &str) -> Result<()>;

    /// Create `name` at HEAD and check it out.
    fn create_branch(&self, name: &str) -> Result<()>;
}
