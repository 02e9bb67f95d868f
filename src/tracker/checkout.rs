//! Check out the branch named by an issue's `branchName`, creating it from a
//! chosen base when it does not exist yet.

use tracing::info;

use super::VersionControl;
use crate::errors::CheckoutError;

/// Which branch a new issue branch is created from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseChoice {
    Default(String),
    Current(String),
}

impl BaseChoice {
    pub fn branch(&self) -> &str {
        match self {
            BaseChoice::Default(b) | BaseChoice::Current(b) => b,
        }
    }
}

/// Asks the user for a base branch. `None` means the pick was cancelled.
pub trait BaseBranchPicker {
    fn pick(&self, branch: &str, options: &[BaseChoice]) -> Option<BaseChoice>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    SwitchedToExisting,
    Created { base: String },
    Cancelled,
}

pub fn checkout_issue_branch(
    vcs: &dyn VersionControl,
    picker: &dyn BaseBranchPicker,
    branch: &str,
    default_base: &str,
) -> Result<CheckoutOutcome, CheckoutError> {
    let exists = vcs
        .branch_exists(branch)
        .map_err(|e| CheckoutError::RepositoryUnavailable(e.to_string()))?;

    if exists {
        vcs.checkout(branch)
            .map_err(|source| CheckoutError::CheckoutFailed {
                branch: branch.to_string(),
                source,
            })?;
        info!(branch, "switched to existing issue branch");
        return Ok(CheckoutOutcome::SwitchedToExisting);
    }

    let mut options = vec![BaseChoice::Default(default_base.to_string())];
    if let Some(current) = vcs.current_branch_name()
        && current != default_base
    {
        options.push(BaseChoice::Current(current));
    }

    let Some(choice) = picker.pick(branch, &options) else {
        info!(branch, "base branch selection cancelled");
        return Ok(CheckoutOutcome::Cancelled);
    };
    let base = choice.branch().to_string();

    vcs.checkout(&base)
        .map_err(|source| CheckoutError::BaseCheckoutFailed {
            base: base.clone(),
            source,
        })?;
    vcs.create_branch(branch)
        .map_err(|source| CheckoutError::CreateFailed {
            branch: branch.to_string(),
            source,
        })?;

    info!(branch, base = %base, "created issue branch");
    Ok(CheckoutOutcome::Created { base })
}
