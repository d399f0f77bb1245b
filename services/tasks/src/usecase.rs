pub mod profile;
pub mod task;

use taskdesk_domain::id::AccountId;

use crate::domain::repository::ProfileRepository;
use crate::domain::types::Requester;
use crate::error::TasksServiceError;

/// Resolve the authenticated account id into a full requester: the account
/// record plus whichever role profile is linked to it (if any).
pub(crate) async fn resolve_requester<P: ProfileRepository>(
    profiles: &P,
    account_id: AccountId,
) -> Result<Requester, TasksServiceError> {
    let account = profiles
        .find_account(account_id)
        .await?
        .ok_or(TasksServiceError::AccountNotFound)?;
    let profile = profiles.find_role_profile(account_id).await?;
    Ok(Requester { account, profile })
}
