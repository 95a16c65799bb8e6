use tracing::{debug, info};

use crate::{
    account::{Account, AccountKey},
    repository::{AccountRepository, UserRepository},
    user::NationalId,
};

use super::ServiceError;

pub struct AccountService<'r, U, A> {
    users: &'r U,
    accounts: &'r mut A,
}

impl<'r, U, A> AccountService<'r, U, A>
where
    U: UserRepository,
    A: AccountRepository,
{
    pub fn new(users: &'r U, accounts: &'r mut A) -> Self {
        Self { users, accounts }
    }

    /// Opens an account for a registered user under the next sequential number.
    pub fn create_account(
        &mut self,
        branch: &str,
        national_id: &str,
    ) -> Result<AccountKey, ServiceError> {
        let national_id = national_id.trim();
        let Some(holder) = NationalId::parse(national_id)
            .ok()
            .and_then(|id| self.users.find_by_national_id(&id))
        else {
            debug!(national_id, "account creation rejected, unknown user");
            return Err(ServiceError::UserNotFound {
                national_id: national_id.to_string(),
            });
        };

        let key = AccountKey::new(branch, self.accounts.next_number());
        self.accounts.add(Account::new(key.clone(), holder))?;
        info!(branch = %key.branch, number = key.number, national_id, "account created");
        Ok(key)
    }

    pub fn find_account(&self, key: &AccountKey) -> Result<&Account, ServiceError> {
        self.accounts
            .find_by_key(key)
            .ok_or_else(|| ServiceError::AccountNotFound { key: key.clone() })
    }

    pub fn list_accounts(&self) -> Vec<&Account> {
        self.accounts.accounts()
    }

    pub fn accounts_of(&self, national_id: &str) -> Vec<&Account> {
        let national_id = national_id.trim();
        self.accounts
            .accounts()
            .into_iter()
            .filter(|acc| acc.holder().national_id().as_str() == national_id)
            .collect()
    }
}
