use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    account::{Account, AccountKey, Statement},
    config::WithdrawalLimits,
    repository::AccountRepository,
};

use super::ServiceError;

/// Money movements between and within accounts. Every failure leaves all
/// accounts untouched.
pub struct OperationService<'r, A> {
    accounts: &'r mut A,
    limits: &'r WithdrawalLimits,
}

impl<'r, A> OperationService<'r, A>
where
    A: AccountRepository,
{
    pub fn new(accounts: &'r mut A, limits: &'r WithdrawalLimits) -> Self {
        Self { accounts, limits }
    }

    /// Returns the new balance.
    pub fn deposit(
        &mut self,
        key: &AccountKey,
        amount: Decimal,
    ) -> Result<Decimal, ServiceError> {
        let acc = self.account_mut(key)?;
        let tx = acc.handle_deposit(amount).inspect_err(|err| {
            debug!(account = %key, %amount, %err, "deposit rejected");
        })?;
        acc.apply(tx);
        info!(account = %key, %amount, "deposit completed");
        Ok(acc.balance())
    }

    /// Returns the new balance.
    pub fn withdraw(
        &mut self,
        key: &AccountKey,
        amount: Decimal,
    ) -> Result<Decimal, ServiceError> {
        let limits = self.limits;
        let acc = self.account_mut(key)?;
        let tx = acc.handle_withdraw(amount, limits).inspect_err(|err| {
            debug!(account = %key, %amount, %err, "withdrawal rejected");
        })?;
        acc.apply(tx);
        info!(account = %key, %amount, "withdrawal completed");
        Ok(acc.balance())
    }

    /// Moves `amount` from `source` to `destination` and returns the new
    /// balance of `source`. Both accounts are validated before either changes.
    pub fn transfer(
        &mut self,
        source: &AccountKey,
        destination: &AccountKey,
        amount: Decimal,
    ) -> Result<Decimal, ServiceError> {
        if source == destination {
            return Err(ServiceError::SelfTransfer {
                key: source.clone(),
            });
        }
        let to = self.account(destination)?;
        let (sent, received) = self
            .account(source)?
            .handle_transfer(amount, to)
            .inspect_err(|err| {
                debug!(%source, %destination, %amount, %err, "transfer rejected");
            })?;

        // both accounts exist and the transfer is valid, applying cannot fail
        let acc = self.account_mut(source)?;
        acc.apply(sent);
        let balance = acc.balance();
        self.account_mut(destination)?.apply(received);
        info!(%source, %destination, %amount, "transfer completed");
        Ok(balance)
    }

    pub fn statement(&self, key: &AccountKey) -> Result<Statement<'_>, ServiceError> {
        Ok(self.account(key)?.statement())
    }

    fn account(&self, key: &AccountKey) -> Result<&Account, ServiceError> {
        self.accounts
            .find_by_key(key)
            .ok_or_else(|| ServiceError::AccountNotFound { key: key.clone() })
    }

    fn account_mut(&mut self, key: &AccountKey) -> Result<&mut Account, ServiceError> {
        self.accounts
            .find_by_key_mut(key)
            .ok_or_else(|| ServiceError::AccountNotFound { key: key.clone() })
    }
}
