use thiserror::Error;

use crate::{
    account::{AccountError, AccountKey},
    config::BankConfig,
    repository::{
        AccountRepository, RepositoryError, UserRepository,
        in_memory_repository::{InMemoryAccountRepository, InMemoryUserRepository},
    },
    user::InputError,
};

pub mod account_service;
pub mod operation_service;
pub mod user_service;

pub use account_service::AccountService;
pub use operation_service::OperationService;
pub use user_service::UserService;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error(transparent)]
    RepositoryErr(#[from] RepositoryError),
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    #[error("No user registered with national id {national_id}")]
    UserNotFound { national_id: String },
    #[error("Account not found: {key}")]
    AccountNotFound { key: AccountKey },
    #[error("Cannot transfer from {key} to itself")]
    SelfTransfer { key: AccountKey },
}

/// Owns the repositories for the lifetime of the process and lends them to
/// services, one call chain at a time.
#[derive(Debug)]
pub struct Bank<U = InMemoryUserRepository, A = InMemoryAccountRepository> {
    users: U,
    accounts: A,
    config: BankConfig,
}

impl Bank {
    pub fn new(config: BankConfig) -> Self {
        Self::with_repositories(
            InMemoryUserRepository::default(),
            InMemoryAccountRepository::default(),
            config,
        )
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new(BankConfig::default())
    }
}

impl<U, A> Bank<U, A>
where
    U: UserRepository,
    A: AccountRepository,
{
    pub fn with_repositories(users: U, accounts: A, config: BankConfig) -> Self {
        Self {
            users,
            accounts,
            config,
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn users(&mut self) -> UserService<'_, U> {
        UserService::new(&mut self.users)
    }

    pub fn accounts(&mut self) -> AccountService<'_, U, A> {
        AccountService::new(&self.users, &mut self.accounts)
    }

    pub fn operations(&mut self) -> OperationService<'_, A> {
        OperationService::new(&mut self.accounts, &self.config.limits)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::{Decimal, prelude::FromPrimitive};

    use super::*;

    const ANA_ID: &str = "11144477735";

    #[test]
    fn first_account_scenario() {
        let mut bank = Bank::default();
        let ana = bank
            .users()
            .register("Ana", "01-01-1990", ANA_ID, "Rua A, 1 - Centro - Recife/PE")
            .unwrap();
        assert_eq!(ana.name(), "Ana");

        let key = bank.accounts().create_account("0001", ANA_ID).unwrap();
        assert_eq!(key, AccountKey::new("0001", 1));

        let mut ops = bank.operations();
        let balance = ops
            .deposit(&key, Decimal::from_u32(100).unwrap())
            .unwrap();
        assert_eq!(balance, Decimal::from_u32(100).unwrap());
        let balance = ops
            .withdraw(&key, Decimal::from_u32(50).unwrap())
            .unwrap();
        assert_eq!(balance, Decimal::from_u32(50).unwrap());

        let err = ops
            .withdraw(&key, Decimal::from_u32(500).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::AccountErr(AccountError::InsufficientBalance)
        );

        let service = bank.accounts();
        let account = service.find_account(&key).unwrap();
        assert_eq!(account.balance(), Decimal::from_u32(50).unwrap());
        assert_eq!(account.withdrawal_count(), 1);
        assert_eq!(account.history().len(), 2);
    }

    #[test]
    fn configured_limits_are_shared_by_all_accounts() {
        let mut config = BankConfig::default();
        config.limits.daily_withdrawals = 1;
        let mut bank = Bank::new(config);
        bank.users()
            .register("Ana", "01-01-1990", ANA_ID, "Rua A, 1")
            .unwrap();
        let first = bank.accounts().create_account("0001", ANA_ID).unwrap();
        let second = bank.accounts().create_account("0001", ANA_ID).unwrap();

        let mut ops = bank.operations();
        for key in [&first, &second] {
            ops.deposit(key, Decimal::from_u32(100).unwrap()).unwrap();
            ops.withdraw(key, Decimal::from_u32(10).unwrap()).unwrap();
            let err = ops
                .withdraw(key, Decimal::from_u32(10).unwrap())
                .unwrap_err();
            assert!(matches!(
                err,
                ServiceError::AccountErr(AccountError::LimitExceeded { .. })
            ));
        }
    }
}
