use std::rc::Rc;

use thiserror::Error;

use crate::{
    account::{Account, AccountKey, AccountNumber},
    user::{NationalId, User},
};

pub mod in_memory_repository;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("An entry with key {key} already exists")]
    DuplicateKey { key: String },
}

pub trait UserRepository {
    /// Fails with [`RepositoryError::DuplicateKey`] if the national id is taken,
    /// leaving the repository untouched.
    fn add(&mut self, user: User) -> Result<Rc<User>, RepositoryError>;

    fn find_by_national_id(&self, national_id: &NationalId) -> Option<Rc<User>>;

    /// In no particular order.
    fn users(&self) -> Vec<Rc<User>>;
}

pub trait AccountRepository {
    /// Fails with [`RepositoryError::DuplicateKey`] if branch and number are taken,
    /// leaving the repository untouched.
    fn add(&mut self, account: Account) -> Result<(), RepositoryError>;

    fn find_by_key(&self, key: &AccountKey) -> Option<&Account>;

    fn find_by_key_mut(&mut self, key: &AccountKey) -> Option<&mut Account>;

    /// Ordered by branch, then number.
    fn accounts(&self) -> Vec<&Account>;

    /// Returns the next free account number and reserves it.
    fn next_number(&mut self) -> AccountNumber;
}
