use std::{
    collections::{BTreeMap, HashMap, btree_map, hash_map},
    rc::Rc,
};

use crate::{
    account::{Account, AccountKey, AccountNumber},
    user::{NationalId, User},
};

use super::{AccountRepository, RepositoryError, UserRepository};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: HashMap<NationalId, Rc<User>>,
}

impl UserRepository for InMemoryUserRepository {
    fn add(&mut self, user: User) -> Result<Rc<User>, RepositoryError> {
        match self.users.entry(user.national_id().clone()) {
            hash_map::Entry::Occupied(entry) => Err(RepositoryError::DuplicateKey {
                key: entry.key().to_string(),
            }),
            hash_map::Entry::Vacant(entry) => Ok(entry.insert(Rc::new(user)).clone()),
        }
    }

    fn find_by_national_id(&self, national_id: &NationalId) -> Option<Rc<User>> {
        self.users.get(national_id).cloned()
    }

    fn users(&self) -> Vec<Rc<User>> {
        self.users.values().cloned().collect()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: BTreeMap<AccountKey, Account>,
    last_number: AccountNumber,
}

impl AccountRepository for InMemoryAccountRepository {
    fn add(&mut self, account: Account) -> Result<(), RepositoryError> {
        match self.accounts.entry(account.key().clone()) {
            btree_map::Entry::Occupied(entry) => Err(RepositoryError::DuplicateKey {
                key: entry.key().to_string(),
            }),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(account);
                Ok(())
            }
        }
    }

    fn find_by_key(&self, key: &AccountKey) -> Option<&Account> {
        self.accounts.get(key)
    }

    fn find_by_key_mut(&mut self, key: &AccountKey) -> Option<&mut Account> {
        self.accounts.get_mut(key)
    }

    fn accounts(&self) -> Vec<&Account> {
        self.accounts.values().collect()
    }

    fn next_number(&mut self) -> AccountNumber {
        self.last_number += 1;
        self.last_number
    }
}
