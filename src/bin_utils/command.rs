use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::AccountNumber;

pub const MENU: &str = "
================ MENU ================
[d]\tDeposit
[s]\tWithdraw
[e]\tStatement
[nc]\tNew account
[lc]\tList accounts
[nu]\tNew user
[lu]\tList users
[t]\tTransfer
[q]\tQuit
=> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Deposit,
    Withdraw,
    Statement,
    NewAccount,
    ListAccounts,
    NewUser,
    ListUsers,
    Transfer,
    Quit,
}

#[derive(Debug, Error)]
#[error("Invalid operation `{0}`, please select again")]
pub struct UnknownOption(String);

impl FromStr for MenuOption {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "d" => Ok(Self::Deposit),
            "s" => Ok(Self::Withdraw),
            "e" => Ok(Self::Statement),
            "nc" => Ok(Self::NewAccount),
            "lc" => Ok(Self::ListAccounts),
            "nu" => Ok(Self::NewUser),
            "lu" => Ok(Self::ListUsers),
            "t" => Ok(Self::Transfer),
            "q" => Ok(Self::Quit),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// A menu option together with everything prompted for it, ready to be
/// handed to the services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Deposit {
        number: AccountNumber,
        amount: Decimal,
    },
    Withdraw {
        number: AccountNumber,
        amount: Decimal,
    },
    Statement {
        number: AccountNumber,
    },
    NewAccount {
        national_id: String,
    },
    ListAccounts,
    NewUser {
        national_id: String,
        name: String,
        birth_date: String,
        address: String,
    },
    ListUsers,
    Transfer {
        number: AccountNumber,
        destination: AccountNumber,
        amount: Decimal,
    },
}
