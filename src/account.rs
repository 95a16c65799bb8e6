use std::{fmt, rc::Rc};

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{config::WithdrawalLimits, user::User};

pub type AccountNumber = u32;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountKey {
    pub branch: String,
    pub number: AccountNumber,
}

impl AccountKey {
    pub fn new(branch: impl Into<String>, number: AccountNumber) -> Self {
        Self {
            branch: branch.into(),
            number,
        }
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "branch {} account {}", self.branch, self.number)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    TransferSent,
    TransferReceived,
}

/// A single history entry. Amounts are signed: money leaving the account is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Decimal,
    timestamp: DateTime<Local>,
    description: Option<String>,
}

impl Transaction {
    fn new(kind: TransactionKind, amount: Decimal, timestamp: DateTime<Local>) -> Self {
        Self {
            kind,
            amount,
            timestamp,
            description: None,
        }
    }

    fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalLimit {
    PerTransaction(Decimal),
    Daily(u32),
}

impl fmt::Display for WithdrawalLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerTransaction(amount) => write!(f, "per withdrawal limit of {amount}"),
            Self::Daily(count) => write!(f, "daily limit of {count} withdrawals"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Withdrawal exceeds the {limit}")]
    LimitExceeded { limit: WithdrawalLimit },
    #[error("Balance would exceed the largest representable amount")]
    BalanceOverflow,
}

#[derive(Debug)]
pub struct Statement<'a> {
    pub key: &'a AccountKey,
    pub transactions: &'a [Transaction],
    pub balance: Decimal,
}

#[derive(Debug)]
pub struct Account {
    key: AccountKey,
    holder: Rc<User>,
    balance: Decimal,
    history: Vec<Transaction>,
    withdrawal_count: u32,
}

impl Account {
    pub fn new(key: AccountKey, holder: Rc<User>) -> Self {
        Self {
            key,
            holder,
            balance: Decimal::ZERO,
            history: Vec::new(),
            withdrawal_count: 0,
        }
    }

    pub fn key(&self) -> &AccountKey {
        &self.key
    }

    pub fn holder(&self) -> &Rc<User> {
        &self.holder
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn withdrawal_count(&self) -> u32 {
        self.withdrawal_count
    }

    pub fn statement(&self) -> Statement<'_> {
        Statement {
            key: &self.key,
            transactions: &self.history,
            balance: self.balance,
        }
    }

    /// Records an already validated transaction. Never fails.
    pub fn apply(&mut self, transaction: Transaction) {
        self.balance += transaction.amount;
        if transaction.kind == TransactionKind::Withdrawal {
            self.withdrawal_count += 1;
        }
        self.history.push(transaction);
    }

    pub fn handle_deposit(&self, amount: Decimal) -> Result<Transaction, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        if self.balance.checked_add(amount).is_none() {
            return Err(AccountError::BalanceOverflow);
        }
        Ok(Transaction::new(
            TransactionKind::Deposit,
            amount,
            Local::now(),
        ))
    }

    pub fn handle_withdraw(
        &self,
        amount: Decimal,
        limits: &WithdrawalLimits,
    ) -> Result<Transaction, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientBalance);
        }
        if amount > limits.per_withdrawal {
            return Err(AccountError::LimitExceeded {
                limit: WithdrawalLimit::PerTransaction(limits.per_withdrawal),
            });
        }
        if self.withdrawal_count >= limits.daily_withdrawals {
            return Err(AccountError::LimitExceeded {
                limit: WithdrawalLimit::Daily(limits.daily_withdrawals),
            });
        }
        Ok(Transaction::new(
            TransactionKind::Withdrawal,
            -amount,
            Local::now(),
        ))
    }

    /// Returns the pair (sent, received): the first belongs to this account,
    /// the second to `destination`. Both can be applied without failing.
    pub fn handle_transfer(
        &self,
        amount: Decimal,
        destination: &Account,
    ) -> Result<(Transaction, Transaction), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientBalance);
        }
        if destination.balance.checked_add(amount).is_none() {
            return Err(AccountError::BalanceOverflow);
        }
        let timestamp = Local::now();
        let sent = Transaction::new(TransactionKind::TransferSent, -amount, timestamp)
            .with_description(format!("to {}", destination.key));
        let received = Transaction::new(TransactionKind::TransferReceived, amount, timestamp)
            .with_description(format!("from {}", self.key));
        Ok((sent, received))
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let tx = self.handle_deposit(amount)?;
        self.apply(tx);
        Ok(())
    }

    pub fn withdraw(
        &mut self,
        amount: Decimal,
        limits: &WithdrawalLimits,
    ) -> Result<(), AccountError> {
        let tx = self.handle_withdraw(amount, limits)?;
        self.apply(tx);
        Ok(())
    }

    pub fn transfer(
        &mut self,
        amount: Decimal,
        destination: &mut Account,
    ) -> Result<(), AccountError> {
        let (sent, received) = self.handle_transfer(amount, destination)?;
        self.apply(sent);
        destination.apply(received);
        Ok(())
    }
}
