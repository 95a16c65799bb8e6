use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::{AccountNumber, Transaction, TransactionKind};

pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Debug, Serialize)]
pub struct AccountRow<'a> {
    pub branch: &'a str,
    pub number: AccountNumber,
    pub holder: &'a str,
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct UserRow<'a> {
    pub national_id: &'a str,
    pub name: &'a str,
    pub birth_date: String,
    pub address: &'a str,
    pub accounts: usize,
}

#[derive(Debug, Serialize)]
pub struct StatementRow<'a> {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub timestamp: String,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a Transaction> for StatementRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            kind: tx.kind(),
            amount: tx.amount(),
            timestamp: tx.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            description: tx.description(),
        }
    }
}

pub fn print_accounts<'a, W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountRow<'a>>,
) -> anyhow::Result<()>
where
    W: Write,
{
    print_rows(output, accounts)
}

pub fn print_users<'a, W>(
    output: &mut W,
    users: impl Iterator<Item = UserRow<'a>>,
) -> anyhow::Result<()>
where
    W: Write,
{
    print_rows(output, users)
}

pub fn print_statement<W>(output: &mut W, transactions: &[Transaction]) -> anyhow::Result<()>
where
    W: Write,
{
    print_rows(output, transactions.iter().map(StatementRow::from))
}

fn print_rows<W, T>(output: &mut W, rows: impl Iterator<Item = T>) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
