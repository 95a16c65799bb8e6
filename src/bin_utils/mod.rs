//! This module could be a separate crate on its own, to bootstrap [`crate::service`] within
//! the console binary. It stays here so the integration tests can drive a full session.

use std::io::{BufRead, Write};

use anyhow::Result;
use command::{Command, MENU, MenuOption};
use csv_printer::{AccountRow, UserRow, print_accounts, print_statement, print_users};
use prompt::Prompt;

use crate::{
    account::AccountKey,
    service::{Bank, ServiceError},
    user::BIRTH_DATE_FORMAT,
};

pub mod command;
pub mod csv_printer;
pub mod logger;
pub mod prompt;

pub struct Console<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub bank: Bank,
}

impl<'w, R, W> Console<'w, R, W>
where
    R: BufRead,
    W: Write + 'w,
{
    /// Runs the menu loop until `q` or end of input. Business rule failures are
    /// printed and the loop goes on; malformed numbers end the session with an error.
    pub fn run(self) -> Result<()> {
        let Self {
            input,
            output,
            mut bank,
        } = self;
        let mut prompt = Prompt::new(input);

        loop {
            write!(output, "{MENU}")?;
            output.flush()?;
            let Some(line) = prompt.read_line()? else {
                break;
            };
            let option = match line.parse::<MenuOption>() {
                Ok(option) => option,
                Err(err) => {
                    writeln!(output, "\n@@@ {err} @@@")?;
                    continue;
                }
            };
            let Some(command) = prompt.read_command(output, option)? else {
                writeln!(output, "\n=== Thank you for banking with us! ===")?;
                break;
            };
            if let Err(err) = execute(&mut bank, output, command) {
                match err.downcast::<ServiceError>() {
                    Ok(err) => writeln!(output, "\n@@@ Operation failed! {err} @@@")?,
                    Err(err) => return Err(err),
                }
            }
        }
        output.flush()?;
        Ok(())
    }
}

fn execute<W: Write>(bank: &mut Bank, output: &mut W, command: Command) -> Result<()> {
    let branch = bank.config().branch_code.clone();
    let key = |number| AccountKey::new(branch.as_str(), number);

    match command {
        Command::Deposit { number, amount } => {
            let balance = bank.operations().deposit(&key(number), amount)?;
            writeln!(output, "\n=== Deposit completed! ===")?;
            writeln!(output, "New balance: {balance:.2}")?;
        }
        Command::Withdraw { number, amount } => {
            let balance = bank.operations().withdraw(&key(number), amount)?;
            writeln!(output, "\n=== Withdrawal completed! ===")?;
            writeln!(output, "New balance: {balance:.2}")?;
        }
        Command::Statement { number } => {
            let operations = bank.operations();
            let statement = operations.statement(&key(number))?;
            writeln!(output, "\n================ STATEMENT ================")?;
            if statement.transactions.is_empty() {
                writeln!(output, "No transactions were made.")?;
            } else {
                print_statement(output, statement.transactions)?;
            }
            writeln!(output, "\nBalance: {:.2}", statement.balance)?;
            writeln!(output, "===========================================")?;
        }
        Command::NewAccount { national_id } => {
            let key = bank.accounts().create_account(&branch, &national_id)?;
            writeln!(output, "\n=== Account created! ===")?;
            writeln!(output, "Branch: {} | Account: {}", key.branch, key.number)?;
        }
        Command::ListAccounts => {
            let service = bank.accounts();
            let accounts = service.list_accounts();
            if accounts.is_empty() {
                writeln!(output, "\n@@@ No accounts registered! @@@")?;
            } else {
                print_accounts(
                    output,
                    accounts.iter().map(|acc| AccountRow {
                        branch: &acc.key().branch,
                        number: acc.key().number,
                        holder: acc.holder().name(),
                        balance: acc.balance(),
                    }),
                )?;
            }
        }
        Command::NewUser {
            national_id,
            name,
            birth_date,
            address,
        } => {
            let user = bank
                .users()
                .register(&name, &birth_date, &national_id, &address)?;
            writeln!(output, "\n=== User {} registered! ===", user.name())?;
        }
        Command::ListUsers => {
            let users = bank.users().list_users();
            if users.is_empty() {
                writeln!(output, "\n@@@ No users registered! @@@")?;
            } else {
                let service = bank.accounts();
                print_users(
                    output,
                    users.iter().map(|user| UserRow {
                        national_id: user.national_id().as_str(),
                        name: user.name(),
                        birth_date: user.birth_date().format(BIRTH_DATE_FORMAT).to_string(),
                        address: user.address(),
                        accounts: service.accounts_of(user.national_id().as_str()).len(),
                    }),
                )?;
            }
        }
        Command::Transfer {
            number,
            destination,
            amount,
        } => {
            let balance =
                bank.operations()
                    .transfer(&key(number), &key(destination), amount)?;
            writeln!(output, "\n=== Transfer completed! ===")?;
            writeln!(output, "Sent {amount:.2} to account {destination}")?;
            writeln!(output, "New balance: {balance:.2}")?;
        }
    }
    Ok(())
}
