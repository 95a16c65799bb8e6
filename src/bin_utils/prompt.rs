use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use crate::account::AccountNumber;

use super::command::{Command, MenuOption};

/// Reads answers line by line, echoing each question to the output first.
pub struct Prompt<R> {
    input: R,
}

impl<R> Prompt<R>
where
    R: BufRead,
{
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// `None` once the input is exhausted.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompts for the arguments of `option`. Returns `None` for [`MenuOption::Quit`].
    pub fn read_command<W: Write>(
        &mut self,
        output: &mut W,
        option: MenuOption,
    ) -> Result<Option<Command>> {
        let command = match option {
            MenuOption::Deposit => Command::Deposit {
                number: self.ask_number(output, "Account number: ")?,
                amount: self.ask_amount(output, "Deposit amount: ")?,
            },
            MenuOption::Withdraw => Command::Withdraw {
                number: self.ask_number(output, "Account number: ")?,
                amount: self.ask_amount(output, "Withdrawal amount: ")?,
            },
            MenuOption::Statement => Command::Statement {
                number: self.ask_number(output, "Account number: ")?,
            },
            MenuOption::NewAccount => Command::NewAccount {
                national_id: self.ask(output, "User national id: ")?,
            },
            MenuOption::ListAccounts => Command::ListAccounts,
            MenuOption::NewUser => Command::NewUser {
                national_id: self.ask(output, "National id (digits only): ")?,
                name: self.ask(output, "Full name: ")?,
                birth_date: self.ask(output, "Birth date (dd-mm-yyyy): ")?,
                address: self.ask(output, "Address (street, number - district - city/state): ")?,
            },
            MenuOption::ListUsers => Command::ListUsers,
            MenuOption::Transfer => Command::Transfer {
                number: self.ask_number(output, "Source account number: ")?,
                destination: self.ask_number(output, "Destination account number: ")?,
                amount: self.ask_amount(output, "Transfer amount: ")?,
            },
            MenuOption::Quit => return Ok(None),
        };
        Ok(Some(command))
    }

    fn ask<W: Write>(&mut self, output: &mut W, question: &str) -> Result<String> {
        write!(output, "{question}")?;
        output.flush()?;
        self.read_line()?
            .with_context(|| format!("Input ended while waiting for `{}`", question.trim_end()))
    }

    fn ask_amount<W: Write>(&mut self, output: &mut W, question: &str) -> Result<Decimal> {
        let answer = self.ask(output, question)?;
        Decimal::from_str(&answer).with_context(|| format!("Invalid amount `{answer}`"))
    }

    fn ask_number<W: Write>(&mut self, output: &mut W, question: &str) -> Result<AccountNumber> {
        let answer = self.ask(output, question)?;
        answer
            .parse()
            .with_context(|| format!("Invalid account number `{answer}`"))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use super::*;

    #[test]
    fn read_commands() {
        let mut prompt = Prompt::new("1\n25.5\n3\n4\n10\n".as_bytes());
        let mut output = Vec::new();

        let cmd = prompt
            .read_command(&mut output, MenuOption::Deposit)
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Deposit {
                number: 1,
                amount: Decimal::from_str_exact("25.5").unwrap()
            }
        );
        let cmd = prompt
            .read_command(&mut output, MenuOption::Transfer)
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Transfer {
                number: 3,
                destination: 4,
                amount: Decimal::from_u32(10).unwrap()
            }
        );
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Account number: Deposit amount: Source account number: \
             Destination account number: Transfer amount: "
        );
        assert!(prompt.read_line().unwrap().is_none());
    }

    #[test]
    fn quit_and_list_need_no_input() {
        let mut prompt = Prompt::new("".as_bytes());
        let mut output = Vec::<u8>::new();
        assert!(
            prompt
                .read_command(&mut output, MenuOption::Quit)
                .unwrap()
                .is_none()
        );
        assert_eq!(
            prompt
                .read_command(&mut output, MenuOption::ListAccounts)
                .unwrap(),
            Some(Command::ListAccounts)
        );
        assert!(output.is_empty());
    }

    #[test]
    fn malformed_numbers() {
        let mut output = Vec::<u8>::new();
        let err = Prompt::new("1\nten\n".as_bytes())
            .read_command(&mut output, MenuOption::Withdraw)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid amount `ten`");

        let err = Prompt::new("-1\n".as_bytes())
            .read_command(&mut output, MenuOption::Statement)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid account number `-1`");
    }

    #[test]
    fn input_ends_mid_command() {
        let mut output = Vec::<u8>::new();
        let err = Prompt::new("11144477735\nAna\n".as_bytes())
            .read_command(&mut output, MenuOption::NewUser)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Input ended while waiting for `Birth date (dd-mm-yyyy):`"
        );
    }
}
