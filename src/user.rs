use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

pub const BIRTH_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("`{0}` is not a valid national id")]
    InvalidNationalId(String),
    #[error("`{0}` is not a valid birth date, expected dd-mm-yyyy")]
    InvalidBirthDate(String),
}

/// 11 digit identifier whose last two digits are modulo-11 check digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NationalId(String);

impl NationalId {
    pub fn parse(value: &str) -> Result<Self, InputError> {
        let invalid = || InputError::InvalidNationalId(value.to_string());

        let digits = value
            .chars()
            .map(|c| c.to_digit(10))
            .collect::<Option<Vec<u32>>>()
            .ok_or_else(invalid)?;
        if digits.len() != 11 {
            return Err(invalid());
        }
        // repeated digits pass the checksum but are never issued
        if digits.iter().all(|d| *d == digits[0]) {
            return Err(invalid());
        }
        if check_digit(&digits[..9]) != digits[9] || check_digit(&digits[..10]) != digits[10] {
            return Err(invalid());
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weights run from `digits.len() + 1` down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight - i as u32))
        .sum();
    match sum * 10 % 11 {
        10 => 0,
        digit => digit,
    }
}

/// Strict `dd-mm-yyyy`: zero padded, dash separated, and an existing calendar day.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate, InputError> {
    let invalid = || InputError::InvalidBirthDate(value.to_string());

    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            2 | 5 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, BIRTH_DATE_FORMAT).map_err(|_| invalid())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    birth_date: NaiveDate,
    national_id: NationalId,
    address: String,
}

impl User {
    pub fn new(
        name: String,
        birth_date: NaiveDate,
        national_id: NationalId,
        address: String,
    ) -> Self {
        Self {
            name,
            birth_date,
            national_id,
            address,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}
