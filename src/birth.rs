use chrono::{Datelike, NaiveDate};
use derive_more::Display;
use std::str::FromStr;

use crate::error::*;

pub const BIRTH_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Gender {
    #[display(fmt = "M")]
    Male,
    #[display(fmt = "F")]
    Female,
}

impl FromStr for Gender {
    type Err = Error;

    // Only the first letter counts, so "male", "Female" and "f" all work.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('M') => Ok(Gender::Male),
            Some('F') => Ok(Gender::Female),
            _ => Err(Error::new(
                ErrorKind::GenderParse,
                "Gender must start with M or F.",
            )),
        }
    }
}

pub fn parse_birth_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), BIRTH_DATE_FORMAT).map_err(|_| {
        Error::new(
            ErrorKind::DateParse,
            "Birth date must be in MM/DD/YYYY format and a valid date.",
        )
    })
}

pub fn validate_first_name(raw: &str) -> Result<String> {
    let name = raw.trim();

    if name.chars().count() < 2 || !name.chars().all(char::is_alphabetic) {
        return Err(Error::new(
            ErrorKind::NameInvalid,
            "First name must be alphabetic and at least 2 characters.",
        ));
    }

    Ok(name.to_owned())
}

/// Adds whole years to `date`. A 29th of February lands on the 28th in
/// non-leap target years.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;

    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BirthRecord {
    name: String,
    birth_date: NaiveDate,
    gender: Gender,
}

impl BirthRecord {
    pub fn new(name: &str, birth_date: NaiveDate, gender: Gender, today: NaiveDate) -> Result<Self> {
        let name = validate_first_name(name)?;

        if birth_date >= today {
            return Err(Error::new(
                ErrorKind::BirthInFuture,
                "Birth date must be in the past.",
            ));
        }

        Ok(BirthRecord {
            name,
            birth_date,
            gender,
        })
    }

    /// The record used by `--debug`: a twenty year old man named "debug".
    pub fn debug(today: NaiveDate) -> Self {
        BirthRecord {
            name: "debug".to_owned(),
            birth_date: add_years(today, -20),
            gender: Gender::Male,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }
}
