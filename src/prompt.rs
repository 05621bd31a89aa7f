use chrono::NaiveDate;
use std::io::{BufRead, Write};

use crate::birth::{parse_birth_date, validate_first_name, BirthRecord, Gender};
use crate::error::*;
use crate::weeks::StartMode;

/// Answers that were already given on the command line.
#[derive(Clone, Debug, Default)]
pub struct Given {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub start_mode: Option<StartMode>,
}

/// Asks questions on `output` and reads answers line by line from `input`.
/// Invalid answers are reported and asked again, at most `attempts` times.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    attempts: u32,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, attempts: u32) -> Self {
        Prompter {
            input,
            output,
            attempts: attempts.max(1),
        }
    }

    fn read_line(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }

    pub fn ask<T, F>(&mut self, question: &str, parse: F) -> Result<T>
    where
        F: Fn(&str) -> Result<T>,
    {
        for _ in 0..self.attempts {
            let line = match self.read_line(question)? {
                Some(line) => line,
                None => {
                    return Err(Error::new(
                        ErrorKind::InputExhausted,
                        "input ended before all questions were answered",
                    ))
                }
            };

            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_user_input() => {
                    log::debug!("Rejected answer '{}': {}", line, err);
                    writeln!(self.output, "Error: {}", err)?;
                }
                Err(err) => return Err(err),
            }
        }

        Err(Error::new(
            ErrorKind::InputExhausted,
            &format!("giving up after {} invalid answers", self.attempts),
        ))
    }

    pub fn first_name(&mut self) -> Result<String> {
        self.ask("Enter your first name: ", validate_first_name)
    }

    pub fn birth_date(&mut self, today: NaiveDate) -> Result<NaiveDate> {
        self.ask("Enter your birth date (MM/DD/YYYY): ", |raw| {
            let date = parse_birth_date(raw)?;
            if date >= today {
                return Err(Error::new(
                    ErrorKind::BirthInFuture,
                    "Birth date must be in the past.",
                ));
            }
            Ok(date)
        })
    }

    pub fn gender(&mut self) -> Result<Gender> {
        self.ask("Are you male or female? (M/F): ", |raw| raw.parse())
    }

    pub fn start_mode(&mut self) -> Result<StartMode> {
        self.ask(
            "Start the calendar at birth or in January of your birth year? (birth/jan) [birth]: ",
            |raw| raw.parse(),
        )
    }

    /// Asks for everything not already in `given`. Given values are checked
    /// but never asked again.
    pub fn collect(&mut self, given: Given, today: NaiveDate) -> Result<(BirthRecord, StartMode)> {
        let name = match given.name {
            Some(name) => validate_first_name(&name)?,
            None => self.first_name()?,
        };
        let birth_date = match given.birth_date {
            Some(date) => date,
            None => self.birth_date(today)?,
        };
        let gender = match given.gender {
            Some(gender) => gender,
            None => self.gender()?,
        };
        let start_mode = match given.start_mode {
            Some(mode) => mode,
            None => self.start_mode()?,
        };

        Ok((BirthRecord::new(&name, birth_date, gender, today)?, start_mode))
    }
}
