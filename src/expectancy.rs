use serde::Deserialize;

use crate::birth::Gender;
use crate::error::*;
use crate::weeks::{GridPos, WEEKS_PER_ROW};

// CDC life expectancy summaries, circa 2023.
pub const CDC_MALE_YEARS: f64 = 75.8;
pub const CDC_FEMALE_YEARS: f64 = 81.1;

pub const MAX_YEARS: f64 = 200.0;

/// Expected lifespan in years, keyed by gender.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LifeExpectancy {
    pub male: f64,
    pub female: f64,
}

impl Default for LifeExpectancy {
    fn default() -> Self {
        LifeExpectancy {
            male: CDC_MALE_YEARS,
            female: CDC_FEMALE_YEARS,
        }
    }
}

impl LifeExpectancy {
    pub fn years(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }

    /// Rejects lifespans that are not finite or outside (0, `MAX_YEARS`].
    pub fn validate(&self) -> Result<()> {
        for (key, years) in [("male", self.male), ("female", self.female)].iter() {
            if !years.is_finite() || *years <= 0.0 || *years > MAX_YEARS {
                return Err(Error::new(
                    ErrorKind::Config,
                    &format!(
                        "life_expectancy.{} must be between 0 and {} years, got {}",
                        key, MAX_YEARS, years
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Expected lifespan counted in grid weeks.
    pub fn weeks(&self, gender: Gender) -> u32 {
        weeks_in_grid(self.years(gender))
    }
}

/// Whole years become rows, the fraction of a year becomes columns.
pub fn weeks_in_grid(years: f64) -> u32 {
    if !years.is_finite() || years <= 0.0 {
        return 0;
    }

    let rows = years.trunc();
    let cols = ((years - rows) * WEEKS_PER_ROW as f64).floor();

    // Float to int casts saturate, the sums must too.
    (rows as u32)
        .saturating_mul(WEEKS_PER_ROW)
        .saturating_add(cols as u32)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeExpectancyMarker {
    pub index: u32,
    pub pos: Option<GridPos>,
}

impl LifeExpectancyMarker {
    /// Marks the expected week of death, counted from the birth week cell.
    pub fn locate(expectancy: &LifeExpectancy, gender: Gender, birth_offset: u32) -> Self {
        let index = birth_offset.saturating_add(expectancy.weeks(gender));

        LifeExpectancyMarker {
            index,
            pos: GridPos::from_index(index as i64),
        }
    }
}
