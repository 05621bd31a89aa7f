use chrono::{Datelike, Duration, NaiveDate, Weekday};
use derive_more::Display;
use itertools::iproduct;
use serde::Deserialize;
use std::str::FromStr;

use crate::error::*;

pub const WEEKS_PER_ROW: u32 = 52;
pub const ROWS: u32 = 90;
pub const TOTAL_WEEKS: u32 = ROWS * WEEKS_PER_ROW;

/// Which week the first cell of the grid stands for.
#[derive(Clone, Copy, Debug, Display, Deserialize, PartialEq, Eq)]
pub enum StartMode {
    /// Cell (0, 0) is the week starting on the birth date.
    #[display(fmt = "birth")]
    #[serde(rename = "birth", alias = "start-at-birth")]
    AtBirth,
    /// Cell (0, 0) is ISO week 1 of the birth year. Weeks of that year
    /// before the birth week are left blank.
    #[display(fmt = "jan")]
    #[serde(rename = "jan", alias = "start-in-jan")]
    InJanuary,
}

impl Default for StartMode {
    fn default() -> Self {
        StartMode::AtBirth
    }
}

impl FromStr for StartMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "birth" | "start-at-birth" | "b" => Ok(StartMode::AtBirth),
            "jan" | "january" | "start-in-jan" | "j" => Ok(StartMode::InJanuary),
            other => Err(Error::new(
                ErrorKind::StartModeParse,
                &format!("'{}' is neither 'birth' nor 'jan'", other),
            )),
        }
    }
}

impl StartMode {
    /// Label used in output file names.
    pub fn label(&self) -> &'static str {
        match self {
            StartMode::AtBirth => "birth",
            StartMode::InJanuary => "jan",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Filled,
    Current,
    Future,
    Invisible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GridPos {
    pub row: u32,
    pub col: u32,
}

impl GridPos {
    pub fn new(row: u32, col: u32) -> Self {
        GridPos { row, col }
    }

    /// `None` for indices outside of the grid.
    pub fn from_index(index: i64) -> Option<Self> {
        if index < 0 || index >= TOTAL_WEEKS as i64 {
            return None;
        }

        let index = index as u32;
        Some(GridPos {
            row: index / WEEKS_PER_ROW,
            col: index % WEEKS_PER_ROW,
        })
    }

    pub fn index(&self) -> u32 {
        self.row * WEEKS_PER_ROW + self.col
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekCell {
    pub pos: GridPos,
    pub state: CellState,
}

/// Monday of the ISO week containing `date`.
pub fn iso_week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Monday of ISO week 1 of `year`.
pub fn iso_year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(year, 1, Weekday::Mon)
}

/// Maps a birth date and a reference day onto the week grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekMapper {
    birth: NaiveDate,
    today: NaiveDate,
    mode: StartMode,
    anchor: NaiveDate,
    birth_offset: i64,
    week_index: i64,
}

impl WeekMapper {
    pub fn new(birth: NaiveDate, today: NaiveDate, mode: StartMode) -> Self {
        let (anchor, birth_offset, week_index) = match mode {
            StartMode::AtBirth => {
                let elapsed = today.signed_duration_since(birth).num_days();
                (birth, 0, elapsed.div_euclid(7))
            }
            StartMode::InJanuary => {
                let birth_week = iso_week_start(birth);
                // Births in the last ISO week of the previous year would get a
                // negative offset, so such a week becomes the anchor itself.
                let anchor = iso_year_start(birth.year())
                    .map_or(birth_week, |week_one| week_one.min(birth_week));

                let birth_offset = birth_week.signed_duration_since(anchor).num_days() / 7;
                let week_index = iso_week_start(today)
                    .signed_duration_since(anchor)
                    .num_days()
                    .div_euclid(7);

                (anchor, birth_offset, week_index)
            }
        };

        log::debug!(
            "mapped birth {} to today {} ({}): anchor {}, birth offset {}, week index {}",
            birth,
            today,
            mode,
            anchor,
            birth_offset,
            week_index
        );

        WeekMapper {
            birth,
            today,
            mode,
            anchor,
            birth_offset,
            week_index,
        }
    }

    pub fn birth(&self) -> NaiveDate {
        self.birth
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn mode(&self) -> StartMode {
        self.mode
    }

    /// The date cell (0, 0) starts on.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn is_born(&self) -> bool {
        self.today >= self.birth
    }

    /// Weeks elapsed between the anchor and today. Negative before the anchor.
    pub fn week_index(&self) -> i64 {
        self.week_index
    }

    /// Index of the cell holding the birth week.
    pub fn birth_offset(&self) -> u32 {
        self.birth_offset as u32
    }

    /// Cell of the current week, if today is born and on the grid.
    pub fn current(&self) -> Option<GridPos> {
        if self.is_born() {
            GridPos::from_index(self.week_index)
        } else {
            None
        }
    }

    pub fn weeks_lived(&self) -> u32 {
        if self.is_born() {
            (self.week_index - self.birth_offset).max(0) as u32
        } else {
            0
        }
    }

    pub fn state_of(&self, index: u32) -> CellState {
        let index = index as i64;

        if self.mode == StartMode::InJanuary && index < self.birth_offset {
            return CellState::Invisible;
        }

        if !self.is_born() {
            return CellState::Future;
        }

        match index.cmp(&self.week_index) {
            std::cmp::Ordering::Less => CellState::Filled,
            std::cmp::Ordering::Equal => CellState::Current,
            std::cmp::Ordering::Greater => CellState::Future,
        }
    }

    pub fn cell_state(&self, row: u32, col: u32) -> CellState {
        self.state_of(GridPos::new(row, col).index())
    }

    /// All cells of the grid, row by row.
    pub fn cells(&self) -> impl Iterator<Item = WeekCell> + '_ {
        iproduct!(0..ROWS, 0..WEEKS_PER_ROW).map(move |(row, col)| WeekCell {
            pos: GridPos::new(row, col),
            state: self.cell_state(row, col),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn count(mapper: &WeekMapper, state: CellState) -> usize {
        mapper.cells().filter(|c| c.state == state).count()
    }

    #[test]
    fn first_week_after_birth() {
        let mapper = WeekMapper::new(date(1990, 6, 15), date(1990, 6, 20), StartMode::AtBirth);

        assert_eq!(mapper.week_index(), 0);
        assert_eq!(mapper.current(), Some(GridPos::new(0, 0)));
        assert_eq!(mapper.cell_state(0, 0), CellState::Current);
        assert_eq!(count(&mapper, CellState::Future), TOTAL_WEEKS as usize - 1);
        assert_eq!(count(&mapper, CellState::Filled), 0);
    }

    #[test]
    fn thirtieth_birthday() {
        let mapper = WeekMapper::new(date(1990, 6, 15), date(2020, 6, 15), StartMode::AtBirth);

        assert_eq!(mapper.week_index(), 1565);
        assert_eq!(mapper.current(), Some(GridPos::new(30, 5)));
        assert_eq!(mapper.weeks_lived(), 1565);
        assert_eq!(count(&mapper, CellState::Filled), 1565);
        assert_eq!(count(&mapper, CellState::Current), 1);
    }

    #[test]
    fn filled_iff_before_week_index() {
        let birth = date(1984, 2, 29);

        for days in (0..40_000).step_by(97) {
            let today = birth + Duration::days(days);
            let mapper = WeekMapper::new(birth, today, StartMode::AtBirth);
            let expected = days / 7;
            assert_eq!(mapper.week_index(), expected);

            for cell in mapper.cells().step_by(13) {
                let idx = cell.pos.index() as i64;
                assert_eq!(cell.state == CellState::Filled, idx < expected, "{:?}", cell);
                assert_eq!(cell.state == CellState::Current, idx == expected, "{:?}", cell);
            }
        }
    }

    #[test]
    fn nothing_lived_before_birth() {
        for mode in [StartMode::AtBirth, StartMode::InJanuary].iter() {
            let mapper = WeekMapper::new(date(1990, 6, 15), date(1990, 6, 12), *mode);

            assert!(!mapper.is_born());
            assert_eq!(mapper.current(), None);
            assert_eq!(mapper.weeks_lived(), 0);
            assert_eq!(count(&mapper, CellState::Filled), 0);
            assert_eq!(count(&mapper, CellState::Current), 0);
        }
    }

    #[test]
    fn beyond_the_grid() {
        let mapper = WeekMapper::new(date(1900, 1, 1), date(2000, 1, 1), StartMode::AtBirth);

        assert_eq!(mapper.current(), None);
        assert_eq!(count(&mapper, CellState::Current), 0);
        assert_eq!(count(&mapper, CellState::Filled), TOTAL_WEEKS as usize);
    }

    #[test]
    fn january_start_hides_weeks_before_birth() {
        // 1990-01-01 is a Monday and starts ISO week 1, 1990-06-15 is a Friday.
        let mapper = WeekMapper::new(date(1990, 6, 15), date(1990, 6, 20), StartMode::InJanuary);

        assert_eq!(mapper.anchor(), date(1990, 1, 1));
        assert_eq!(mapper.birth_offset(), 23);
        assert_eq!(mapper.week_index(), 24);

        for col in 0..23 {
            assert_eq!(mapper.cell_state(0, col), CellState::Invisible);
        }
        assert_eq!(mapper.cell_state(0, 23), CellState::Filled);
        assert_eq!(mapper.cell_state(0, 24), CellState::Current);
        assert_eq!(mapper.cell_state(0, 25), CellState::Future);
        assert_eq!(mapper.weeks_lived(), 1);
    }

    #[test]
    fn january_start_in_birth_week() {
        let mapper = WeekMapper::new(date(1990, 6, 15), date(1990, 6, 17), StartMode::InJanuary);

        assert_eq!(mapper.current(), Some(GridPos::new(0, 23)));
        assert_eq!(mapper.weeks_lived(), 0);
        assert_eq!(count(&mapper, CellState::Filled), 0);
        assert_eq!(count(&mapper, CellState::Invisible), 23);
    }

    #[test]
    fn birth_week_is_first_visible_cell_of_its_row() {
        let today = date(2026, 10, 19);
        let births = [
            date(1990, 6, 15),
            date(2021, 1, 1),
            date(2024, 12, 30),
            date(1976, 3, 8),
            date(2015, 12, 31),
        ];

        for birth in births.iter() {
            let mapper = WeekMapper::new(*birth, today, StartMode::InJanuary);
            let pos = GridPos::from_index(mapper.birth_offset() as i64).unwrap();

            assert_ne!(mapper.cell_state(pos.row, pos.col), CellState::Invisible);
            for col in 0..pos.col {
                assert_eq!(mapper.cell_state(pos.row, col), CellState::Invisible);
            }
            for col in pos.col..WEEKS_PER_ROW {
                assert_ne!(mapper.cell_state(pos.row, col), CellState::Invisible);
            }
        }
    }

    #[test]
    fn birth_in_previous_iso_year() {
        // 2021-01-01 belongs to ISO week 53 of 2020.
        let mapper = WeekMapper::new(date(2021, 1, 1), date(2021, 1, 5), StartMode::InJanuary);

        assert_eq!(mapper.anchor(), date(2020, 12, 28));
        assert_eq!(mapper.birth_offset(), 0);
        assert_eq!(mapper.current(), Some(GridPos::new(0, 1)));
    }

    #[test]
    fn birth_in_next_iso_year() {
        // 2024-12-30 already belongs to ISO week 1 of 2025.
        let mapper = WeekMapper::new(date(2024, 12, 30), date(2025, 1, 1), StartMode::InJanuary);

        assert_eq!(mapper.anchor(), date(2024, 1, 1));
        assert_eq!(mapper.birth_offset(), 52);
        assert_eq!(mapper.current(), Some(GridPos::new(1, 0)));
        assert!((0..WEEKS_PER_ROW).all(|col| mapper.cell_state(0, col) == CellState::Invisible));
    }

    #[test]
    fn start_mode_names() {
        assert_eq!("jan".parse::<StartMode>().unwrap(), StartMode::InJanuary);
        assert_eq!("Start-At-Birth".parse::<StartMode>().unwrap(), StartMode::AtBirth);
        assert_eq!("".parse::<StartMode>().unwrap(), StartMode::AtBirth);
        assert!("december".parse::<StartMode>().is_err());
        assert_eq!(StartMode::InJanuary.label(), "jan");
        assert_eq!(StartMode::AtBirth.to_string(), "birth");
    }

    #[test]
    fn grid_positions() {
        assert_eq!(GridPos::from_index(0), Some(GridPos::new(0, 0)));
        assert_eq!(GridPos::from_index(53), Some(GridPos::new(1, 1)));
        assert_eq!(GridPos::from_index(4679), Some(GridPos::new(89, 51)));
        assert_eq!(GridPos::from_index(4680), None);
        assert_eq!(GridPos::from_index(-1), None);
        assert_eq!(GridPos::new(30, 5).index(), 1565);
    }
}
