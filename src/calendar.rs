use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::birth::BirthRecord;
use crate::expectancy::{LifeExpectancy, LifeExpectancyMarker};
use crate::summary::Summary;
use crate::weeks::{StartMode, WeekMapper};

/// Everything needed to draw one life calendar.
#[derive(Clone, Debug)]
pub struct LifeCalendar {
    record: BirthRecord,
    mapper: WeekMapper,
    marker: LifeExpectancyMarker,
    expectancy_years: f64,
    summary: Summary,
}

impl LifeCalendar {
    pub fn new(
        record: BirthRecord,
        today: NaiveDate,
        mode: StartMode,
        expectancy: &LifeExpectancy,
    ) -> Self {
        let mapper = WeekMapper::new(record.birth_date(), today, mode);
        let marker =
            LifeExpectancyMarker::locate(expectancy, record.gender(), mapper.birth_offset());
        let summary = Summary::new(&mapper, expectancy.weeks(record.gender()));

        LifeCalendar {
            expectancy_years: expectancy.years(record.gender()),
            record,
            mapper,
            marker,
            summary,
        }
    }

    pub fn record(&self) -> &BirthRecord {
        &self.record
    }

    pub fn mapper(&self) -> &WeekMapper {
        &self.mapper
    }

    pub fn marker(&self) -> &LifeExpectancyMarker {
        &self.marker
    }

    pub fn expectancy_years(&self) -> f64 {
        self.expectancy_years
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn file_name(&self) -> String {
        output_file_name(self.record.name(), self.mapper.mode())
    }

    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

pub fn output_file_name(first_name: &str, mode: StartMode) -> String {
    format!(
        "number_our_days_{}_{}.pdf",
        first_name.to_lowercase(),
        mode.label()
    )
}
