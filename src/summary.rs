use crate::weeks::WeekMapper;

const DAYS_PER_YEAR: f64 = 365.2425;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub weeks_lived: u32,
    pub weeks_remaining: u32,
    pub percent_lived: f64,
    pub age_years: f64,
}

impl Summary {
    pub fn new(mapper: &WeekMapper, expectancy_weeks: u32) -> Self {
        let weeks_lived = mapper.weeks_lived();
        let weeks_remaining = expectancy_weeks.saturating_sub(weeks_lived);

        let percent_lived = if expectancy_weeks == 0 {
            0.0
        } else {
            (weeks_lived as f64 / expectancy_weeks as f64 * 100.0).min(100.0)
        };

        let days = mapper
            .today()
            .signed_duration_since(mapper.birth())
            .num_days()
            .max(0);

        Summary {
            weeks_lived,
            weeks_remaining,
            percent_lived,
            age_years: days as f64 / DAYS_PER_YEAR,
        }
    }

    pub fn lines(&self) -> [String; 4] {
        [
            format!("Weeks lived: {}", self.weeks_lived),
            format!("Weeks remaining: {}", self.weeks_remaining),
            format!("Percent of life lived: {:.1}%", self.percent_lived),
            format!("Age: {:.2} years", self.age_years),
        ]
    }
}
