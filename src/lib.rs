pub mod birth;
pub mod calendar;
pub mod config;
pub mod error;
pub mod expectancy;
pub mod prompt;
pub mod render;
pub mod summary;
pub mod weeks;
