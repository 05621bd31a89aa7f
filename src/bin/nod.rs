extern crate number_our_days as lib;

use chrono::{Local, NaiveDate};
use flexi_logger::{FileSpec, Logger};
use lib::birth::{parse_birth_date, BirthRecord, Gender};
use lib::calendar::LifeCalendar;
use lib::prompt::{Given, Prompter};
use lib::render::write_pdf;
use lib::weeks::{iso_week_start, StartMode};
use std::io;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "nod",
    author = "Number Our Days contributors",
    about = "Number Our Days - Renders a life calendar of weeks as PDF."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(long = "name", help = "first name, skips the question")]
    pub name: Option<String>,

    #[structopt(
        long = "birth-date",
        help = "birth date as MM/DD/YYYY, skips the question",
        parse(try_from_str = parse_birth_date)
    )]
    pub birth_date: Option<NaiveDate>,

    #[structopt(long = "gender", help = "M or F, skips the question")]
    pub gender: Option<Gender>,

    #[structopt(
        long = "start-mode",
        help = "'birth' to start at the birth date, 'jan' to start in January of the birth year"
    )]
    pub start_mode: Option<StartMode>,

    #[structopt(
        long = "today",
        help = "reference date as MM/DD/YYYY instead of the current day",
        parse(try_from_str = parse_birth_date)
    )]
    pub today: Option<NaiveDate>,

    #[structopt(
        short = "o",
        long = "output",
        help = "path of the PDF to write",
        parse(from_os_str)
    )]
    pub output: Option<PathBuf>,

    #[structopt(long = "debug", help = "skip the questions and use a 20 year old man")]
    pub debug: bool,
}

fn print_debug_info(record: &BirthRecord, today: NaiveDate) {
    let birth = record.birth_date();
    let days = today.signed_duration_since(birth).num_days();

    println!(
        "DEBUG MODE: Using first_name={}, birth_date={}, gender={}",
        record.name(),
        birth,
        record.gender()
    );
    println!("Today: {}", today);
    println!("Birth week start: {}", iso_week_start(birth));
    println!("Current week start: {}", iso_week_start(today));
    println!("Days lived: {}, Weeks lived: {}", days, days / 7);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    std::panic::set_hook(Box::new(|info| {
        println!("Number Our Days ran into a fatal error!");
        println!("Consider filing an issue with a log file and the backtrace below.");

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let (record, mode) = if args.debug {
        let record = BirthRecord::debug(today);
        print_debug_info(&record, today);
        (record, args.start_mode.or(config.start_mode).unwrap_or_default())
    } else {
        let given = Given {
            name: args.name,
            birth_date: args.birth_date,
            gender: args.gender,
            start_mode: args.start_mode.or(config.start_mode),
        };

        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout(), config.prompt_attempts);

        match prompter.collect(given, today) {
            Ok(answers) => answers,
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        }
    };

    let calendar = LifeCalendar::new(record, today, mode, &config.life_expectancy);
    let path = args
        .output
        .unwrap_or_else(|| calendar.output_path(&config.output_dir));

    write_pdf(&path, &calendar)?;
    println!("Created {}", path.display());

    Ok(())
}
