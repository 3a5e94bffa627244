use crate::config::{Config, DEFAULT_CONFIG_FILE, parse_config};
use crate::loaders::Loader;
use crate::model::{Category, Residence, StudentId};
use crate::stats::{GroupBy, StudentFilter};
use clap::{ArgAction, Args, Parser, Subcommand};
use eyre::{Error, eyre};
use std::path::Path;
use tracing::{Level, debug, info};

mod checks;
mod config;
mod display;
mod loaders;
mod model;
mod ranking;
mod stats;

const DEFAULT_TOPPERS: usize = 10;
const DEFAULT_AT_RISK_THRESHOLD: f64 = 5.5;

#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// Use FILE instead of rcohort.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,
    /// Set verbosity level
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank a student against the whole roster and its cohorts
    Rank { id: u32 },
    /// List students matching the given criteria
    List(FilterArgs),
    /// Show roster-wide statistics
    Summary,
    /// Show statistics per category or residence
    Groups {
        #[arg(long, value_enum, default_value_t)]
        by: GroupBy,
    },
    /// Show the students with the best GPA
    Toppers {
        #[arg(short = 'n', long)]
        count: Option<usize>,
        #[arg(long, value_enum, ignore_case = true)]
        category: Option<Category>,
    },
    /// Show students whose GPA is below a threshold
    AtRisk {
        #[arg(short, long)]
        threshold: Option<f64>,
    },
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long, value_enum, ignore_case = true)]
    category: Option<Category>,
    #[arg(long, value_enum, ignore_case = true)]
    residence: Option<Residence>,
    #[arg(long)]
    semester: Option<u32>,
    #[arg(long)]
    min_gpa: Option<f64>,
    #[arg(long)]
    max_gpa: Option<f64>,
}

impl FilterArgs {
    fn into_filter(self) -> Result<StudentFilter, Error> {
        let filter = StudentFilter {
            category: self.category,
            residence: self.residence,
            semester: self.semester,
            min_gpa: self.min_gpa,
            max_gpa: self.max_gpa,
        };
        checks::check_filter(&filter)?;
        Ok(filter)
    }
}

fn load_config(file_name: Option<&str>) -> Result<Config, Error> {
    match file_name {
        Some(file_name) => Config::load(file_name),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Config::load(DEFAULT_CONFIG_FILE),
        None => {
            debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Config::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    color_eyre::install()?;
    let options = Options::parse();
    let level = match options.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
    let config = load_config(options.config.as_deref())?;
    let mut loader = Loader::from_config(&config).await?;
    match options.command {
        Command::Rank { id } => {
            let id = StudentId(id);
            let student = loader
                .load_student(id)
                .await?
                .ok_or_else(|| eyre!("student with id {} not found", id))?;
            student.validate()?;
            let roster = loader.load_students().await?;
            checks::check_roster(&roster)?;
            info!(student = %student, roster = roster.len(), "ranking student");
            let result = ranking::compute_ranking(&student, &roster);
            display::display_ranking(&student, &result);
        }
        Command::List(args) => {
            let filter = args.into_filter()?;
            let roster = loader.load_students().await?;
            checks::check_roster(&roster)?;
            display::display_students(&stats::filter_students(&roster, &filter));
        }
        Command::Summary => {
            let roster = loader.load_students().await?;
            checks::check_roster(&roster)?;
            display::display_summary(stats::summary(&roster).as_ref());
        }
        Command::Groups { by } => {
            let roster = loader.load_students().await?;
            checks::check_roster(&roster)?;
            display::display_groups(by, &stats::group_stats(&roster, by));
        }
        Command::Toppers { count, category } => {
            let count = match count {
                Some(count) => count,
                None => parse_config(&config, "analytics", "toppers", DEFAULT_TOPPERS)?,
            };
            checks::check_toppers_count(count)?;
            let roster = loader.load_students().await?;
            checks::check_roster(&roster)?;
            display::display_toppers(&stats::toppers(&roster, count, category));
        }
        Command::AtRisk { threshold } => {
            let threshold = match threshold {
                Some(threshold) => threshold,
                None => parse_config(
                    &config,
                    "analytics",
                    "at_risk_threshold",
                    DEFAULT_AT_RISK_THRESHOLD,
                )?,
            };
            checks::check_gpa_bound("at-risk threshold", threshold)?;
            let roster = loader.load_students().await?;
            checks::check_roster(&roster)?;
            display::display_at_risk(threshold, &stats::at_risk(&roster, threshold));
        }
    }
    Ok(())
}
