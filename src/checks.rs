use crate::model::{MAX_GPA, Student};
use crate::stats::StudentFilter;
use eyre::{Error, WrapErr, ensure};
use std::collections::HashMap;
use tracing::warn;

/// Reject records which violate the student constraints, and warn about
/// ids shared by several records.
pub fn check_roster(students: &[Student]) -> Result<(), Error> {
    for s in students {
        s.validate().wrap_err("invalid student record")?;
    }
    let mut seen = HashMap::new();
    for s in students {
        if let Some(other) = seen.insert(s.id, &s.name) {
            warn!(id = %s.id, first = %other, second = %s.name, "duplicate student id");
        }
    }
    Ok(())
}

pub const MAX_TOPPERS: usize = 100;

/// Ensure a GPA given on the command line or in the configuration is in [0, MAX_GPA].
pub fn check_gpa_bound(what: &str, gpa: f64) -> Result<(), Error> {
    ensure!(
        (0.0..=MAX_GPA).contains(&gpa),
        "{} {} outside of [0, {}]",
        what,
        gpa,
        MAX_GPA
    );
    Ok(())
}

pub fn check_filter(filter: &StudentFilter) -> Result<(), Error> {
    if let Some(gpa) = filter.min_gpa {
        check_gpa_bound("minimum GPA", gpa)?;
    }
    if let Some(gpa) = filter.max_gpa {
        check_gpa_bound("maximum GPA", gpa)?;
    }
    Ok(())
}

pub fn check_toppers_count(count: usize) -> Result<(), Error> {
    ensure!(
        (1..=MAX_TOPPERS).contains(&count),
        "number of toppers must be between 1 and {}",
        MAX_TOPPERS
    );
    Ok(())
}
