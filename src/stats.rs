use crate::model::{Category, Residence, Student};
use crate::ranking::{PerformanceLevel, average};
use clap::ValueEnum;
use std::fmt;

/// Criteria used to narrow a roster. Absent criteria match everyone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StudentFilter {
    pub category: Option<Category>,
    pub residence: Option<Residence>,
    pub semester: Option<u32>,
    pub min_gpa: Option<f64>,
    pub max_gpa: Option<f64>,
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        self.category.is_none_or(|c| student.category == c)
            && self.residence.is_none_or(|r| student.residence == r)
            && self.semester.is_none_or(|n| student.semester == n)
            && self.min_gpa.is_none_or(|g| student.gpa >= g)
            && self.max_gpa.is_none_or(|g| student.gpa <= g)
    }
}

pub fn filter_students<'a>(roster: &'a [Student], filter: &StudentFilter) -> Vec<&'a Student> {
    roster.iter().filter(|s| filter.matches(s)).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct GpaStats {
    pub total_students: usize,
    pub average_gpa: f64,
    pub highest_gpa: f64,
    pub lowest_gpa: f64,
}

impl GpaStats {
    /// Return `None` for an empty set of students.
    fn of(students: &[&Student]) -> Option<GpaStats> {
        if students.is_empty() {
            return None;
        }
        let gpas = students.iter().map(|s| s.gpa);
        Some(GpaStats {
            total_students: students.len(),
            average_gpa: average(students),
            highest_gpa: gpas.clone().fold(f64::NEG_INFINITY, f64::max),
            lowest_gpa: gpas.fold(f64::INFINITY, f64::min),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub stats: GpaStats,
    /// Number of students in each level, in `PerformanceLevel::ALL` order.
    pub levels: Vec<(PerformanceLevel, usize)>,
}

pub fn summary(roster: &[Student]) -> Option<Summary> {
    let all = roster.iter().collect::<Vec<_>>();
    let stats = GpaStats::of(&all)?;
    let levels = PerformanceLevel::ALL
        .iter()
        .map(|&level| {
            let n = roster
                .iter()
                .filter(|s| PerformanceLevel::from_gpa(s.gpa) == level)
                .count();
            (level, n)
        })
        .collect();
    Some(Summary { stats, levels })
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum GroupBy {
    #[default]
    Category,
    Residence,
}

impl GroupBy {
    fn key_of(self, student: &Student) -> &'static str {
        match self {
            GroupBy::Category => student.category.label(),
            GroupBy::Residence => student.residence.label(),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Category => f.write_str("category"),
            GroupBy::Residence => f.write_str("residence"),
        }
    }
}

/// Statistics per group, groups being listed in order of first appearance.
pub fn group_stats(roster: &[Student], by: GroupBy) -> Vec<(&'static str, GpaStats)> {
    let mut groups: Vec<(&'static str, Vec<&Student>)> = Vec::new();
    for student in roster {
        let key = by.key_of(student);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(student),
            None => groups.push((key, vec![student])),
        }
    }
    groups
        .into_iter()
        .filter_map(|(key, members)| GpaStats::of(&members).map(|stats| (key, stats)))
        .collect()
}

/// Best `count` students by decreasing GPA. Equal GPAs keep roster order.
pub fn toppers<'a>(
    roster: &'a [Student],
    count: usize,
    category: Option<Category>,
) -> Vec<&'a Student> {
    let mut pool = roster
        .iter()
        .filter(|s| category.is_none_or(|c| s.category == c))
        .collect::<Vec<_>>();
    pool.sort_by(|a, b| b.gpa.total_cmp(&a.gpa));
    pool.truncate(count);
    pool
}

/// Students strictly below `threshold`, weakest first.
pub fn at_risk(roster: &[Student], threshold: f64) -> Vec<&Student> {
    let mut students = roster
        .iter()
        .filter(|s| s.gpa < threshold)
        .collect::<Vec<_>>();
    students.sort_by(|a, b| a.gpa.total_cmp(&b.gpa));
    students
}
