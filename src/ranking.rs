use crate::model::Student;
use std::fmt;
use tracing::{debug, instrument};

/// Qualitative bucket derived from a GPA.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Average,
    BelowAverage,
}

impl PerformanceLevel {
    pub const ALL: [PerformanceLevel; 4] = [
        PerformanceLevel::Excellent,
        PerformanceLevel::Good,
        PerformanceLevel::Average,
        PerformanceLevel::BelowAverage,
    ];

    /// Thresholds are checked from the highest down, first match wins.
    pub fn from_gpa(gpa: f64) -> PerformanceLevel {
        match gpa {
            g if g >= 9.0 => PerformanceLevel::Excellent,
            g if g >= 7.0 => PerformanceLevel::Good,
            g if g >= 5.0 => PerformanceLevel::Average,
            _ => PerformanceLevel::BelowAverage,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Average => "Average",
            PerformanceLevel::BelowAverage => "Below Average",
        }
    }

    /// GPA range covered by this level, as shown in summaries.
    pub fn range(self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "9+",
            PerformanceLevel::Good => "7-8.9",
            PerformanceLevel::Average => "5-6.9",
            PerformanceLevel::BelowAverage => "<5",
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position of a student within the roster and its cohorts.
#[derive(Clone, Debug, PartialEq)]
pub struct RankingResult {
    pub overall_rank: usize,
    pub overall_count: usize,
    pub category_rank: usize,
    pub category_count: usize,
    pub avg_all: f64,
    pub avg_category: f64,
    pub avg_residence: f64,
    pub avg_semester: f64,
    pub performance_level: PerformanceLevel,
    pub difference_from_overall_avg: f64,
}

/// Rank `target` against `roster`. The roster may or may not contain the
/// target itself. An empty roster gives zero counts, ranks and averages.
#[instrument(skip_all, fields(student = %target))]
pub fn compute_ranking(target: &Student, roster: &[Student]) -> RankingResult {
    let all = roster.iter().collect::<Vec<_>>();
    let same_category = cohort(roster, |s| s.category == target.category);
    let same_residence = cohort(roster, |s| s.residence == target.residence);
    let same_semester = cohort(roster, |s| s.semester == target.semester);
    let avg_all = average(&all);
    let result = RankingResult {
        overall_rank: rank_of(target.gpa, &all),
        overall_count: all.len(),
        category_rank: rank_of(target.gpa, &same_category),
        category_count: same_category.len(),
        avg_all,
        avg_category: average(&same_category),
        avg_residence: average(&same_residence),
        avg_semester: average(&same_semester),
        performance_level: PerformanceLevel::from_gpa(target.gpa),
        difference_from_overall_avg: target.gpa - avg_all,
    };
    debug!(
        overall_rank = result.overall_rank,
        overall_count = result.overall_count,
        category_rank = result.category_rank,
        category_count = result.category_count,
        "ranking computed"
    );
    result
}

fn cohort<F>(roster: &[Student], mut same: F) -> Vec<&Student>
where
    F: FnMut(&Student) -> bool,
{
    roster.iter().filter(|&s| same(s)).collect()
}

/// 1-based position of the first occurrence of `gpa` among the cohort's GPAs
/// sorted in descending order, so every tied student shares the best rank.
/// Returns 0 if no member of the cohort has this GPA.
#[allow(clippy::float_cmp)]
fn rank_of(gpa: f64, cohort: &[&Student]) -> usize {
    let mut gpas = cohort.iter().map(|s| s.gpa).collect::<Vec<_>>();
    gpas.sort_by(|a, b| b.total_cmp(a));
    gpas.iter().position(|&g| g == gpa).map_or(0, |p| p + 1)
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn average(cohort: &[&Student]) -> f64 {
    if cohort.is_empty() {
        return 0.0;
    }
    cohort.iter().map(|s| s.gpa).sum::<f64>() / cohort.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Residence, StudentId};

    fn student(id: u32, category: Category, residence: Residence, gpa: f64, semester: u32) -> Student {
        Student::new(
            StudentId(id),
            format!("student {}", id),
            category,
            residence,
            gpa,
            semester,
        )
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_example_roster() {
        let roster = vec![
            student(1, Category::General, Residence::Hosteller, 9.5, 2),
            student(2, Category::Sc, Residence::Dayscholar, 9.5, 4),
            student(3, Category::General, Residence::Dayscholar, 7.0, 2),
        ];
        let r = compute_ranking(&roster[0], &roster);
        assert_eq!(r.overall_rank, 1);
        assert_eq!(r.overall_count, 3);
        assert_eq!(r.category_rank, 1);
        assert_eq!(r.category_count, 2);
        assert_eq!(format!("{:.2}", r.avg_all), "8.67");
        assert!(close(r.avg_category, 8.25));
        assert!(close(r.avg_residence, 9.5));
        assert!(close(r.avg_semester, 8.25));
        assert_eq!(r.performance_level, PerformanceLevel::Excellent);
        assert!(r.difference_from_overall_avg > 0.0);
    }

    #[test]
    fn test_ties_share_best_rank() {
        let roster = vec![
            student(1, Category::St, Residence::Hosteller, 8.0, 1),
            student(2, Category::St, Residence::Hosteller, 6.5, 1),
            student(3, Category::St, Residence::Hosteller, 8.0, 1),
            student(4, Category::St, Residence::Hosteller, 6.5, 1),
            student(5, Category::St, Residence::Hosteller, 5.0, 1),
        ];
        assert_eq!(compute_ranking(&roster[0], &roster).overall_rank, 1);
        assert_eq!(compute_ranking(&roster[2], &roster).overall_rank, 1);
        assert_eq!(compute_ranking(&roster[1], &roster).overall_rank, 3);
        assert_eq!(compute_ranking(&roster[3], &roster).overall_rank, 3);
        assert_eq!(compute_ranking(&roster[4], &roster).overall_rank, 5);
    }

    #[test]
    fn test_below_average_difference() {
        let roster = vec![
            student(1, Category::General, Residence::Hosteller, 6.0, 1),
            student(2, Category::General, Residence::Hosteller, 8.0, 1),
        ];
        let r = compute_ranking(&roster[0], &roster);
        assert!(close(r.avg_all, 7.0));
        assert!(close(r.difference_from_overall_avg, -1.0));
        assert_eq!(r.performance_level, PerformanceLevel::Average);
        assert_eq!(r.overall_rank, 2);
    }

    #[test]
    fn test_empty_roster() {
        let target = student(1, Category::Sc, Residence::Dayscholar, 4.0, 6);
        let r = compute_ranking(&target, &[]);
        assert_eq!(r.overall_count, 0);
        assert_eq!(r.category_count, 0);
        assert_eq!(r.overall_rank, 0);
        assert_eq!(r.category_rank, 0);
        assert_eq!(r.avg_all, 0.0);
        assert_eq!(r.avg_category, 0.0);
        assert_eq!(r.avg_residence, 0.0);
        assert_eq!(r.avg_semester, 0.0);
        assert_eq!(r.performance_level, PerformanceLevel::BelowAverage);
        assert!(close(r.difference_from_overall_avg, 4.0));
    }

    #[test]
    fn test_single_category_averages_match() {
        let roster = vec![
            student(1, Category::St, Residence::Hosteller, 3.0, 1),
            student(2, Category::St, Residence::Dayscholar, 9.1, 2),
            student(3, Category::St, Residence::Hosteller, 7.4, 3),
        ];
        let r = compute_ranking(&roster[2], &roster);
        assert_eq!(r.avg_all, r.avg_category);
        assert_eq!(r.overall_rank, r.category_rank);
        assert_eq!(r.overall_count, r.category_count);
    }

    #[test]
    fn test_rank_within_bounds() {
        let gpas = [4.2, 9.9, 7.0, 7.0, 0.0, 10.0, 5.5, 9.9];
        let roster = gpas
            .iter()
            .enumerate()
            .map(|(i, &g)| student(i as u32, Category::General, Residence::Hosteller, g, 1))
            .collect::<Vec<_>>();
        for target in &roster {
            let r = compute_ranking(target, &roster);
            let higher = roster.iter().filter(|s| s.gpa > target.gpa).count();
            assert!((1..=roster.len()).contains(&r.overall_rank));
            assert_eq!(r.overall_rank, higher + 1);
        }
    }

    #[test]
    fn test_target_outside_roster() {
        let roster = vec![student(1, Category::General, Residence::Hosteller, 8.0, 1)];
        let target = student(2, Category::Sc, Residence::Dayscholar, 6.0, 5);
        let r = compute_ranking(&target, &roster);
        assert_eq!(r.overall_count, 1);
        assert_eq!(r.overall_rank, 0);
        assert_eq!(r.category_count, 0);
        assert_eq!(r.avg_residence, 0.0);
        assert!(close(r.difference_from_overall_avg, -2.0));
    }

    #[test]
    fn test_performance_levels() {
        assert_eq!(PerformanceLevel::from_gpa(10.0), PerformanceLevel::Excellent);
        assert_eq!(PerformanceLevel::from_gpa(9.0), PerformanceLevel::Excellent);
        assert_eq!(PerformanceLevel::from_gpa(8.99), PerformanceLevel::Good);
        assert_eq!(PerformanceLevel::from_gpa(7.0), PerformanceLevel::Good);
        assert_eq!(PerformanceLevel::from_gpa(6.99), PerformanceLevel::Average);
        assert_eq!(PerformanceLevel::from_gpa(5.0), PerformanceLevel::Average);
        assert_eq!(PerformanceLevel::from_gpa(4.99), PerformanceLevel::BelowAverage);
        assert_eq!(PerformanceLevel::from_gpa(0.0), PerformanceLevel::BelowAverage);
        assert_eq!(PerformanceLevel::BelowAverage.to_string(), "Below Average");
    }
}
