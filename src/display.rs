use crate::model::Student;
use crate::ranking::RankingResult;
use crate::stats::{GpaStats, GroupBy, Summary};

pub fn rank_fraction(rank: usize, count: usize) -> String {
    format!("{} / {}", rank, count)
}

/// Position of a GPA relative to an average.
pub fn qualifier(difference: f64) -> &'static str {
    if difference >= 0.0 { "above" } else { "below" }
}

pub fn display_ranking(student: &Student, r: &RankingResult) {
    println!(
        "{} - {}, {}, semester {}, GPA {:.2}",
        student, student.category, student.residence, student.semester, student.gpa
    );
    println!("  Overall rank: {}", rank_fraction(r.overall_rank, r.overall_count));
    println!(
        "  Rank in {} category: {}",
        student.category,
        rank_fraction(r.category_rank, r.category_count)
    );
    println!("  Performance: {}", r.performance_level);
    println!(
        "  {:.2} {} the overall average",
        r.difference_from_overall_avg.abs(),
        qualifier(r.difference_from_overall_avg)
    );
    println!("Average GPA:");
    println!("  - all students: {:.2}", r.avg_all);
    println!("  - {} category: {:.2}", student.category, r.avg_category);
    println!("  - {}s: {:.2}", student.residence, r.avg_residence);
    println!("  - semester {}: {:.2}", student.semester, r.avg_semester);
}

pub fn display_students(students: &[&Student]) {
    println!("Students: {}", students.len());
    for s in students {
        println!(
            "  - {} [{}, {}, semester {}] GPA {:.2}",
            s, s.category, s.residence, s.semester, s.gpa
        );
    }
}

fn display_gpa_stats(indent: &str, stats: &GpaStats) {
    println!("{}students: {}", indent, stats.total_students);
    println!("{}average GPA: {:.2}", indent, stats.average_gpa);
    println!("{}highest GPA: {:.2}", indent, stats.highest_gpa);
    println!("{}lowest GPA: {:.2}", indent, stats.lowest_gpa);
}

pub fn display_summary(summary: Option<&Summary>) {
    let Some(summary) = summary else {
        println!("No students in database");
        return;
    };
    println!("Summary:");
    display_gpa_stats("  ", &summary.stats);
    println!("Performance levels:");
    for (level, n) in &summary.levels {
        println!("  - {} ({}): {}", level, level.range(), n);
    }
}

pub fn display_groups(by: GroupBy, groups: &[(&str, GpaStats)]) {
    if groups.is_empty() {
        println!("No students in database");
        return;
    }
    println!("Statistics by {}:", by);
    for (key, stats) in groups {
        println!("  {}:", key);
        display_gpa_stats("    ", stats);
    }
}

pub fn display_toppers(toppers: &[&Student]) {
    println!("Toppers: {}", toppers.len());
    for (rank, s) in toppers.iter().enumerate() {
        println!("  {}. {} ({}) GPA {:.2}", rank + 1, s, s.category, s.gpa);
    }
}

pub fn display_at_risk(threshold: f64, students: &[&Student]) {
    println!("Students below {:.2}: {}", threshold, students.len());
    for s in students {
        println!("  - {} GPA {:.2}", s, s.gpa);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_fraction() {
        assert_eq!(rank_fraction(1, 3), "1 / 3");
        assert_eq!(rank_fraction(0, 0), "0 / 0");
    }

    #[test]
    fn test_qualifier() {
        assert_eq!(qualifier(-1.0), "below");
        assert_eq!(qualifier(0.83), "above");
        assert_eq!(qualifier(0.0), "above");
    }
}
