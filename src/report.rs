use std::fmt::Write;

use crate::academics;
use crate::dataset::Dataset;
use crate::ledger::{standing_for, Ledger};
use crate::models::{KindSummary, Role};

pub fn summarize_by_kind(ledger: &Ledger) -> Vec<KindSummary> {
    let mut map: std::collections::HashMap<crate::models::MarkKind, (usize, i32)> =
        std::collections::HashMap::new();

    for entry in ledger.entries() {
        let slot = map.entry(entry.kind).or_insert((0, 0));
        slot.0 += 1;
        slot.1 += entry.points;
    }

    let mut summaries: Vec<KindSummary> = map
        .into_iter()
        .map(|(kind, (count, total_points))| KindSummary {
            kind,
            count,
            total_points,
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}

pub fn build_report(dataset: &Dataset, ledger: &Ledger) -> String {
    let summaries = summarize_by_kind(ledger);
    let standings = ledger.rank_subjects(&dataset.people);

    let mut output = String::new();

    let _ = writeln!(output, "# Smart Mentor Disciplinary Report");
    let _ = writeln!(
        output,
        "{} people on record, {} disciplinary entries",
        dataset.people.len(),
        ledger.entries().len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Mark Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No disciplinary entries recorded.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} entries ({} points)",
                summary.kind.label(),
                summary.count,
                summary.total_points
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Highest Point Totals");

    let flagged: Vec<_> = standings.iter().filter(|s| s.points > 0).collect();
    if flagged.is_empty() {
        let _ = writeln!(output, "No one has accumulated points.");
    } else {
        for standing in flagged.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} ({}) {} points across {} entries, {}",
                standing.name,
                standing.email,
                standing.points,
                standing.entry_count,
                standing_for(standing.points).label()
            );
        }
    }

    let mut recent = ledger.entries().to_vec();
    recent.sort_by(|a, b| b.occurred_on.cmp(&a.occurred_on));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Entries");

    if recent.is_empty() {
        let _ = writeln!(output, "No disciplinary entries recorded.");
    } else {
        for entry in recent.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} ({}) on {}: {}",
                dataset.display_name(&entry.subject_id),
                entry.kind.label(),
                entry.occurred_on,
                entry.description
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Feedback Summary");

    if dataset.feedback.is_empty() {
        let _ = writeln!(output, "No feedback submitted.");
    } else {
        let faculty_targets: Vec<&crate::models::Person> = dataset
            .people
            .iter()
            .filter(|person| person.role == Role::Faculty)
            .collect();

        for person in faculty_targets {
            let rating = academics::average_rating(&dataset.feedback, &person.id);
            if rating > 0.0 {
                let _ = writeln!(output, "- {}: average rating {:.1}", person.name, rating);
            }
        }

        let sensitive = dataset.feedback.iter().filter(|note| note.sensitive).count();
        let _ = writeln!(
            output,
            "- {} notes total, {} flagged sensitive",
            dataset.feedback.len(),
            sensitive
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::default_intervention_rules;

    fn seeded() -> (Dataset, Ledger) {
        let dataset = Dataset::seed().unwrap();
        let ledger = Ledger::new(dataset.entries.clone(), default_intervention_rules());
        (dataset, ledger)
    }

    #[test]
    fn kind_summary_counts_entries_and_points() {
        let (_, ledger) = seeded();
        let summaries = summarize_by_kind(&ledger);

        let violations = summaries
            .iter()
            .find(|s| s.kind == crate::models::MarkKind::RuleViolation)
            .unwrap();
        assert_eq!(violations.count, 4);
        assert_eq!(violations.total_points, 5);
    }

    #[test]
    fn report_has_all_sections() {
        let (dataset, ledger) = seeded();
        let report = build_report(&dataset, &ledger);

        assert!(report.contains("## Mark Mix"));
        assert!(report.contains("## Highest Point Totals"));
        assert!(report.contains("## Recent Entries"));
        assert!(report.contains("## Feedback Summary"));
        assert!(report.contains("Sophia Davis"));
        assert!(report.contains("9 points"));
    }

    #[test]
    fn empty_ledger_report_uses_placeholders() {
        let dataset = Dataset::default();
        let ledger = Ledger::new(Vec::new(), default_intervention_rules());
        let report = build_report(&dataset, &ledger);

        assert!(report.contains("No disciplinary entries recorded."));
        assert!(report.contains("No one has accumulated points."));
        assert!(report.contains("No feedback submitted."));
    }
}
