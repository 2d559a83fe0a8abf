use anyhow::ensure;

use crate::models::{
    DisciplinaryEntry, InterventionRule, MarkKind, Person, RosterBand, Severity, Standing,
    SubjectStanding,
};

pub const MIN_POINTS: i32 = 1;
pub const MAX_POINTS: i32 = 5;
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// In-memory store of disciplinary entries plus the intervention rule table.
/// Entries keep insertion order; nothing here is ever edited or deleted.
pub struct Ledger {
    entries: Vec<DisciplinaryEntry>,
    rules: Vec<InterventionRule>,
}

impl Ledger {
    pub fn new(entries: Vec<DisciplinaryEntry>, rules: Vec<InterventionRule>) -> Self {
        Self { entries, rules }
    }

    pub fn entries(&self) -> &[DisciplinaryEntry] {
        &self.entries
    }

    pub fn entries_for(&self, subject_id: &str) -> Vec<&DisciplinaryEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.subject_id == subject_id)
            .collect()
    }

    pub fn total_points(&self, subject_id: &str) -> i32 {
        self.entries
            .iter()
            .filter(|entry| entry.subject_id == subject_id)
            .map(|entry| entry.points)
            .sum()
    }

    /// The rule with the highest trigger not exceeding the total. On a shared
    /// trigger the rule declared first wins.
    pub fn recommend_intervention(&self, total_points: i32) -> Option<&InterventionRule> {
        let mut best: Option<&InterventionRule> = None;

        for rule in self.rules.iter() {
            if rule.trigger_points > total_points {
                continue;
            }
            if best.map_or(true, |current| rule.trigger_points > current.trigger_points) {
                best = Some(rule);
            }
        }

        best
    }

    /// Append one validated entry. The only write path; limits mirror the
    /// assignment form.
    pub fn record(&mut self, entry: DisciplinaryEntry) -> anyhow::Result<()> {
        ensure!(
            (MIN_POINTS..=MAX_POINTS).contains(&entry.points),
            "points must be between {MIN_POINTS} and {MAX_POINTS}, got {}",
            entry.points
        );
        ensure!(
            entry.description.chars().count() >= MIN_DESCRIPTION_CHARS,
            "description must be at least {MIN_DESCRIPTION_CHARS} characters"
        );
        self.entries.push(entry);
        Ok(())
    }

    /// Per-person totals for the roster views, highest points first.
    pub fn rank_subjects(&self, roster: &[Person]) -> Vec<SubjectStanding> {
        let mut standings: Vec<SubjectStanding> = roster
            .iter()
            .map(|person| {
                let entries = self.entries_for(&person.id);
                let points = entries.iter().map(|entry| entry.points).sum();
                SubjectStanding {
                    subject_id: person.id.clone(),
                    name: person.name.clone(),
                    email: person.email.clone(),
                    points,
                    entry_count: entries.len(),
                    band: roster_band(points),
                }
            })
            .collect();

        standings.sort_by(|a, b| b.points.cmp(&a.points));
        standings
    }

    /// Kind/severity/search filtering from the admin record table. The search
    /// term matches the description or the resolved subject name,
    /// case-insensitively.
    pub fn filter_entries<'a>(
        &'a self,
        kind: Option<MarkKind>,
        severity: Option<Severity>,
        search: Option<&str>,
        resolve_name: impl Fn(&str) -> String,
    ) -> Vec<&'a DisciplinaryEntry> {
        let needle = search.map(|term| term.to_lowercase());

        self.entries
            .iter()
            .filter(|entry| kind.map_or(true, |wanted| entry.kind == wanted))
            .filter(|entry| severity.map_or(true, |wanted| entry.severity == wanted))
            .filter(|entry| match needle.as_deref() {
                None | Some("") => true,
                Some(term) => {
                    entry.description.to_lowercase().contains(term)
                        || resolve_name(&entry.subject_id).to_lowercase().contains(term)
                }
            })
            .collect()
    }

    /// Advisory banners appended to the record view at high totals.
    pub fn advisories(&self, total_points: i32) -> Vec<String> {
        let mut notices = Vec::new();

        if total_points > 7 {
            notices.push(format!(
                "You have {total_points} black mark points. At 10 points, you'll receive a \
                 formal warning. Consider meeting with your academic advisor."
            ));
        }

        if total_points > 12 {
            notices.push(format!(
                "Your black mark points ({total_points}) are approaching the threshold for \
                 academic suspension (15 points). Immediate action is required."
            ));
        }

        notices
    }
}

pub fn standing_for(total_points: i32) -> Standing {
    match total_points {
        i32::MIN..=4 => Standing::GoodStanding,
        5..=7 => Standing::FirstWarning,
        8..=14 => Standing::RequiredIntervention,
        _ => Standing::AcademicProbation,
    }
}

pub fn roster_band(total_points: i32) -> RosterBand {
    match total_points {
        i32::MIN..=2 => RosterBand::Good,
        3..=6 => RosterBand::Warning,
        _ => RosterBand::AtRisk,
    }
}

pub fn default_intervention_rules() -> Vec<InterventionRule> {
    vec![
        InterventionRule {
            trigger_points: 3,
            suggestion: "Consider taking a short break to reset. Studies show a 15-minute walk \
                         can improve focus and reduce stress."
                .to_string(),
            category: "wellness".to_string(),
        },
        InterventionRule {
            trigger_points: 5,
            suggestion: "It might be helpful to meet with your academic advisor to discuss your \
                         course load and strategies for improvement."
                .to_string(),
            category: "academic".to_string(),
        },
        InterventionRule {
            trigger_points: 7,
            suggestion: "Have you tried time-blocking your study sessions? Research shows it can \
                         improve productivity by up to 50%."
                .to_string(),
            category: "productivity".to_string(),
        },
        InterventionRule {
            trigger_points: 9,
            suggestion: "Consider joining a study group for courses you're struggling with. Peer \
                         learning can significantly improve understanding."
                .to_string(),
            category: "social".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample_entry(subject_id: &str, points: i32) -> DisciplinaryEntry {
        DisciplinaryEntry {
            id: Uuid::new_v4(),
            subject_id: subject_id.to_string(),
            kind: MarkKind::Absenteeism,
            severity: Severity::Medium,
            points,
            description: "Missed three consecutive classes".to_string(),
            occurred_on: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            issued_by: Some("faculty1".to_string()),
            context: None,
        }
    }

    fn sample_ledger(points: &[i32]) -> Ledger {
        let entries = points.iter().map(|p| sample_entry("student1", *p)).collect();
        Ledger::new(entries, default_intervention_rules())
    }

    #[test]
    fn empty_subject_has_zero_points_and_no_intervention() {
        let ledger = Ledger::new(Vec::new(), default_intervention_rules());
        assert_eq!(ledger.total_points("nobody"), 0);
        assert!(ledger.recommend_intervention(0).is_none());
        assert!(ledger.entries_for("nobody").is_empty());
    }

    #[test]
    fn total_points_sums_entries() {
        let ledger = sample_ledger(&[2, 1, 5]);
        assert_eq!(ledger.total_points("student1"), 8);
        assert_eq!(ledger.total_points("student2"), 0);
    }

    #[test]
    fn recording_never_decreases_total() {
        let mut ledger = sample_ledger(&[2]);
        let before = ledger.total_points("student1");
        ledger.record(sample_entry("student1", 1)).unwrap();
        assert!(ledger.total_points("student1") >= before);
    }

    #[test]
    fn intervention_is_a_monotonic_step_function() {
        let ledger = sample_ledger(&[]);
        assert!(ledger.recommend_intervention(4).is_some()); // trigger 3 applies
        assert!(ledger.recommend_intervention(2).is_none());
        assert_eq!(
            ledger.recommend_intervention(5).unwrap().trigger_points,
            5
        );
        assert_eq!(
            ledger.recommend_intervention(6).unwrap().trigger_points,
            5
        );
        assert_eq!(
            ledger.recommend_intervention(8).unwrap().trigger_points,
            7
        );
        assert_eq!(
            ledger.recommend_intervention(40).unwrap().trigger_points,
            9
        );
    }

    #[test]
    fn shared_trigger_goes_to_first_declared_rule() {
        let rules = vec![
            InterventionRule {
                trigger_points: 5,
                suggestion: "first".to_string(),
                category: "a".to_string(),
            },
            InterventionRule {
                trigger_points: 5,
                suggestion: "second".to_string(),
                category: "b".to_string(),
            },
        ];
        let ledger = Ledger::new(Vec::new(), rules);
        assert_eq!(ledger.recommend_intervention(6).unwrap().suggestion, "first");
    }

    #[test]
    fn scenario_from_the_record_view() {
        let ledger = sample_ledger(&[2, 1, 5]);
        let total = ledger.total_points("student1");
        assert_eq!(total, 8);
        assert_eq!(ledger.recommend_intervention(total).unwrap().trigger_points, 7);
    }

    #[test]
    fn standing_cut_points() {
        assert_eq!(standing_for(0), Standing::GoodStanding);
        assert_eq!(standing_for(4), Standing::GoodStanding);
        assert_eq!(standing_for(5), Standing::FirstWarning);
        assert_eq!(standing_for(7), Standing::FirstWarning);
        assert_eq!(standing_for(8), Standing::RequiredIntervention);
        assert_eq!(standing_for(14), Standing::RequiredIntervention);
        assert_eq!(standing_for(15), Standing::AcademicProbation);
    }

    #[test]
    fn roster_band_cut_points() {
        assert_eq!(roster_band(2), RosterBand::Good);
        assert_eq!(roster_band(3), RosterBand::Warning);
        assert_eq!(roster_band(6), RosterBand::Warning);
        assert_eq!(roster_band(7), RosterBand::AtRisk);
    }

    #[test]
    fn record_rejects_out_of_range_points() {
        let mut ledger = sample_ledger(&[]);
        assert!(ledger.record(sample_entry("student1", 0)).is_err());
        assert!(ledger.record(sample_entry("student1", 6)).is_err());
        assert!(ledger.record(sample_entry("student1", 5)).is_ok());
    }

    #[test]
    fn record_rejects_short_descriptions() {
        let mut ledger = sample_ledger(&[]);
        let mut entry = sample_entry("student1", 2);
        entry.description = "short".to_string();
        assert!(ledger.record(entry).is_err());
    }

    #[test]
    fn ranking_sorts_by_points_descending() {
        let mut entries = vec![sample_entry("student1", 2)];
        entries.push(sample_entry("student2", 5));
        entries.push(sample_entry("student2", 4));
        let ledger = Ledger::new(entries, default_intervention_rules());

        let roster = vec![
            Person {
                id: "student1".to_string(),
                name: "John Doe".to_string(),
                email: "john.doe@example.com".to_string(),
                role: crate::models::Role::Student,
            },
            Person {
                id: "student2".to_string(),
                name: "Alice Smith".to_string(),
                email: "alice.smith@example.com".to_string(),
                role: crate::models::Role::Student,
            },
        ];

        let standings = ledger.rank_subjects(&roster);
        assert_eq!(standings[0].subject_id, "student2");
        assert_eq!(standings[0].points, 9);
        assert_eq!(standings[0].entry_count, 2);
        assert_eq!(standings[0].band, RosterBand::AtRisk);
        assert_eq!(standings[1].band, RosterBand::Good);
    }

    #[test]
    fn filtering_by_kind_severity_and_search() {
        let mut misconduct = sample_entry("student2", 3);
        misconduct.kind = MarkKind::Misconduct;
        misconduct.severity = Severity::High;
        let entries = vec![sample_entry("student1", 2), misconduct];
        let ledger = Ledger::new(entries, default_intervention_rules());

        let resolve = |id: &str| {
            if id == "student1" {
                "John Doe".to_string()
            } else {
                "Alice Smith".to_string()
            }
        };

        assert_eq!(
            ledger
                .filter_entries(Some(MarkKind::Misconduct), None, None, resolve)
                .len(),
            1
        );
        assert_eq!(
            ledger
                .filter_entries(None, Some(Severity::High), None, resolve)
                .len(),
            1
        );
        assert_eq!(
            ledger
                .filter_entries(None, None, Some("alice"), resolve)
                .len(),
            1
        );
        assert_eq!(
            ledger
                .filter_entries(None, None, Some("missed"), resolve)
                .len(),
            2
        );
    }

    #[test]
    fn advisories_appear_above_thresholds() {
        let ledger = sample_ledger(&[]);
        assert!(ledger.advisories(7).is_empty());
        assert_eq!(ledger.advisories(8).len(), 1);
        assert_eq!(ledger.advisories(13).len(), 2);
    }
}
