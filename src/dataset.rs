use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{MAX_POINTS, MIN_DESCRIPTION_CHARS, MIN_POINTS};
use crate::models::{
    AttendanceRecord, AttendanceStatus, Course, DisciplinaryEntry, FeedbackNote, FeedbackTarget,
    GradeKind, GradeRecord, MarkKind, Person, Role, Severity, Syllabus, SyllabusTopic, TimeSlot,
};

pub const DATA_ENV_VAR: &str = "SMART_MENTOR_DATA";

/// The whole portal dataset. Built from the seed unless a JSON override is
/// supplied via `--data` or the `SMART_MENTOR_DATA` environment variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub people: Vec<Person>,
    pub entries: Vec<DisciplinaryEntry>,
    pub courses: Vec<Course>,
    pub grades: Vec<GradeRecord>,
    pub attendance: Vec<AttendanceRecord>,
    pub syllabi: Vec<Syllabus>,
    pub timetable: Vec<TimeSlot>,
    pub feedback: Vec<FeedbackNote>,
}

impl Dataset {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::from_json_file(path);
        }

        if let Ok(env_path) = std::env::var(DATA_ENV_VAR) {
            return Self::from_json_file(Path::new(&env_path));
        }

        Self::seed()
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid dataset JSON in {}", path.display()))
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }

    pub fn display_name(&self, id: &str) -> String {
        self.person(id)
            .map(|person| person.name.clone())
            .unwrap_or_else(|| "Unknown Student".to_string())
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    pub fn syllabus(&self, course_id: &str) -> Option<&Syllabus> {
        self.syllabi.iter().find(|syllabus| syllabus.course_id == course_id)
    }

    pub fn seed() -> anyhow::Result<Self> {
        let people = vec![
            person("student1", "John Doe", "student@example.com", Role::Student),
            person("student2", "Alice Smith", "alice.smith@example.com", Role::Student),
            person("student3", "Bob Johnson", "bob.johnson@example.com", Role::Student),
            person("student4", "Emma Wilson", "emma.wilson@example.com", Role::Student),
            person("student5", "Michael Brown", "michael.brown@example.com", Role::Student),
            person("student6", "Sophia Davis", "sophia.davis@example.com", Role::Student),
            person("faculty1", "Dr. Sarah Thomas", "faculty@example.com", Role::Faculty),
            person("faculty2", "Prof. James Wilson", "james.wilson@example.com", Role::Faculty),
            person("admin1", "Admin User", "admin@example.com", Role::Admin),
        ];

        let entries = vec![
            entry(
                "student1",
                MarkKind::Absenteeism,
                Severity::Medium,
                2,
                "Missed three consecutive classes without notice",
                date(2026, 3, 10)?,
                Some("faculty1"),
                Some("First occurrence this semester"),
            ),
            entry(
                "student1",
                MarkKind::RuleViolation,
                Severity::Low,
                1,
                "Late submission of assignment",
                date(2026, 3, 3)?,
                Some("faculty1"),
                None,
            ),
            entry(
                "faculty1",
                MarkKind::Misconduct,
                Severity::Medium,
                3,
                "Reported for unprofessional behavior",
                date(2026, 2, 25)?,
                Some("admin1"),
                Some("Multiple student complaints"),
            ),
            entry(
                "student3",
                MarkKind::Misconduct,
                Severity::High,
                3,
                "Altercation with another student in the cafeteria",
                date(2026, 3, 5)?,
                Some("faculty1"),
                None,
            ),
            entry(
                "student3",
                MarkKind::Absenteeism,
                Severity::Medium,
                2,
                "Skipped two lab sessions without notice",
                date(2026, 2, 20)?,
                Some("faculty1"),
                None,
            ),
            entry(
                "student3",
                MarkKind::RuleViolation,
                Severity::Medium,
                2,
                "Repeated use of phone during lectures",
                date(2026, 3, 12)?,
                Some("faculty2"),
                None,
            ),
            entry(
                "student4",
                MarkKind::RuleViolation,
                Severity::Low,
                1,
                "Returned library materials two weeks late",
                date(2026, 3, 1)?,
                Some("faculty2"),
                None,
            ),
            entry(
                "student5",
                MarkKind::Absenteeism,
                Severity::Medium,
                2,
                "Absent from midterm review sessions",
                date(2026, 2, 27)?,
                Some("faculty1"),
                None,
            ),
            entry(
                "student5",
                MarkKind::PropertyDamage,
                Severity::Medium,
                2,
                "Damaged a lab workstation keyboard",
                date(2026, 3, 8)?,
                Some("faculty2"),
                None,
            ),
            entry(
                "student6",
                MarkKind::AcademicDishonesty,
                Severity::High,
                5,
                "Copied answers during the CS201 quiz",
                date(2026, 3, 4)?,
                Some("faculty1"),
                Some("Second academic integrity incident"),
            ),
            entry(
                "student6",
                MarkKind::Misconduct,
                Severity::Medium,
                3,
                "Disruptive behavior during seminar",
                date(2026, 2, 18)?,
                Some("faculty1"),
                None,
            ),
            entry(
                "student6",
                MarkKind::RuleViolation,
                Severity::Low,
                1,
                "Unauthorized access to the innovation lab",
                date(2026, 3, 11)?,
                Some("faculty2"),
                None,
            ),
        ];

        let courses = vec![
            Course {
                id: "course1".to_string(),
                name: "Introduction to Computer Science".to_string(),
                code: "CS101".to_string(),
                faculty_id: "faculty1".to_string(),
                credits: 4,
                description: "Fundamental concepts of computer programming and algorithmic \
                              thinking"
                    .to_string(),
            },
            Course {
                id: "course2".to_string(),
                name: "Data Structures".to_string(),
                code: "CS201".to_string(),
                faculty_id: "faculty1".to_string(),
                credits: 4,
                description: "Implementation and analysis of fundamental data structures"
                    .to_string(),
            },
            Course {
                id: "course3".to_string(),
                name: "Artificial Intelligence".to_string(),
                code: "CS401".to_string(),
                faculty_id: "faculty1".to_string(),
                credits: 3,
                description: "Introduction to AI concepts, algorithms and applications"
                    .to_string(),
            },
        ];

        let grades = vec![
            grade("grade1", "course1", 85.0, GradeKind::Assignment, date(2026, 3, 6)?),
            grade("grade2", "course1", 72.0, GradeKind::Quiz, date(2026, 3, 1)?),
            grade("grade3", "course2", 91.0, GradeKind::Midterm, date(2026, 2, 24)?),
        ];

        let attendance = vec![
            att("att1", "course1", date(2026, 3, 15)?, AttendanceStatus::Present),
            att("att2", "course1", date(2026, 3, 14)?, AttendanceStatus::Absent),
            att("att3", "course2", date(2026, 3, 13)?, AttendanceStatus::Present),
            att("att4", "course3", date(2026, 3, 12)?, AttendanceStatus::Late),
        ];

        let syllabi = vec![
            Syllabus {
                course_id: "course1".to_string(),
                topics: vec![
                    topic("topic1", "Introduction to Programming Concepts", Some(date(2026, 2, 14)?)),
                    topic("topic2", "Variables and Data Types", Some(date(2026, 2, 19)?)),
                    topic("topic3", "Control Structures", Some(date(2026, 2, 26)?)),
                    topic("topic4", "Functions and Methods", None),
                    topic("topic5", "Object-Oriented Programming", None),
                ],
            },
            Syllabus {
                course_id: "course2".to_string(),
                topics: vec![
                    topic("topic1", "Arrays and Lists", Some(date(2026, 2, 22)?)),
                    topic("topic2", "Stacks and Queues", Some(date(2026, 3, 1)?)),
                    topic("topic3", "Trees and Graphs", None),
                    topic("topic4", "Sorting and Searching Algorithms", None),
                ],
            },
        ];

        let timetable = vec![
            slot("Monday", "09:00", "10:30", "course1", "Room 101"),
            slot("Monday", "11:00", "12:30", "course2", "Room 203"),
            slot("Tuesday", "09:00", "10:30", "course3", "Room 105"),
            slot("Wednesday", "14:00", "15:30", "course1", "Lab 2"),
            slot("Thursday", "11:00", "12:30", "course2", "Room 203"),
            slot("Friday", "09:00", "10:30", "course3", "Room 105"),
        ];

        let feedback = vec![
            FeedbackNote {
                id: "feedback1".to_string(),
                target_id: "faculty1".to_string(),
                target_kind: FeedbackTarget::Faculty,
                content: "Explains concepts clearly but goes too fast sometimes".to_string(),
                rating: 4,
                submitted_on: date(2026, 3, 11)?,
                anonymous: true,
                sensitive: false,
                submitted_by: None,
            },
            FeedbackNote {
                id: "feedback2".to_string(),
                target_id: "course1".to_string(),
                target_kind: FeedbackTarget::Course,
                content: "Course material is outdated and needs revision".to_string(),
                rating: 3,
                submitted_on: date(2026, 3, 8)?,
                anonymous: true,
                sensitive: false,
                submitted_by: None,
            },
            FeedbackNote {
                id: "feedback3".to_string(),
                target_id: "faculty1".to_string(),
                target_kind: FeedbackTarget::Faculty,
                content: "Made inappropriate comments during class".to_string(),
                rating: 2,
                submitted_on: date(2026, 3, 4)?,
                anonymous: true,
                sensitive: true,
                submitted_by: None,
            },
        ];

        Ok(Self {
            people,
            entries,
            courses,
            grades,
            attendance,
            syllabi,
            timetable,
            feedback,
        })
    }
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).context("invalid date")
}

fn person(id: &str, name: &str, email: &str, role: Role) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    subject_id: &str,
    kind: MarkKind,
    severity: Severity,
    points: i32,
    description: &str,
    occurred_on: NaiveDate,
    issued_by: Option<&str>,
    context: Option<&str>,
) -> DisciplinaryEntry {
    DisciplinaryEntry {
        id: Uuid::new_v4(),
        subject_id: subject_id.to_string(),
        kind,
        severity,
        points,
        description: description.to_string(),
        occurred_on,
        issued_by: issued_by.map(str::to_string),
        context: context.map(str::to_string),
    }
}

fn grade(id: &str, course_id: &str, score: f64, kind: GradeKind, recorded_on: NaiveDate) -> GradeRecord {
    GradeRecord {
        id: id.to_string(),
        subject_id: "student1".to_string(),
        course_id: course_id.to_string(),
        score,
        max_score: 100.0,
        kind,
        recorded_on,
    }
}

fn att(id: &str, course_id: &str, day: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
    AttendanceRecord {
        id: id.to_string(),
        subject_id: "student1".to_string(),
        course_id: course_id.to_string(),
        date: day,
        status,
    }
}

fn topic(id: &str, title: &str, completed_on: Option<NaiveDate>) -> SyllabusTopic {
    SyllabusTopic {
        id: id.to_string(),
        title: title.to_string(),
        completed: completed_on.is_some(),
        completed_on,
    }
}

fn slot(day: &str, start: &str, end: &str, course_id: &str, room: &str) -> TimeSlot {
    TimeSlot {
        day: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        course_id: course_id.to_string(),
        room: room.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct CsvEntryRow {
    subject_id: String,
    kind: MarkKind,
    severity: Severity,
    points: i32,
    description: String,
    occurred_on: NaiveDate,
    issued_by: Option<String>,
    context: Option<String>,
}

/// Read disciplinary entries from a CSV file, validating each row with the
/// same limits as the assignment form.
pub fn import_entries_csv(path: &Path) -> anyhow::Result<Vec<DisciplinaryEntry>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut imported = Vec::new();

    for (index, result) in reader.deserialize::<CsvEntryRow>().enumerate() {
        let line = index + 2; // header occupies line 1
        let row = result.with_context(|| format!("malformed row at line {line}"))?;

        anyhow::ensure!(
            (MIN_POINTS..=MAX_POINTS).contains(&row.points),
            "line {line}: points must be between {MIN_POINTS} and {MAX_POINTS}, got {}",
            row.points
        );
        anyhow::ensure!(
            row.description.chars().count() >= MIN_DESCRIPTION_CHARS,
            "line {line}: description must be at least {MIN_DESCRIPTION_CHARS} characters"
        );

        imported.push(DisciplinaryEntry {
            id: Uuid::new_v4(),
            subject_id: row.subject_id,
            kind: row.kind,
            severity: row.severity,
            points: row.points,
            description: row.description,
            occurred_on: row.occurred_on,
            issued_by: row.issued_by.filter(|value| !value.is_empty()),
            context: row.context.filter(|value| !value.is_empty()),
        });
    }

    Ok(imported)
}

/// Write the ledger out as CSV, one row per entry in insertion order.
pub fn export_entries_csv(path: &Path, entries: &[DisciplinaryEntry]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for entry in entries {
        writer.serialize(entry)?;
    }

    writer.flush().context("failed to flush CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_totals_match_the_dashboard_figures() {
        let dataset = Dataset::seed().unwrap();
        let total = |id: &str| -> i32 {
            dataset
                .entries
                .iter()
                .filter(|entry| entry.subject_id == id)
                .map(|entry| entry.points)
                .sum()
        };

        assert_eq!(total("student1"), 3);
        assert_eq!(total("student2"), 0);
        assert_eq!(total("student3"), 7);
        assert_eq!(total("student4"), 1);
        assert_eq!(total("student5"), 4);
        assert_eq!(total("student6"), 9);
        assert_eq!(total("faculty1"), 3);
    }

    #[test]
    fn display_name_falls_back_for_unknown_ids() {
        let dataset = Dataset::seed().unwrap();
        assert_eq!(dataset.display_name("student1"), "John Doe");
        assert_eq!(dataset.display_name("student99"), "Unknown Student");
    }

    #[test]
    fn seed_has_the_expected_courses_and_syllabi() {
        let dataset = Dataset::seed().unwrap();
        assert_eq!(dataset.courses.len(), 3);
        assert_eq!(dataset.course("course2").unwrap().code, "CS201");
        assert_eq!(dataset.syllabus("course1").unwrap().topics.len(), 5);
        assert!(dataset.syllabus("course3").is_none());
    }

    #[test]
    fn csv_round_trip_preserves_entries() {
        let dataset = Dataset::seed().unwrap();
        let path = std::env::temp_dir().join("smart-mentor-export-test.csv");

        export_entries_csv(&path, &dataset.entries).unwrap();
        let imported = import_entries_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(imported.len(), dataset.entries.len());
        assert_eq!(imported[0].subject_id, dataset.entries[0].subject_id);
        assert_eq!(imported[0].points, dataset.entries[0].points);
    }

    #[test]
    fn csv_import_rejects_invalid_rows() {
        let header = "subject_id,kind,severity,points,description,occurred_on,issued_by,context";

        let bad_points = std::env::temp_dir().join("smart-mentor-bad-points.csv");
        std::fs::write(
            &bad_points,
            format!("{header}\nstudent1,misconduct,low,9,Valid description text,2026-03-01,,\n"),
        )
        .unwrap();
        let error = import_entries_csv(&bad_points).unwrap_err();
        std::fs::remove_file(&bad_points).ok();
        assert!(error.to_string().contains("line 2"));

        let short_desc = std::env::temp_dir().join("smart-mentor-short-desc.csv");
        std::fs::write(
            &short_desc,
            format!("{header}\nstudent1,misconduct,low,2,short,2026-03-01,,\n"),
        )
        .unwrap();
        let error = import_entries_csv(&short_desc).unwrap_err();
        std::fs::remove_file(&short_desc).ok();
        assert!(error.to_string().contains("at least"));
    }
}
