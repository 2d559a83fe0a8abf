use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkKind {
    Absenteeism,
    Misconduct,
    AcademicDishonesty,
    PropertyDamage,
    RuleViolation,
}

impl MarkKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "absenteeism" => Some(Self::Absenteeism),
            "misconduct" => Some(Self::Misconduct),
            "academic_dishonesty" | "dishonesty" => Some(Self::AcademicDishonesty),
            "property_damage" | "damage" => Some(Self::PropertyDamage),
            "rule_violation" | "violation" => Some(Self::RuleViolation),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Absenteeism => "absenteeism",
            Self::Misconduct => "misconduct",
            Self::AcademicDishonesty => "academic dishonesty",
            Self::PropertyDamage => "property damage",
            Self::RuleViolation => "rule violation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisciplinaryEntry {
    pub id: Uuid,
    pub subject_id: String,
    pub kind: MarkKind,
    pub severity: Severity,
    pub points: i32,
    pub description: String,
    pub occurred_on: NaiveDate,
    pub issued_by: Option<String>,
    pub context: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionRule {
    pub trigger_points: i32,
    pub suggestion: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Coarse point classification shown on the student record view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    GoodStanding,
    FirstWarning,
    RequiredIntervention,
    AcademicProbation,
}

impl Standing {
    pub fn label(&self) -> &'static str {
        match self {
            Self::GoodStanding => "good standing",
            Self::FirstWarning => "first warning",
            Self::RequiredIntervention => "required intervention",
            Self::AcademicProbation => "academic probation",
        }
    }
}

/// Coarse point classification used by the faculty roster tabs. Deliberately
/// not the same cut points as [`Standing`]; the two views disagree in the
/// original system as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterBand {
    Good,
    Warning,
    AtRisk,
}

impl RosterBand {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "good" | "good-standing" => Some(Self::Good),
            "warning" => Some(Self::Warning),
            "at-risk" | "at_risk" | "risk" => Some(Self::AtRisk),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "good standing",
            Self::Warning => "warning",
            Self::AtRisk => "at risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "student" => Some(Self::Student),
            "faculty" => Some(Self::Faculty),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectStanding {
    pub subject_id: String,
    pub name: String,
    pub email: String,
    pub points: i32,
    pub entry_count: usize,
    pub band: RosterBand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub faculty_id: String,
    pub credits: u32,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeKind {
    Assignment,
    Quiz,
    Midterm,
    Final,
    Project,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRecord {
    pub id: String,
    pub subject_id: String,
    pub course_id: String,
    pub score: f64,
    pub max_score: f64,
    pub kind: GradeKind,
    pub recorded_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub subject_id: String,
    pub course_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyllabusTopic {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub completed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Syllabus {
    pub course_id: String,
    pub topics: Vec<SyllabusTopic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub course_id: String,
    pub room: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTarget {
    Faculty,
    Course,
    College,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackNote {
    pub id: String,
    pub target_id: String,
    pub target_kind: FeedbackTarget,
    pub content: String,
    pub rating: u8,
    pub submitted_on: NaiveDate,
    pub anonymous: bool,
    pub sensitive: bool,
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone)]
pub struct KindSummary {
    pub kind: MarkKind,
    pub count: usize,
    pub total_points: i32,
}
