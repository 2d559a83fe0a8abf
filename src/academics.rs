use crate::models::{AttendanceRecord, AttendanceStatus, FeedbackNote, GradeRecord, Syllabus};

/// Percent of matching attendance records marked present. Late counts against
/// the rate, same as absent.
pub fn attendance_rate(
    records: &[AttendanceRecord],
    subject_id: &str,
    course_id: Option<&str>,
) -> f64 {
    let matching: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|record| record.subject_id == subject_id)
        .filter(|record| course_id.map_or(true, |course| record.course_id == course))
        .collect();

    if matching.is_empty() {
        return 0.0;
    }

    let present = matching
        .iter()
        .filter(|record| record.status == AttendanceStatus::Present)
        .count();

    present as f64 / matching.len() as f64 * 100.0
}

/// Mean of score/max_score percentages over the matching grade records.
pub fn average_grade(grades: &[GradeRecord], subject_id: &str, course_id: Option<&str>) -> f64 {
    let matching: Vec<&GradeRecord> = grades
        .iter()
        .filter(|grade| grade.subject_id == subject_id)
        .filter(|grade| course_id.map_or(true, |course| grade.course_id == course))
        .collect();

    if matching.is_empty() {
        return 0.0;
    }

    let total: f64 = matching
        .iter()
        .map(|grade| grade.score / grade.max_score * 100.0)
        .sum();

    total / matching.len() as f64
}

/// Percent of syllabus topics completed; 0.0 when the course has no syllabus.
pub fn syllabus_completion(syllabus: Option<&Syllabus>) -> f64 {
    let Some(syllabus) = syllabus else {
        return 0.0;
    };

    if syllabus.topics.is_empty() {
        return 0.0;
    }

    let completed = syllabus.topics.iter().filter(|topic| topic.completed).count();
    completed as f64 / syllabus.topics.len() as f64 * 100.0
}

/// Mean feedback rating for a target id, 0.0 with no notes.
pub fn average_rating(notes: &[FeedbackNote], target_id: &str) -> f64 {
    let matching: Vec<&FeedbackNote> = notes
        .iter()
        .filter(|note| note.target_id == target_id)
        .collect();

    if matching.is_empty() {
        return 0.0;
    }

    let total: u32 = matching.iter().map(|note| u32::from(note.rating)).sum();
    f64::from(total) / matching.len() as f64
}
