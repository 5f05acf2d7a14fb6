use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::DatabaseError;
use crate::models::feedback::{FeedbackCorrection, LogType, ReportLog, SymptomLog};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

// ═══════════════════════════════════════════
// Report logs
// ═══════════════════════════════════════════

pub fn insert_report_log(conn: &Connection, log: &ReportLog) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO report_logs (id, filename, raw_text, cleaned_text, structured_output, analysis, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            log.id.to_string(),
            log.filename,
            log.raw_text,
            log.cleaned_text,
            log.structured_output,
            log.analysis,
            log.created_at.format(DATETIME_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_report_log(conn: &Connection, id: &Uuid) -> Result<Option<ReportLog>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, filename, raw_text, cleaned_text, structured_output, analysis, created_at
         FROM report_logs WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
        ))
    });

    match result {
        Ok((id, filename, raw_text, cleaned_text, structured_output, analysis, created_at)) => {
            Ok(Some(ReportLog {
                id: parse_uuid(&id)?,
                filename,
                raw_text,
                cleaned_text,
                structured_output,
                analysis,
                created_at: parse_datetime(&created_at)?,
            }))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ═══════════════════════════════════════════
// Symptom logs
// ═══════════════════════════════════════════

pub fn insert_symptom_log(conn: &Connection, log: &SymptomLog) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO symptom_logs (id, description, prediction, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            log.id.to_string(),
            log.description,
            log.prediction,
            log.created_at.format(DATETIME_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

// ═══════════════════════════════════════════
// Feedback logs
// ═══════════════════════════════════════════

/// Insert a feedback correction, enforcing the reference integrity rule:
/// report feedback must carry a report reference, symptom feedback a
/// symptom reference. Violations are rejected here, before the retraining
/// loop ever sees them.
pub fn insert_feedback(
    conn: &Connection,
    feedback: &FeedbackCorrection,
) -> Result<Uuid, DatabaseError> {
    match feedback.log_type {
        LogType::Report if feedback.report_log_id.is_none() => {
            return Err(DatabaseError::ConstraintViolation(
                "report feedback requires a report_log_id".into(),
            ));
        }
        LogType::Symptom if feedback.symptom_log_id.is_none() => {
            return Err(DatabaseError::ConstraintViolation(
                "symptom feedback requires a symptom_log_id".into(),
            ));
        }
        _ => {}
    }

    let id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO feedback_logs (id, log_type, original_prediction, corrected_label,
         user_comment, report_log_id, symptom_log_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, datetime('now'))",
        params![
            id.to_string(),
            feedback.log_type.as_str(),
            feedback.original_prediction,
            feedback.corrected_label,
            feedback.user_comment,
            feedback.report_log_id.map(|id| id.to_string()),
            feedback.symptom_log_id.map(|id| id.to_string()),
        ],
    )?;
    Ok(id)
}

/// One row of the retraining join: a report's structured snapshot plus the
/// human-corrected label.
#[derive(Debug, Clone)]
pub struct FeedbackJoinRow {
    pub structured_output: String,
    pub corrected_label: String,
}

/// All report-type feedback joined to its report snapshot, in insertion
/// order. Symptom feedback is excluded by the join.
pub fn report_feedback_joins(conn: &Connection) -> Result<Vec<FeedbackJoinRow>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT r.structured_output, f.corrected_label
         FROM feedback_logs f
         JOIN report_logs r ON f.report_log_id = r.id
         WHERE f.log_type = 'report'
         ORDER BY f.created_at, f.id",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(FeedbackJoinRow {
                structured_output: row.get(0)?,
                corrected_label: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|_| DatabaseError::InvalidEnum {
        field: "id".into(),
        value: s.into(),
    })
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, DatabaseError> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map_err(|_| DatabaseError::InvalidEnum {
        field: "created_at".into(),
        value: s.into(),
    })
}
