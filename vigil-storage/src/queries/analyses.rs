//! Queries for the analyses table.

use rusqlite::{params, Connection, Row};
use vigil_core::errors::StorageError;
use vigil_core::types::{Analysis, AnalysisStatus, Issue, Language, Metrics};

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::Sqlite {
        message: e.to_string(),
    }
}

fn ser_err(e: serde_json::Error) -> StorageError {
    StorageError::Serialization {
        message: e.to_string(),
    }
}

/// Insert a new pending analysis row. Returns the row id.
pub fn insert_pending(
    conn: &Connection,
    user_id: &str,
    language: Language,
    now_ms: i64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO analyses (user_id, language, status, created_at, updated_at)
         VALUES (?1, ?2, 'pending', ?3, ?3)",
        params![user_id, language.as_str(), now_ms],
    )
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

/// Write a full analysis record over its row. One statement, so readers see
/// either the old record or the new one, never a mix.
pub fn upsert(conn: &Connection, analysis: &Analysis) -> Result<(), StorageError> {
    let metrics = serde_json::to_string(&analysis.metrics).map_err(ser_err)?;
    let issues = serde_json::to_string(&analysis.issues).map_err(ser_err)?;
    let suggestions = serde_json::to_string(&analysis.suggestions).map_err(ser_err)?;

    conn.execute(
        "INSERT INTO analyses (
            id, user_id, language, status, metrics, issues, suggestions,
            security_score, complexity_score, performance_score,
            quality_score, global_score, failure, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
         ON CONFLICT(id) DO UPDATE SET
            status = excluded.status,
            metrics = excluded.metrics,
            issues = excluded.issues,
            suggestions = excluded.suggestions,
            security_score = excluded.security_score,
            complexity_score = excluded.complexity_score,
            performance_score = excluded.performance_score,
            quality_score = excluded.quality_score,
            global_score = excluded.global_score,
            failure = excluded.failure,
            updated_at = excluded.updated_at",
        params![
            analysis.id,
            analysis.user_id,
            analysis.language.as_str(),
            analysis.status.as_str(),
            metrics,
            issues,
            suggestions,
            analysis.security_score,
            analysis.complexity_score,
            analysis.performance_score,
            analysis.quality_score,
            analysis.global_score,
            analysis.failure,
            analysis.created_at,
            analysis.updated_at,
        ],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

const SELECT_COLUMNS: &str = "id, user_id, language, status, metrics, issues, suggestions,
     security_score, complexity_score, performance_score, quality_score,
     global_score, failure, created_at, updated_at";

fn row_to_analysis(row: &Row<'_>) -> Result<Analysis, rusqlite::Error> {
    let language: String = row.get(2)?;
    let status: String = row.get(3)?;
    let metrics_json: String = row.get(4)?;
    let issues_json: String = row.get(5)?;
    let suggestions_json: String = row.get(6)?;

    let invalid = |message: String| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            message.into(),
        )
    };

    let language = Language::parse_str(&language)
        .ok_or_else(|| invalid(format!("unknown language '{language}'")))?;
    let status = AnalysisStatus::parse_str(&status)
        .ok_or_else(|| invalid(format!("unknown status '{status}'")))?;
    let metrics: Metrics =
        serde_json::from_str(&metrics_json).map_err(|e| invalid(e.to_string()))?;
    let issues: Vec<Issue> =
        serde_json::from_str(&issues_json).map_err(|e| invalid(e.to_string()))?;
    let suggestions: Vec<String> =
        serde_json::from_str(&suggestions_json).map_err(|e| invalid(e.to_string()))?;

    Ok(Analysis {
        id: row.get(0)?,
        user_id: row.get(1)?,
        language,
        status,
        metrics,
        issues,
        suggestions,
        security_score: row.get(7)?,
        complexity_score: row.get(8)?,
        performance_score: row.get(9)?,
        quality_score: row.get(10)?,
        global_score: row.get(11)?,
        failure: row.get(12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

/// Newest-first page of one user's analyses.
pub fn query_by_user(
    conn: &Connection,
    user_id: &str,
    offset: u32,
    limit: u32,
) -> Result<Vec<Analysis>, StorageError> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM analyses
         WHERE user_id = ?1
         ORDER BY created_at DESC, id DESC
         LIMIT ?2 OFFSET ?3"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![user_id, limit as i64, offset as i64], row_to_analysis)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// All analyses currently in `status`, newest-first.
pub fn query_by_status(
    conn: &Connection,
    status: AnalysisStatus,
) -> Result<Vec<Analysis>, StorageError> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM analyses
         WHERE status = ?1
         ORDER BY created_at DESC, id DESC"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![status.as_str()], row_to_analysis)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// One full record by id; `None` when absent.
pub fn query_by_id(conn: &Connection, id: i64) -> Result<Option<Analysis>, StorageError> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM analyses WHERE id = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    let mut rows = stmt
        .query_map(params![id], row_to_analysis)
        .map_err(sqlite_err)?;
    match rows.next() {
        Some(row) => Ok(Some(row.map_err(sqlite_err)?)),
        None => Ok(None),
    }
}
