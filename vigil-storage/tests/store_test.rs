//! Tests for the analysis store.

use std::sync::Arc;

use vigil_core::traits::AnalysisStore;
use vigil_core::types::{
    Analysis, AnalysisStatus, Issue, IssueCategory, Language, Severity,
};
use vigil_storage::{DatabaseManager, SqliteStore};

fn store() -> SqliteStore {
    SqliteStore::new(Arc::new(DatabaseManager::open_in_memory().unwrap()))
}

fn sample_issue(line: u32) -> Issue {
    Issue {
        rule_id: "ts-eval-usage".to_string(),
        severity: Severity::High,
        category: IssueCategory::Security,
        message: "Use of eval()".to_string(),
        file: "app.ts".to_string(),
        line,
        column: Some(1),
        snippet: "eval(userInput)".to_string(),
        suggestion: Some("Avoid eval()".to_string()),
        cwe_ids: [95].into_iter().collect(),
    }
}

fn completed_analysis(id: i64, user: &str, at: i64) -> Analysis {
    let mut analysis = Analysis::pending(id, user, Language::TypeScript, at);
    analysis.status = AnalysisStatus::Completed;
    analysis.issues = vec![sample_issue(3)];
    analysis.metrics.insert("complexity".to_string(), 2.5);
    analysis.suggestions = vec!["Avoid eval()".to_string()];
    analysis.security_score = 7.5;
    analysis.global_score = 9.0;
    analysis.updated_at = at;
    analysis
}

#[test]
fn save_round_trips_issues_and_metrics() {
    let store = store();
    let id = store
        .create_pending("user-1", Language::TypeScript, 1_000)
        .unwrap();
    let analysis = completed_analysis(id, "user-1", 1_000);
    store.save(&analysis).unwrap();

    let loaded = store.get_with_metrics(id).unwrap().unwrap();
    assert_eq!(loaded.status, AnalysisStatus::Completed);
    assert_eq!(loaded.issues.len(), 1);
    assert_eq!(loaded.issues[0].rule_id, "ts-eval-usage");
    assert_eq!(loaded.issues[0].cwe_ids.as_slice(), &[95]);
    assert_eq!(loaded.metrics.get("complexity"), Some(&2.5));
    assert_eq!(loaded.security_score, 7.5);
    assert_eq!(loaded.suggestions, vec!["Avoid eval()".to_string()]);
}

#[test]
fn missing_analysis_is_none_not_error() {
    let store = store();
    assert!(store.get_with_metrics(424_242).unwrap().is_none());
}

#[test]
fn get_by_user_pages_newest_first_without_repeats() {
    let store = store();
    let mut ids = Vec::new();
    for i in 0..15i64 {
        let at = 1_000 + i;
        let id = store
            .create_pending("user-1", Language::Python, at)
            .unwrap();
        store.save(&completed_analysis(id, "user-1", at)).unwrap();
        ids.push(id);
    }
    // Another user's records must not leak in.
    let other = store
        .create_pending("user-2", Language::Python, 99_999)
        .unwrap();
    store.save(&completed_analysis(other, "user-2", 99_999)).unwrap();

    let first_page = store.get_by_user("user-1", 0, 10).unwrap();
    assert_eq!(first_page.len(), 10);
    // Newest first: descending created_at.
    for pair in first_page.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    let second_page = store.get_by_user("user-1", 10, 10).unwrap();
    assert_eq!(second_page.len(), 5);

    let first_ids: Vec<i64> = first_page.iter().map(|a| a.id).collect();
    for record in &second_page {
        assert!(!first_ids.contains(&record.id), "offset pages overlap");
        assert_eq!(record.user_id, "user-1");
    }
}

#[test]
fn get_by_status_filters() {
    let store = store();
    let completed = store
        .create_pending("u", Language::Sql, 1_000)
        .unwrap();
    store.save(&completed_analysis(completed, "u", 1_000)).unwrap();

    let pending = store.create_pending("u", Language::Sql, 2_000).unwrap();

    let completed_rows = store.get_by_status(AnalysisStatus::Completed).unwrap();
    assert_eq!(completed_rows.len(), 1);
    assert_eq!(completed_rows[0].id, completed);

    let pending_rows = store.get_by_status(AnalysisStatus::Pending).unwrap();
    assert_eq!(pending_rows.len(), 1);
    assert_eq!(pending_rows[0].id, pending);
}

#[test]
fn failed_analysis_persists_its_description() {
    let store = store();
    let id = store
        .create_pending("u", Language::JavaScript, 1_000)
        .unwrap();
    let mut analysis = Analysis::pending(id, "u", Language::JavaScript, 1_000);
    analysis.status = AnalysisStatus::Failed;
    analysis.failure = Some("Plugin 'broken' faulted: boom".to_string());
    analysis.security_score = 0.0;
    analysis.global_score = 0.0;
    store.save(&analysis).unwrap();

    let loaded = store.get_with_metrics(id).unwrap().unwrap();
    assert_eq!(loaded.status, AnalysisStatus::Failed);
    assert_eq!(
        loaded.failure.as_deref(),
        Some("Plugin 'broken' faulted: boom")
    );
    assert!(loaded.issues.is_empty());
}

#[test]
fn file_backed_database_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("vigil.db");

    let id = {
        let store = SqliteStore::new(Arc::new(DatabaseManager::open(&path, 5_000).unwrap()));
        let id = store
            .create_pending("user-1", Language::TypeScript, 1_000)
            .unwrap();
        store.save(&completed_analysis(id, "user-1", 1_000)).unwrap();
        id
    };

    let store = SqliteStore::new(Arc::new(DatabaseManager::open(&path, 5_000).unwrap()));
    let loaded = store.get_with_metrics(id).unwrap().unwrap();
    assert_eq!(loaded.status, AnalysisStatus::Completed);
}
