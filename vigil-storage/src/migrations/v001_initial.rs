//! V001: Initial schema — analyses, history, usage counters.

pub const MIGRATION_SQL: &str = r#"
-- Full analysis records. Issues, metrics, and suggestions are JSON columns
-- written in the same row, so a reader sees all of a record or none of it.
CREATE TABLE IF NOT EXISTS analyses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    language TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    metrics TEXT NOT NULL DEFAULT '{}',
    issues TEXT NOT NULL DEFAULT '[]',
    suggestions TEXT NOT NULL DEFAULT '[]',
    security_score REAL NOT NULL DEFAULT 10.0,
    complexity_score REAL NOT NULL DEFAULT 10.0,
    performance_score REAL NOT NULL DEFAULT 10.0,
    quality_score REAL NOT NULL DEFAULT 1.0,
    global_score REAL NOT NULL DEFAULT 10.0,
    failure TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_analyses_user
    ON analyses(user_id, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_analyses_status
    ON analyses(status);

-- History: append-only log, one row per terminal analysis.
CREATE TABLE IF NOT EXISTS history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    analyzer TEXT NOT NULL,
    issues_count INTEGER NOT NULL DEFAULT 0,
    complexity REAL NOT NULL DEFAULT 0.0,
    score REAL NOT NULL DEFAULT 0.0,
    created_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_history_time
    ON history(created_at DESC);

-- Usage counters: a single totals row plus two breakdown tables,
-- updated in the same transaction as the history append.
CREATE TABLE IF NOT EXISTS usage_totals (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    total_analyses INTEGER NOT NULL DEFAULT 0,
    errors INTEGER NOT NULL DEFAULT 0,
    last_analysis_at INTEGER
) STRICT;

INSERT OR IGNORE INTO usage_totals (id) VALUES (1);

CREATE TABLE IF NOT EXISTS usage_by_analyzer (
    analyzer TEXT PRIMARY KEY,
    count INTEGER NOT NULL DEFAULT 0
) STRICT;

CREATE TABLE IF NOT EXISTS usage_by_date (
    date TEXT PRIMARY KEY,
    count INTEGER NOT NULL DEFAULT 0
) STRICT;
"#;
