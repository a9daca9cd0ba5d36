pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS roadmaps (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    service_line TEXT NOT NULL,
    file_name TEXT NOT NULL,
    document TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_roadmaps_name ON roadmaps(name);
CREATE INDEX IF NOT EXISTS idx_roadmaps_created ON roadmaps(created_at, id);
"#;
