//! SQL schema for the Mentora SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS mentors (
    mentor_id   TEXT PRIMARY KEY,
    name        TEXT,
    email       TEXT
);

-- mentor_id is an advisory reference: no FOREIGN KEY to mentors.
CREATE TABLE IF NOT EXISTS students (
    student_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    mentor_id   TEXT                 -- NULL = unassigned
);

-- Append-only. history_id order is insertion order.
CREATE TABLE IF NOT EXISTS mentor_history (
    history_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id  TEXT NOT NULL REFERENCES students(student_id),
    mentor_id   TEXT NOT NULL,       -- the mentor that was replaced
    assigned_at TEXT NOT NULL        -- ISO 8601 UTC
);

CREATE INDEX IF NOT EXISTS students_mentor_idx ON students(mentor_id);
CREATE INDEX IF NOT EXISTS history_student_idx ON mentor_history(student_id);

PRAGMA user_version = 1;
";
