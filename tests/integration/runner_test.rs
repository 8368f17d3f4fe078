//! Runner integration tests.
//!
//! Drives scripts on disk through the mock executor.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use sql_rpc_runner::error::RunnerError;
use sql_rpc_runner::rpc::MockExecutor;
use sql_rpc_runner::runner::{self, StatementRunner, Summary};
use sql_rpc_runner::script::SplitMode;
use tempfile::TempDir;

/// Writes `sql` to a script file in a fresh temp dir.
fn write_script(sql: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.sql");
    std::fs::write(&path, sql).unwrap();
    (dir, path)
}

async fn run_script(mock: &MockExecutor, path: &Path, mode: SplitMode) -> (Summary, String) {
    let mut runner = StatementRunner::new(mock, Vec::new());
    let summary = runner.run(path, mode).await.unwrap();
    (summary, String::from_utf8(runner.into_inner()).unwrap())
}

#[tokio::test]
async fn test_unreadable_script_sends_nothing() {
    let mock = MockExecutor::new();
    let mut runner = StatementRunner::new(&mock, Vec::new());

    let err = runner
        .run(Path::new("/no/such/dir/fix.sql"), SplitMode::Statement)
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::FileAccess { .. }));
    assert!(mock.calls().is_empty());
    assert!(runner.into_inner().is_empty());
}

#[tokio::test]
async fn test_non_utf8_script_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.sql");
    std::fs::write(&path, [b'S', b'E', b'L', 0xff, b';']).unwrap();

    let mock = MockExecutor::new();
    let mut runner = StatementRunner::new(&mock, Vec::new());
    assert!(runner.run(&path, SplitMode::Naive).await.is_err());
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_naive_count_matches_fragments() {
    let scripts = [
        "SELECT 1;SELECT 2;SELECT 3;",
        ";;\n;  SELECT 1 ;\n-- only a comment\n;",
        "INSERT INTO t VALUES ('a;b');",
        "-- header\nCREATE TABLE t(a int);\nALTER TABLE t ADD COLUMN b int",
    ];

    for sql in scripts {
        let expected: Vec<&str> = sql
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.starts_with("--"))
            .collect();

        let (_dir, path) = write_script(sql);
        let mock = MockExecutor::new();
        let (summary, _) = run_script(&mock, &path, SplitMode::Naive).await;

        assert_eq!(summary.total, expected.len(), "script: {sql:?}");
        assert_eq!(mock.calls(), expected, "script: {sql:?}");
    }
}

#[tokio::test]
async fn test_naive_never_sends_comment_prefixed_fragments() {
    let (_dir, path) = write_script("CREATE TABLE t(a int);\n-- a comment\nALTER TABLE t ADD COLUMN b int;");
    let mock = MockExecutor::new();
    let (summary, out) = run_script(&mock, &path, SplitMode::Naive).await;

    assert_eq!(mock.calls(), vec!["CREATE TABLE t(a int)"]);
    assert_eq!(summary, Summary { succeeded: 1, total: 1 });
    assert!(out.contains("1/1 statements executed successfully"));
    assert!(mock.calls().iter().all(|sql| !sql.trim().starts_with("--")));
}

#[tokio::test]
async fn test_statement_mode_example_scenario() {
    let (_dir, path) = write_script("CREATE TABLE t(a int);\n-- a comment\nALTER TABLE t ADD COLUMN b int;");
    let mock = MockExecutor::new();
    let (summary, out) = run_script(&mock, &path, SplitMode::Statement).await;

    assert_eq!(
        mock.calls(),
        vec!["CREATE TABLE t(a int)", "ALTER TABLE t ADD COLUMN b int"]
    );
    assert_eq!(summary, Summary { succeeded: 2, total: 2 });
    assert!(out.starts_with("Applying "));
    assert!(out.contains("2/2 statements executed successfully"));
    assert!(out.ends_with("🎉 Database fix applied successfully!\n"));
}

#[tokio::test]
async fn test_statement_mode_keeps_function_bodies_whole() {
    let sql = r#"
CREATE OR REPLACE FUNCTION public.handle_new_user()
RETURNS trigger AS $$
BEGIN
  INSERT INTO public.profiles (id, email) VALUES (NEW.id, NEW.email);
  RETURN NEW;
END;
$$ LANGUAGE plpgsql SECURITY DEFINER;

DROP TRIGGER IF EXISTS on_auth_user_created ON auth.users;
"#;
    let (_dir, path) = write_script(sql);
    let mock = MockExecutor::new();
    let (summary, _) = run_script(&mock, &path, SplitMode::Statement).await;

    assert_eq!(summary.total, 2);
    let calls = mock.calls();
    assert!(calls[0].contains("RETURN NEW;"));
    assert_eq!(
        calls[1],
        "DROP TRIGGER IF EXISTS on_auth_user_created ON auth.users"
    );
}

#[tokio::test]
async fn test_order_is_preserved() {
    let sql: String = (1..=20).map(|i| format!("SELECT {i};\n")).collect();
    let (_dir, path) = write_script(&sql);
    let mock = MockExecutor::new();
    run_script(&mock, &path, SplitMode::Statement).await;

    let expected: Vec<String> = (1..=20).map(|i| format!("SELECT {i}")).collect();
    assert_eq!(mock.calls(), expected);
}

#[tokio::test]
async fn test_rerun_resends_every_statement() {
    let (_dir, path) = write_script("CREATE TABLE foo(a int);");
    let mock = MockExecutor::new()
        .with_response(200, "")
        .with_response(400, r#"{"message":"relation \"foo\" already exists"}"#);

    let (first, _) = run_script(&mock, &path, SplitMode::Statement).await;
    let (second, out) = run_script(&mock, &path, SplitMode::Statement).await;

    assert!(first.all_succeeded());
    assert!(!second.all_succeeded());
    assert_eq!(mock.calls().len(), 2);
    assert!(out.contains("already exists"));
}

#[tokio::test]
async fn test_empty_script_reports_zero_of_zero() {
    let (_dir, path) = write_script("-- nothing to do\n");
    let mock = MockExecutor::new();
    let (summary, out) = run_script(&mock, &path, SplitMode::Statement).await;

    assert_eq!(summary, Summary::default());
    assert!(out.contains("0/0 statements executed successfully"));
    assert!(mock.calls().is_empty());
}

#[test]
fn test_plan_lists_statements_without_sending() {
    let (_dir, path) = write_script("CREATE TABLE t(a int);\nDROP TABLE old_t;\nSELECT 1;");
    let mut out = Vec::new();

    let statements = runner::plan(&path, SplitMode::Statement, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(statements.len(), 3);
    assert!(out.contains("[1/3] line 1 CREATE (Destructive): CREATE TABLE t(a int)"));
    assert!(out.contains("[2/3] line 2 DROP (Destructive): DROP TABLE old_t"));
    assert!(out.contains("[3/3] line 3 SELECT (Safe): SELECT 1"));
    assert!(out.contains("3 statements would be executed"));
}

#[test]
fn test_plan_flags_unparsable_statements_as_destructive() {
    let (_dir, path) = write_script("CREATE POLICY owner_only ON profiles USING (auth.uid() = id);");
    let mut out = Vec::new();

    runner::plan(&path, SplitMode::Statement, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("(Destructive): CREATE POLICY owner_only"), "{out}");
}

#[test]
fn test_plan_missing_script() {
    let err = runner::plan(Path::new("/no/such.sql"), SplitMode::Statement, Vec::new()).unwrap_err();
    assert!(matches!(err, RunnerError::FileAccess { .. }));
}
