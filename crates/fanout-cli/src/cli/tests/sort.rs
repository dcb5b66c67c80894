use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use fanout_core::sorter::CollisionPolicy;
use std::path::PathBuf;

#[test]
fn cli_parse_sort_defaults() {
    match parse(&["fanout", "sort", "in", "out"]) {
        CliCommand::Sort {
            source_folder,
            output_folder,
            max_tasks,
            on_conflict,
            strict,
        } => {
            assert_eq!(source_folder, PathBuf::from("in"));
            assert_eq!(output_folder, PathBuf::from("out"));
            assert!(max_tasks.is_none());
            assert!(on_conflict.is_none());
            assert!(!strict);
        }
        _ => panic!("expected Sort"),
    }
}

#[test]
fn cli_parse_sort_with_flags() {
    match parse(&[
        "fanout",
        "sort",
        "/data/in",
        "/data/out",
        "--max-tasks",
        "12",
        "--on-conflict",
        "rename",
        "--strict",
    ]) {
        CliCommand::Sort {
            max_tasks,
            on_conflict,
            strict,
            ..
        } => {
            assert_eq!(max_tasks, Some(12));
            assert_eq!(on_conflict, Some(CollisionPolicy::Rename));
            assert!(strict);
        }
        _ => panic!("expected Sort"),
    }
}

#[test]
fn cli_parse_sort_rejects_bad_input() {
    assert!(Cli::try_parse_from(["fanout", "sort", "in"]).is_err());
    assert!(Cli::try_parse_from(["fanout", "sort", "in", "out", "--max-tasks", "-1"]).is_err());
    assert!(
        Cli::try_parse_from(["fanout", "sort", "in", "out", "--on-conflict", "merge"]).is_err()
    );
}

mod strict {
    use crate::cli::commands::{run_sort, SortArgs};
    use fanout_core::sorter::CollisionPolicy;
    use std::path::Path;

    /// Source with `a.txt` and `b.md`; output already holds a regular file
    /// named `txt`, so the copy of `a.txt` fails and `b.md` succeeds.
    fn one_failing_copy(src: &Path, out: &Path) {
        std::fs::write(src.join("a.txt"), b"a").unwrap();
        std::fs::write(src.join("b.md"), b"b").unwrap();
        std::fs::write(out.join("txt"), b"in the way").unwrap();
    }

    fn args(src: &Path, out: &Path, strict: bool) -> SortArgs {
        SortArgs {
            source: src.to_path_buf(),
            output: out.to_path_buf(),
            max_tasks: 2,
            on_conflict: CollisionPolicy::Overwrite,
            strict,
        }
    }

    #[tokio::test]
    async fn item_failure_is_ok_without_strict() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        one_failing_copy(src.path(), out.path());

        run_sort(&args(src.path(), out.path(), false)).await.unwrap();
        assert!(out.path().join("md/b.md").is_file());
    }

    #[tokio::test]
    async fn item_failure_is_error_with_strict() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        one_failing_copy(src.path(), out.path());

        let err = run_sort(&args(src.path(), out.path(), true)).await.unwrap_err();
        assert_eq!(err.to_string(), "1 file(s) failed to copy");
        assert!(out.path().join("md/b.md").is_file());
    }

    #[tokio::test]
    async fn clean_run_is_ok_with_strict() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join("a.txt"), b"a").unwrap();

        run_sort(&args(src.path(), out.path(), true)).await.unwrap();
    }

    #[tokio::test]
    async fn missing_source_is_error_without_strict() {
        let out = tempfile::tempdir().unwrap();
        let missing = out.path().join("missing");
        assert!(run_sort(&args(&missing, out.path(), false)).await.is_err());
    }
}
