use super::*;
use std::fs;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_defaults() {
    let cli = parse(&["sumlog", "a.txt", "b.txt"]);
    assert!(!cli.stdout);
    assert!(!cli.checksum_only);
    assert!(cli.output.is_none());
    assert!(!cli.ordered);
    assert!(cli.max_open.is_none());
    assert_eq!(cli.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
}

#[test]
fn cli_parse_short_flags() {
    let cli = parse(&["sumlog", "-i", "-c", "-o", "sums.log", "x.bin"]);
    assert!(cli.stdout);
    assert!(cli.checksum_only);
    assert_eq!(cli.output.as_deref(), Some("sums.log"));
    assert_eq!(cli.files, vec![PathBuf::from("x.bin")]);
}

#[test]
fn cli_parse_combined_short_flags() {
    let cli = parse(&["sumlog", "-ic", "x.bin"]);
    assert!(cli.stdout);
    assert!(cli.checksum_only);
}

#[test]
fn cli_parse_long_options() {
    let cli = parse(&["sumlog", "--ordered", "--max-open", "8", "x.bin"]);
    assert!(cli.ordered);
    assert_eq!(cli.max_open, Some(8));
}

#[test]
fn cli_parse_no_files_is_allowed() {
    let cli = parse(&["sumlog", "-i"]);
    assert!(cli.files.is_empty());
}

#[test]
fn cli_parse_rejects_bad_max_open() {
    assert!(Cli::try_parse_from(["sumlog", "--max-open", "many", "x"]).is_err());
}

#[test]
fn run_config_output_next_to_executable() {
    let cli = parse(&["sumlog", "x.bin"]);
    let cfg = cli.run_config(&SumlogConfig::default(), Path::new("/opt/tools/sumlog"));
    assert_eq!(cfg.output, PathBuf::from("/opt/tools/checksum.txt"));
    assert_eq!(cfg.max_open_files, config::DEFAULT_MAX_OPEN_FILES);
    assert!(!cfg.emit_stdout);
}

#[test]
fn run_config_flags_override_file_defaults() {
    let defaults = SumlogConfig {
        output_name: "from-file.txt".to_string(),
        max_open_files: 4,
        ordered: true,
    };
    let exe = Path::new("/opt/tools/sumlog");

    let cfg = parse(&["sumlog", "x"]).run_config(&defaults, exe);
    assert_eq!(cfg.output, PathBuf::from("/opt/tools/from-file.txt"));
    assert_eq!(cfg.max_open_files, 4);
    assert!(cfg.ordered);

    let cli = parse(&["sumlog", "-o", "flag.txt", "--max-open", "2", "x"]);
    let cfg = cli.run_config(&defaults, exe);
    assert_eq!(cfg.output, PathBuf::from("/opt/tools/flag.txt"));
    assert_eq!(cfg.max_open_files, 2);
}

fn args_for(files: &[&Path], flags: &[&str]) -> Cli {
    let mut argv: Vec<String> = vec!["sumlog".to_string()];
    argv.extend(flags.iter().map(|f| f.to_string()));
    argv.extend(files.iter().map(|p| p.display().to_string()));
    Cli::try_parse_from(argv).unwrap()
}

#[tokio::test]
async fn execute_appends_to_log_next_to_executable() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("sumlog");
    fs::write(&exe, "binary").unwrap();
    let data = dir.path().join("data.txt");
    fs::write(&data, "hello").unwrap();

    let cli = args_for(&[data.as_path(), exe.as_path()], &[]);
    for _ in 0..2 {
        let summary = execute(&cli, &SumlogConfig::default(), &exe)
            .await
            .unwrap()
            .unwrap();
        // Own executable is skipped, only data.txt is hashed.
        assert_eq!(summary.files, 1);
        assert_eq!(summary.lines_written, 1);
    }

    let log = fs::read_to_string(dir.path().join("checksum.txt")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], lines[1]);
    assert!(lines[0].ends_with(&format!(" - {}", data.display())));
    assert!(!log.contains("sumlog -"));
}

#[tokio::test]
async fn execute_stdout_creates_no_log() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("sumlog");
    let data = dir.path().join("data.txt");
    fs::write(&data, "hello").unwrap();

    let cli = args_for(&[data.as_path()], &["-i", "-c"]);
    let summary = execute(&cli, &SumlogConfig::default(), &exe)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.succeeded, 1);
    assert!(!dir.path().join("checksum.txt").exists());
}

#[tokio::test]
async fn execute_without_candidates_creates_no_log() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("sumlog");
    let missing = dir.path().join("missing.txt");

    let cli = args_for(&[missing.as_path(), dir.path()], &[]);
    let outcome = execute(&cli, &SumlogConfig::default(), &exe).await.unwrap();
    assert!(outcome.is_none());
    assert!(!dir.path().join("checksum.txt").exists());
}

#[tokio::test]
async fn execute_fails_fast_when_log_cannot_be_opened() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("sumlog");
    let data = dir.path().join("data.txt");
    fs::write(&data, "hello").unwrap();

    let cli = args_for(&[data.as_path()], &["-o", "no-such-dir/checksum.txt"]);
    let err = execute(&cli, &SumlogConfig::default(), &exe)
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("failed to open checksum log"));
}
