//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ESSAY: &str = "Nowadays, many people use cars every day and it is a big problem.

Furthermore, cars make air dirty. Moreover, roads get crowded in the morning.

However, public transport can help people move around without adding much pollution.

In conclusion, governments should invest in buses and trains for the future.
";

/// A command isolated from the user's config files and environment.
fn bandwise(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("bandwise").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("BANDWISE_SEED")
        .env_remove("BANDWISE_LATENCY_MS");
    cmd
}

fn grade_json(dir: &TempDir, task: &str, stdin: &str) -> serde_json::Value {
    let output = bandwise(dir)
        .args(["grade", "--task", task, "--format", "json"])
        .args(["--latency-ms", "0", "--seed", "7"])
        .write_stdin(stdin)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn grade_stdin_as_json() {
    let dir = TempDir::new().unwrap();
    let report = grade_json(&dir, "task2", ESSAY);

    assert_eq!(report["task_type"], "task2");
    let entry = &report["entries"][0];
    assert_eq!(entry["name"], "<stdin>");
    let result = &entry["result"];
    for key in [
        "taskAchievement",
        "coherenceAndCohesion",
        "lexicalResource",
        "grammaticalRangeAndAccuracy",
    ] {
        let score = result[key]["score"].as_f64().unwrap();
        assert!((4.0..=9.0).contains(&score), "{key} out of range: {score}");
    }
    assert!(result["improvedVersion"].as_str().unwrap().len() > 150);
}

#[test]
fn grade_short_task1_mentions_word_counts() {
    let dir = TempDir::new().unwrap();
    let report = grade_json(&dir, "task1", "The chart shows sales rising over ten years.");
    let feedback = report["entries"][0]["result"]["taskAchievement"]["feedback"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(feedback.contains("8 words"));
    assert!(feedback.contains("150 words"));
}

#[test]
fn grade_is_repeatable_with_seed() {
    let dir = TempDir::new().unwrap();
    let a = grade_json(&dir, "task2", ESSAY);
    let b = grade_json(&dir, "task2", ESSAY);
    assert_eq!(a["entries"][0]["result"], b["entries"][0]["result"]);
}

#[test]
fn grade_files_as_markdown() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("one.txt"), ESSAY).unwrap();
    std::fs::write(dir.path().join("two.txt"), "Short answer.").unwrap();

    bandwise(&dir)
        .args(["grade", "--task", "task2", "--format", "markdown", "--latency-ms", "0"])
        .args(["one.txt", "two.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Grading report (task2)"))
        .stdout(predicate::str::contains("## one.txt"))
        .stdout(predicate::str::contains("## two.txt"))
        .stdout(predicate::str::contains("### Improved version"));
}

#[test]
fn grade_text_output_has_table() {
    let dir = TempDir::new().unwrap();
    bandwise(&dir)
        .args(["grade", "--task", "task2", "--latency-ms", "0"])
        .write_stdin(ESSAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Coherence and Cohesion"))
        .stdout(predicate::str::contains("Improved version:"))
        .stderr(predicate::str::contains("Complete: 1/1 graded"));
}

#[test]
fn grade_blank_stdin_fails() {
    let dir = TempDir::new().unwrap();
    bandwise(&dir)
        .args(["grade", "--task", "task1", "--latency-ms", "0"])
        .write_stdin("   \n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Rejected: response text is empty"))
        .stderr(predicate::str::contains("no response could be graded"));
}

#[test]
fn grade_unknown_task_fails() {
    let dir = TempDir::new().unwrap();
    bandwise(&dir)
        .args(["grade", "--task", "task3", "--latency-ms", "0"])
        .write_stdin(ESSAY)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid task type 'task3'"));
}

#[test]
fn grade_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    bandwise(&dir)
        .args(["grade", "--task", "task1", "--format", "html"])
        .write_stdin(ESSAY)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'html'"));
}

#[test]
fn grade_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    bandwise(&dir)
        .args(["grade", "--task", "task1", "--latency-ms", "0", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read response: missing.txt"));
}

#[test]
fn grade_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    bandwise(&dir)
        .args(["grade", "--config", "nope.toml"])
        .write_stdin(ESSAY)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn grade_uses_default_task_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bandwise.toml"),
        "default_task = \"task1\"\nsimulated_latency_ms = 0\n",
    )
    .unwrap();

    let output = bandwise(&dir)
        .args(["grade", "--format", "json"])
        .write_stdin(ESSAY)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["task_type"], "task1");
}

#[test]
fn prompt_json() {
    let dir = TempDir::new().unwrap();
    let output = bandwise(&dir)
        .args(["prompt", "--task", "task1", "--format", "json", "--seed", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let question: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(question["title"], "Task 1: Academic Writing");
    assert_eq!(question["timeLimitSecs"], 1200);
}

#[test]
fn prompt_text_is_repeatable_with_seed() {
    let dir = TempDir::new().unwrap();
    let run = || {
        bandwise(&dir)
            .args(["prompt", "--task", "task2", "--seed", "11"])
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    assert!(String::from_utf8_lossy(&first).starts_with("Task 2: Essay"));
    assert_eq!(first, run());
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    bandwise(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created bandwise.toml"))
        .stdout(predicate::str::contains("Created responses/sample-task2.txt"));

    assert!(dir.path().join("bandwise.toml").exists());
    assert!(dir.path().join("responses/sample-task2.txt").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    bandwise(&dir).arg("init").assert().success();

    bandwise(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_then_grade_sample() {
    let dir = TempDir::new().unwrap();
    bandwise(&dir).arg("init").assert().success();

    bandwise(&dir)
        .args(["grade", "--task", "task2", "--latency-ms", "0"])
        .arg("responses/sample-task2.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("== responses/sample-task2.txt"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    bandwise(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing-exam practice grader"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    bandwise(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bandwise"));
}
