//! Integration tests for the `wander` binary commands that need no database.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

use wander_core::draft::parse_draft_toml;

const DRAFT: &str = r#"
[destination]
name = "Lisbon, Portugal"
lat = 38.72
lng = -9.14

[dates]
start = 2024-06-05
end = 2024-06-15

[preferences]
travelers = 2
budget = "moderate"
activity = "balanced"
"#;

/// Run `wander` with its config directory pointed at `home`.
fn wander(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wander"))
        .args(args)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("WANDER_DATABASE_URL")
        .env_remove("WANDER_USER_ID")
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run wander binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn steps_lists_the_standard_flow() {
    let home = TempDir::new().unwrap();
    let out = wander(home.path(), &["steps"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6, "unexpected output: {text}");
    assert!(lines[0].contains("WhereTo"));
    assert!(lines[5].contains("GenerateTrip"));
}

#[test]
fn steps_at_reports_position_and_neighbours() {
    let home = TempDir::new().unwrap();
    let out = wander(home.path(), &["steps", "--at", "WhosGoing"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("WhosGoing: Step 3 of 6"), "unexpected output: {text}");
    assert!(text.contains("back: ChooseDate"), "unexpected output: {text}");
    assert!(text.contains("next: MoreInfo"), "unexpected output: {text}");

    let out = wander(home.path(), &["steps", "--at", "WhereTo"]);
    assert!(stdout(&out).contains("back: exit to trip list"));
}

#[test]
fn steps_at_lists_choices_with_descriptions() {
    let home = TempDir::new().unwrap();
    let out = wander(home.path(), &["steps", "--at", "MoreInfo"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("Moderate  Keep cost on the average side"), "unexpected output: {text}");
    assert!(text.contains("Relaxed   Slow mornings"), "unexpected output: {text}");

    let out = wander(home.path(), &["steps", "--at", "WhosGoing"]);
    assert!(stdout(&out).contains("Couple    Two travelers in tandem"));
}

#[test]
fn steps_at_unknown_step_fails() {
    let home = TempDir::new().unwrap();
    let out = wander(home.path(), &["steps", "--at", "Payment"]);
    assert!(!out.status.success());
    assert!(
        stderr(&out).contains("unknown wizard step"),
        "unexpected stderr: {}",
        stderr(&out)
    );
}

#[test]
fn init_writes_config_once() {
    let home = TempDir::new().unwrap();
    let out = wander(
        home.path(),
        &[
            "init",
            "--user-id",
            "alice",
            "--db-url",
            "postgresql://db.example:5432/wander",
            "--generator",
            "planner",
            "--generator-arg",
            "--json",
        ],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let written = std::fs::read_to_string(home.path().join("wander/config.toml")).unwrap();
    assert!(written.contains("id = \"alice\""), "unexpected config: {written}");
    assert!(written.contains("postgresql://db.example:5432/wander"));
    assert!(written.contains("command = \"planner\""));

    let again = wander(home.path(), &["init", "--user-id", "bob"]);
    assert!(!again.status.success());
    assert!(stderr(&again).contains("already exists"));

    let forced = wander(home.path(), &["init", "--user-id", "bob", "--force"]);
    assert!(forced.status.success(), "stderr: {}", stderr(&forced));
}

#[test]
fn template_output_is_a_valid_draft() {
    let home = TempDir::new().unwrap();
    let out = wander(home.path(), &["trip", "template", "--today", "2024-06-01"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let request = parse_draft_toml(&stdout(&out)).expect("template should parse");
    assert_eq!(request.destination.name, "Lisbon, Portugal");
    assert_eq!(request.start_date.to_string(), "2024-06-08");
    assert_eq!(request.end_date.to_string(), "2024-06-12");
}

#[test]
fn prompt_renders_draft_file() {
    let home = TempDir::new().unwrap();
    let draft = home.path().join("trip.toml");
    std::fs::write(&draft, DRAFT).unwrap();

    let out = wander(
        home.path(),
        &["trip", "prompt", draft.to_str().unwrap(), "--today", "2024-06-01"],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Lisbon, Portugal"), "unexpected output: {text}");
    assert!(text.contains("(11 days, 10 nights)"), "unexpected output: {text}");
    assert!(text.contains("**Travelers:** Couple"), "unexpected output: {text}");
}

#[test]
fn prompt_rejects_invalid_drafts() {
    let home = TempDir::new().unwrap();
    let draft = home.path().join("trip.toml");

    std::fs::write(&draft, DRAFT).unwrap();
    let out = wander(
        home.path(),
        &["trip", "prompt", draft.to_str().unwrap(), "--today", "2024-06-10"],
    );
    assert!(!out.status.success());
    assert!(stderr(&out).contains("in the past"), "unexpected stderr: {}", stderr(&out));

    std::fs::write(&draft, DRAFT.replace("budget = \"moderate\"", "budget = \"frugal\"")).unwrap();
    let out = wander(
        home.path(),
        &["trip", "prompt", draft.to_str().unwrap(), "--today", "2024-06-01"],
    );
    assert!(!out.status.success());
    assert!(stderr(&out).contains("frugal"), "unexpected stderr: {}", stderr(&out));
}

#[test]
fn help_lists_every_command() {
    let home = TempDir::new().unwrap();
    let out = wander(home.path(), &["--help"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    for command in ["init", "db-init", "trip", "current", "suggest", "steps"] {
        assert!(text.contains(command), "missing {command} in: {text}");
    }
}
