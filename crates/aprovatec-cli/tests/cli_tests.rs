//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn aprovatec() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("aprovatec").unwrap();
    cmd.env_remove("APROVATEC_API_URL")
        .env_remove("APROVATEC_PASSWORD");
    cmd
}

/// A config file whose session lives inside the temp dir.
fn isolated_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("aprovatec.toml");
    std::fs::write(
        &path,
        format!(
            "api_url = \"http://127.0.0.1:9\"\ntimeout_secs = 2\nsession_file = \"{}\"\n",
            dir.path().join("session.json").display()
        ),
    )
    .unwrap();
    path
}

#[test]
fn evaluate_complete_semester() {
    aprovatec()
        .arg("evaluate")
        .arg("../../semesters/2025-1.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Semester 2025.1 (2 disciplines)"))
        .stdout(predicate::str::contains("7.60"))
        .stdout(predicate::str::contains("Semester average: 7.36 | Aprovado"));
}

#[test]
fn evaluate_in_progress_semester() {
    aprovatec()
        .arg("evaluate")
        .arg("../../semesters/2025-2.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reprovado por falta"))
        .stdout(predicate::str::contains("Em risco"))
        .stdout(predicate::str::contains("needs 7.00"))
        .stdout(predicate::str::contains("Semester average: — | Reprovado"));
}

#[test]
fn evaluate_json_output() {
    let output = aprovatec()
        .arg("evaluate")
        .arg("../../semesters/2025-1.toml")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["year"], 2025);
    assert_eq!(json["term"], 1);
    assert_eq!(json["evaluation"]["average"], 7.36);
    assert_eq!(json["evaluation"]["approved"], true);
    assert_eq!(json["evaluation"]["disciplines"][0]["status"], "APROVADO");
    assert_eq!(json["evaluation"]["disciplines"][0]["limitAbsences"], 15.0);
}

#[test]
fn evaluate_directory() {
    aprovatec()
        .arg("evaluate")
        .arg("../../semesters")
        .assert()
        .success()
        .stdout(predicate::str::contains("Semester 2025.1"))
        .stdout(predicate::str::contains("Semester 2025.2"));
}

#[test]
fn evaluate_saves_report() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("report.json");

    aprovatec()
        .arg("evaluate")
        .arg("../../semesters/2025-1.toml")
        .arg("--output")
        .arg(&report)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report saved to"));

    let loaded = aprovatec_core::report::SemesterReport::load_json(&report).unwrap();
    assert_eq!(loaded.label(), "2025.1");
    assert_eq!(loaded.evaluation.average, Some(7.36));
}

#[test]
fn evaluate_warns_about_coerced_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s.toml");
    std::fs::write(
        &path,
        "[semester]\nyear = 2025\nterm = 1\n\n[[disciplines]]\nname = \"BD\"\nworkload = 60\nav1 = \"7,5\"\n",
    )
    .unwrap();

    aprovatec()
        .arg("evaluate")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("AV1 '7,5' is not a number"));
}

#[test]
fn validate_directory() {
    aprovatec()
        .arg("validate")
        .arg("../../semesters")
        .assert()
        .success()
        .stdout(predicate::str::contains("Semester: 2025.1 (2 disciplines)"))
        .stdout(predicate::str::contains("Semester: 2025.2 (2 disciplines)"))
        .stdout(predicate::str::contains("All semesters valid"));
}

#[test]
fn validate_rejects_missing_workload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        "[semester]\nyear = 2025\nterm = 1\n\n[[disciplines]]\nname = \"Física\"\n",
    )
    .unwrap();

    aprovatec()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Informe a carga horária de todas as disciplinas.",
        ))
        .stderr(predicate::str::contains("cannot be saved"));
}

#[test]
fn validate_nonexistent_file() {
    aprovatec()
        .arg("validate")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn save_rejects_invalid_semester_before_contacting_backend() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(&dir);
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        "[semester]\nyear = 2025\nterm = 1\n\n[[disciplines]]\nworkload = 40\n",
    )
    .unwrap();

    aprovatec()
        .arg("--config")
        .arg(&config)
        .arg("save")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Informe o nome de todas as disciplinas."));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    aprovatec()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created aprovatec.toml"))
        .stdout(predicate::str::contains("Created semesters/example.toml"));

    assert!(dir.path().join("aprovatec.toml").exists());
    assert!(dir.path().join("semesters/example.toml").exists());

    aprovatec()
        .current_dir(dir.path())
        .arg("validate")
        .arg("semesters/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All semesters valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    aprovatec()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    aprovatec()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn list_requires_login() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(&dir);

    aprovatec()
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn logout_without_session() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(&dir);

    aprovatec()
        .arg("--config")
        .arg(&config)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn login_requires_password() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(&dir);

    aprovatec()
        .arg("--config")
        .arg(&config)
        .arg("login")
        .arg("--email")
        .arg("ana@example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no password given"));
}

#[test]
fn export_semester_html() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("semestre.html");

    aprovatec()
        .arg("export")
        .arg("../../semesters/2025-1.toml")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML report"));

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("Semestre 2025.1"));
    assert!(html.contains("Cálculo I"));
}

#[test]
fn help_output() {
    aprovatec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Semester grade and attendance tracker"));
}

#[test]
fn version_output() {
    aprovatec()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("aprovatec"));
}
