use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn qv_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("qv-etl");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(
        data_dir.join("surahs.json"),
        r#"[
  {"id": 1, "name_english": "The Opener"},
  {"id": 112, "name_english": "The Sincerity"}
]"#,
    )
    .unwrap();

    fs::write(
        data_dir.join("ayahs_full.json"),
        r#"[
  {"surah_id": 1, "ayah_number": 1, "text": "بِسْمِ ٱللَّهِ"},
  {"surah_id": 1, "ayah_number": 2},
  {"surah_id": 1, "ayah_number": 3},
  {"surah_id": 1, "ayah_number": 4},
  {"surah_id": 112, "ayah_number": 2},
  {"surah_id": 112, "ayah_number": 1}
]"#,
    )
    .unwrap();

    fs::write(
        root.join("abridged-explanation-of-the-quran.json"),
        r#"{
  "1:1": "I begin with the name of Allah, the Most Merciful. This is how a believer starts.",
  "1:2": {"text": "All praise and thanks belong to Allah alone."},
  "1:3": "He is the Compassionate.",
  "1:4": "He alone is the Master of the Day of Judgement.",
  "112:1": "Say: He is Allah, the One. This is the essence of tawhid.",
  "112:2": "Allah is the one to whom all turn in need."
}"#,
    )
    .unwrap();

    let config_content = format!(
        r#"[inputs]
commentary = "{0}/abridged-explanation-of-the-quran.json"
ayahs = "{0}/data/ayahs_full.json"
surahs = "{0}/data/surahs.json"

[output]
lessons = "{0}/data/daily_lessons.json"
"#,
        root.display()
    );

    let config_path = config_dir.join("lessons.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_qv(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = qv_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run qv-etl binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn lessons_path(tmp: &TempDir) -> PathBuf {
    tmp.path().join("data/daily_lessons.json")
}

fn read_lessons(path: &Path) -> Vec<serde_json::Value> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_build_writes_lessons() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_qv(&config_path, &["build", "--progress", "off"]);
    assert!(success, "build failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Wrote 3 lessons"));
    assert!(stdout.contains("sha256: "));
    assert!(stdout.contains("ok"));

    let lessons = read_lessons(&lessons_path(&tmp));
    assert_eq!(lessons.len(), 3);

    let first = &lessons[0];
    assert_eq!(first["id"], "DL-000001");
    assert_eq!(first["dayIndex"], 0);
    assert_eq!(first["surahId"], 1);
    assert_eq!(first["ayahStart"], 1);
    assert_eq!(first["ayahEnd"], 3);
    assert_eq!(first["verseKeys"], serde_json::json!(["1:1", "1:2", "1:3"]));
    assert_eq!(first["title"], "I begin with the name of Allah, the Most Merciful.");
    assert_eq!(
        first["tags"],
        serde_json::json!(["mercy", "gratitude"])
    );
    assert_eq!(first["source"]["dataset"], "QUL");

    let last = &lessons[2];
    assert_eq!(last["id"], "DL-000003");
    assert_eq!(last["dayIndex"], 2);
    assert_eq!(last["verseKeys"], serde_json::json!(["112:1", "112:2"]));
    assert_eq!(last["tags"], serde_json::json!(["tawheed"]));
    assert_eq!(
        last["takeaways"],
        serde_json::json!([
            "This is the essence of tawhid.",
            "Allah is the one to whom all turn in need."
        ])
    );
}

#[test]
fn test_build_is_byte_identical() {
    let (tmp, config_path) = setup_test_env();
    let path = lessons_path(&tmp);

    run_qv(&config_path, &["build", "--progress", "off"]);
    let first = fs::read(&path).unwrap();
    run_qv(&config_path, &["build", "--progress", "off"]);
    let second = fs::read(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_build_dry_run_writes_nothing() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_qv(&config_path, &["build", "--dry-run"]);
    assert!(success);
    assert!(stdout.contains("dry-run"));
    assert!(stdout.contains("lessons: 3"));
    assert!(!lessons_path(&tmp).exists());
}

#[test]
fn test_build_json_progress_on_stderr() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_qv(&config_path, &["build", "--progress", "json"]);
    assert!(success);
    let events: Vec<serde_json::Value> = stderr
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.len(), 1 + 114);
    assert_eq!(events[0]["phase"], "loaded");
    assert_eq!(events[0]["ayahs"], 6);
    assert_eq!(events[0]["commentary"], 6);
    assert_eq!(events[0]["with_text"], 6);
    assert_eq!(events[0]["surahs"], 2);
    assert_eq!(events[114]["surah"], 114);
    assert_eq!(events[114]["total"], 3);
}

#[test]
fn test_missing_input_is_fatal_and_writes_nothing() {
    let (tmp, config_path) = setup_test_env();
    fs::remove_file(tmp.path().join("data/surahs.json")).unwrap();

    let (_, stderr, success) = run_qv(&config_path, &["build"]);
    assert!(!success);
    assert!(stderr.contains("Missing"));
    assert!(stderr.contains("surahs.json"));
    assert!(!lessons_path(&tmp).exists());
}

#[test]
fn test_validate_after_build() {
    let (_tmp, config_path) = setup_test_env();
    run_qv(&config_path, &["build", "--progress", "off"]);

    let (stdout, stderr, success) = run_qv(&config_path, &["validate", "--min-lessons", "3"]);
    assert!(success, "validate failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Validated 3 lessons"));
}

#[test]
fn test_validate_default_minimum_rejects_small_file() {
    let (_tmp, config_path) = setup_test_env();
    run_qv(&config_path, &["build", "--progress", "off"]);

    let (_, stderr, success) = run_qv(&config_path, &["validate"]);
    assert!(!success);
    assert!(stderr.contains("expected at least 500 lessons, found 3"));
}

#[test]
fn test_validate_rejects_cross_surah_lesson() {
    let (tmp, config_path) = setup_test_env();
    run_qv(&config_path, &["build", "--progress", "off"]);

    let path = lessons_path(&tmp);
    let mut lessons = read_lessons(&path);
    lessons[1]["verseKeys"] = serde_json::json!(["1:4", "2:1"]);
    fs::write(&path, serde_json::to_string(&lessons).unwrap()).unwrap();

    let (_, stderr, success) = run_qv(&config_path, &["validate", "--min-lessons", "1"]);
    assert!(!success);
    assert!(stderr.contains("cross-surah lesson DL-000002"));
}

#[test]
fn test_stats_summary() {
    let (_tmp, config_path) = setup_test_env();
    run_qv(&config_path, &["build", "--progress", "off"]);

    let (stdout, stderr, success) = run_qv(&config_path, &["stats"]);
    assert!(success, "stats failed: stderr={}", stderr);
    assert!(stdout.contains("Lessons:     3"));
    assert!(stdout.contains("Surahs:      2"));
    assert!(stdout.contains("tawheed"));
}

#[test]
fn test_inputs_lists_status() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_qv(&config_path, &["inputs"]);
    assert!(success);
    assert!(stdout.contains("commentary"));
    assert!(stdout.contains("OK"));
    assert!(stdout.contains("MISSING"));
}
