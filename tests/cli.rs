use assert_cmd::Command;
use serde_json::Value;
use tempfile::tempdir;

fn interventions() -> Command {
    Command::cargo_bin("interventions").unwrap()
}

fn stdout_of(command: &mut Command) -> String {
    let output = command.output().unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn assemble_matches_saved_schedule() {
    let output = stdout_of(interventions().args(["assemble", "tests/data/form_arrays.json"]));
    let assembled: Value = serde_json::from_str(&output).unwrap();
    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string("tests/data/schedule.json").unwrap())
            .unwrap();
    assert_eq!(assembled, saved);
}

#[test]
fn assemble_with_name_prints_payload() {
    let output = stdout_of(interventions().args([
        "assemble",
        "tests/data/form_arrays.json",
        "--name",
        "semester_start",
    ]));
    let payload: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(payload["intvName"], "semester_start");
    assert_eq!(payload["intvDict"].as_array().unwrap().len(), 3);
}

#[test]
fn assemble_writes_schedule_file() {
    let temp_dir = tempdir().unwrap();
    let output_dir = temp_dir.path().join("runs");
    interventions()
        .args(["assemble", "tests/data/form_arrays.json", "-n", "semester_start", "-o"])
        .arg(&output_dir)
        .assert()
        .success();
    let written: Value = serde_json::from_str(
        &std::fs::read_to_string(output_dir.join("semester_start.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(written[1]["selective_shutdown"]["spaces"], serde_json::json!([2, 4]));
}

#[test]
fn render_existing_schedule() {
    let output = stdout_of(interventions().args([
        "render",
        "--schedule",
        "tests/data/schedule.json",
    ]));
    assert_eq!(output.matches("class=\"interv-li\"").count(), 3);
    assert!(output.contains(r#"<option value="3" selected>"#));
    assert!(output.contains("<div id=\"spaceDiv1\">\n"));
    assert!(output.contains(r#"<div id="spaceDiv0" style="display: none">"#));
}

#[test]
fn render_blank_blocks_with_settings() {
    let output = stdout_of(interventions().args([
        "--config",
        "tests/data/settings.json",
        "render",
        "--blocks",
        "3",
    ]));
    assert_eq!(output.matches(r#"value="0.9""#).count(), 3);
    assert!(output.contains("mulIntv2"));
}

#[test]
fn inspect_lists_blocks() {
    let output = stdout_of(interventions().args(["inspect", "tests/data/schedule.json"]));
    assert_eq!(
        output,
        "Block 1: 14 days, compliance 0.5: Case Isolation, Shelter in Place (no activity allowed)\n\
         Block 2: 7 days, compliance 0.8: Custom intervention (disabled: Stay within Hostels, Close Cafeterias)\n\
         Block 3: 30 days, compliance 1: No Intervention (business as usual)\n"
    );
}

#[test]
fn logging_goes_to_stderr() {
    let output = interventions()
        .args([
            "--log-level",
            "info",
            "assemble",
            "tests/data/form_arrays.json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Assembled 3 intervention blocks"));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(serde_json::from_str::<Value>(&stdout).is_ok());
}

#[test]
fn bad_input_fails_with_message() {
    let temp_dir = tempdir().unwrap();
    let form = temp_dir.path().join("form.json");
    std::fs::write(
        &form,
        r#"{"intv": [[1], [2]], "compliance": [0.5], "num_days": [1, 2], "spaces": [[], []]}"#,
    )
    .unwrap();
    let output = interventions().arg("assemble").arg(&form).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Form arrays have different lengths"));
}
