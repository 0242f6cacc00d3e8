use assert_cmd::Command;
use serde_json::Value;
use std::fs;

const RESPONSE: &str = r#"{"results": {"bindings": [
    {"deityLabel": {"value": "Odin"}, "domains": {"value": "wisdom, war"}},
    {"deityLabel": {"value": "Tyr"}, "domains": {"value": "war"}},
    {"deityLabel": {"value": "Mimir"}, "domains": {"value": "wisdom"}},
    {"deityLabel": {"value": "Hel"}}
]}}"#;

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("pantheon-cli"))
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn layout_clusters_rows_from_a_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("norse.json");
    fs::write(&input, RESPONSE).expect("write input");

    let output = cli()
        .args([
            "layout",
            "--seed",
            "42",
            "--mythology",
            "norse",
            input.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run");
    assert!(output.status.success());

    let deities = stdout_json(&output);
    let deities = deities.as_array().expect("array");
    assert_eq!(deities.len(), 4);
    let mut ids: Vec<u64> = deities.iter().map(|d| d["id"].as_u64().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![100, 101, 102, 103]);
    assert!(deities.iter().all(|d| d["mythology"] == "Norse"));
    let odin = deities.iter().find(|d| d["name"] == "Odin").unwrap();
    assert_eq!(odin["domainCluster"], "wisdom");
}

#[test]
fn layout_is_reproducible_with_a_seed() {
    let run = || {
        cli()
            .args(["layout", "--seed", "7", "-"])
            .write_stdin(RESPONSE)
            .output()
            .expect("run")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn no_cluster_keeps_input_order() {
    let output = cli()
        .args(["layout", "--no-cluster", "--start-id", "5"])
        .write_stdin(RESPONSE)
        .output()
        .expect("run");
    assert!(output.status.success());
    let deities = stdout_json(&output);
    let names: Vec<&str> = deities
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Odin", "Tyr", "Mimir", "Hel"]);
    assert_eq!(deities[0]["id"], 5);
    assert!(deities[0].get("domainCluster").is_none());
}

#[test]
fn scene_emits_stars_edges_and_labels() {
    let output = cli()
        .args(["scene", "--seed", "1"])
        .write_stdin(RESPONSE)
        .output()
        .expect("run");
    assert!(output.status.success());
    let scene = stdout_json(&output);
    assert_eq!(scene["stars"].as_array().unwrap().len(), 4);
    assert_eq!(scene["labels"].as_array().unwrap().len(), 3);
    assert!(!scene["edges"].as_array().unwrap().is_empty());
}

#[test]
fn relations_file_adds_query_relations() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let relations = tmp.path().join("relations.json");
    fs::write(
        &relations,
        r#"[{"subjectLabel": {"value": "Hel"}, "objectLabel": {"value": "Odin"}}]"#,
    )
    .expect("write relations");

    let output = cli()
        .args([
            "layout",
            "--seed",
            "3",
            "--relations",
            relations.to_string_lossy().as_ref(),
        ])
        .write_stdin(RESPONSE)
        .output()
        .expect("run");
    assert!(output.status.success());
    let deities = stdout_json(&output);
    let hel = deities
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["name"] == "Hel")
        .unwrap();
    assert_eq!(hel["relations"], serde_json::json!([1]));
}

#[test]
fn classic_dataset_validates() {
    let output = cli().arg("classic").output().expect("run");
    assert!(output.status.success());
    let classic = stdout_json(&output);
    let deities = classic["deities"].to_string();
    assert_eq!(classic["deities"].as_array().unwrap().len(), 50);

    cli()
        .arg("validate")
        .write_stdin(deities)
        .assert()
        .success();
}

#[test]
fn invalid_deities_exit_with_status_3() {
    let output = cli()
        .arg("validate")
        .write_stdin(
            r#"[{"id": 1, "name": " ", "mythology": "Greek",
                 "position": {"x": 0.0, "y": 0.0, "z": 0.0}, "relations": [1]}]"#,
        )
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(3));
    let report = stdout_json(&output);
    assert_eq!(report["valid"], false);
    assert_eq!(
        report["errors"],
        serde_json::json!(["Item at index 0 has no name", "Item at index 0 relates to itself"])
    );
}

#[test]
fn color_prints_palette_and_generated_colors() {
    let output = cli()
        .args(["color", "War", "thunder"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "War\t#FF4444");
    assert!(lines[1].starts_with("thunder\t#"));
}

#[test]
fn usage_errors_exit_with_status_2() {
    cli().arg("--bogus").assert().code(2);
    cli().arg("color").assert().code(2);
    cli().args(["layout", "--seed", "x"]).assert().code(2);
}

#[test]
fn config_file_overrides_defaults() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("pantheon.json");
    fs::write(
        &config,
        r#"{"clustering": {"enabled": false}, "conversion": {"startId": 400}}"#,
    )
    .expect("write config");

    let output = cli()
        .args(["layout", "--config", config.to_string_lossy().as_ref()])
        .write_stdin(RESPONSE)
        .output()
        .expect("run");
    assert!(output.status.success());
    let deities = stdout_json(&output);
    assert_eq!(deities[0]["id"], 400);
    assert!(deities[0].get("domainCluster").is_none());
}

#[test]
fn subcommand_names_after_the_first_positional_are_domains() {
    let output = cli()
        .args(["color", "war", "scene"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "war\t#FF4444");
    assert!(lines[1].starts_with("scene\t#"), "{}", lines[1]);
}

#[test]
fn flags_before_the_subcommand_are_accepted() {
    let output = cli()
        .args(["--seed", "2", "color", "love"])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).expect("utf8"), "love\t#FF69B4\n");
}

#[test]
fn start_ids_that_overflow_are_rejected() {
    let output = cli()
        .args(["layout", "--start-id", "4294967294"])
        .write_stdin(RESPONSE)
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("conversion.startId"), "{stderr}");
}
