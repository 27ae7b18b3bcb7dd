mod common;

use assert_cmd::Command;
use common::{EVENTS_FIXTURE, REGIONS_FIXTURE, TestWorkspace, fixture_path};
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::{Value, json};

fn olympic_stats() -> Command {
    let mut cmd = Command::cargo_bin("olympic-stats").expect("binary exists");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn with_sample(cmd: &mut Command) -> &mut Command {
    cmd.arg("-e")
        .arg(fixture_path(EVENTS_FIXTURE))
        .arg("-r")
        .arg(fixture_path(REGIONS_FIXTURE))
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run binary");
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn summary_prints_headline_table() {
    let mut cmd = olympic_stats();
    cmd.arg("summary");
    with_sample(&mut cmd)
        .assert()
        .success()
        .stdout(contains("Summary"))
        .stdout(contains("Total medals (team-adjusted)"))
        .stdout(contains("Unique athletes"))
        .stderr(contains("Loaded 12 athlete-event row(s)"));
}

#[test]
fn top_countries_json_is_ranked() {
    let mut cmd = olympic_stats();
    cmd.args(["top-countries", "--format", "json", "--top", "2"]);
    let value = stdout_json(with_sample(&mut cmd));
    assert_eq!(
        value,
        json!({
            "status": "data",
            "data": [
                {"noc": "USA", "medals": 3},
                {"noc": "GBR", "medals": 2}
            ]
        })
    );
}

#[test]
fn empty_selection_reports_no_data() {
    let mut cmd = olympic_stats();
    cmd.args(["medals-over-time", "--format", "json", "--years", "1900:1910"]);
    let value = stdout_json(with_sample(&mut cmd));
    assert_eq!(value, json!({"status": "no_data"}));

    let mut table = olympic_stats();
    table.args(["top-athletes", "--season", "winter", "--country", "GBR"]);
    with_sample(&mut table)
        .assert()
        .success()
        .stdout(contains("No data to display"));
}

#[test]
fn medal_breakdown_csv_has_header_and_rows() {
    let mut cmd = olympic_stats();
    cmd.args(["medal-breakdown", "--format", "csv", "--country", "USA"]);
    with_sample(&mut cmd)
        .assert()
        .success()
        .stdout("NOC,Medal,Count\nUSA,Gold,2\nUSA,Bronze,1\n");
}

#[test]
fn repeated_and_comma_separated_countries_combine() {
    let mut cmd = olympic_stats();
    cmd.args([
        "top-countries",
        "--format",
        "csv",
        "--country",
        "SUI,RUS",
        "--country",
        "GBR",
    ]);
    with_sample(&mut cmd)
        .assert()
        .success()
        .stdout("NOC,Medals\nGBR,2\nRUS,1\nSUI,1\n");
}

#[test]
fn output_file_receives_the_view() {
    let workspace = TestWorkspace::new();
    let target = workspace.path().join("sports.csv");
    let mut cmd = olympic_stats();
    cmd.args(["sports", "--format", "csv", "--top", "1", "-o"])
        .arg(&target);
    with_sample(&mut cmd).assert().success().stdout("");
    assert_eq!(workspace.read("sports.csv"), "Sport,Entries\nBasketball,4\n");
}

#[test]
fn config_file_supplies_inputs_and_filters() {
    let workspace = TestWorkspace::new();
    let config = workspace.write(
        "dashboard.yaml",
        &format!(
            "events: {}\nregions: {}\nseason: winter\nformat: json\n",
            fixture_path(EVENTS_FIXTURE).display(),
            fixture_path(REGIONS_FIXTURE).display()
        ),
    );
    let mut cmd = olympic_stats();
    cmd.args(["summary", "-c"]).arg(&config);
    let value = stdout_json(&mut cmd);
    assert_eq!(value["total_medals"], json!(1));
    assert_eq!(value["unique_athletes"], json!(2));

    // Flags on the command line override the file.
    let mut overridden = olympic_stats();
    overridden
        .args(["summary", "--season", "both", "-c"])
        .arg(&config);
    let value = stdout_json(&mut overridden);
    assert_eq!(value["total_medals"], json!(7));
}

#[test]
fn report_json_contains_every_view() {
    let mut cmd = olympic_stats();
    cmd.args(["report", "--format", "json", "--years", "1996"]);
    let value = stdout_json(with_sample(&mut cmd));
    assert_eq!(value["summary"]["total_medals"], json!(2));
    for key in [
        "medals_over_time",
        "medal_table",
        "top_countries",
        "medal_breakdown",
        "gender",
        "participation",
        "sports",
        "sport_heatmap",
        "top_athletes",
    ] {
        assert_eq!(value[key]["status"], json!("data"), "view {key}");
    }
    assert_eq!(value["filter"], json!("season=both years=1996:1996 countries=all"));
}

#[test]
fn report_table_prints_each_section() {
    let mut cmd = olympic_stats();
    cmd.arg("report");
    with_sample(&mut cmd)
        .assert()
        .success()
        .stdout(contains("Medal table (team-adjusted)"))
        .stdout(contains("Sport participation heatmap"))
        .stdout(contains("Top athletes by medal count (team-adjusted)"));
}

#[test]
fn options_lists_filter_choices() {
    let mut cmd = olympic_stats();
    cmd.args(["options", "--format", "json"]);
    let value = stdout_json(with_sample(&mut cmd));
    assert_eq!(value["seasons"], json!(["Summer", "Winter"]));
    assert_eq!(value["years"], json!([1996, 1998, 2000, 2016]));
}

#[test]
fn options_rejects_filter_flags() {
    let mut cmd = olympic_stats();
    cmd.args(["options", "--season", "winter"]);
    with_sample(&mut cmd)
        .assert()
        .failure()
        .stderr(contains("unexpected argument '--season'"));
}

#[test]
fn options_ignores_config_filters() {
    let workspace = TestWorkspace::new();
    let config = workspace.write(
        "dashboard.yaml",
        &format!(
            "events: {}\nregions: {}\nseason: winter\ncountries: [SUI]\n",
            fixture_path(EVENTS_FIXTURE).display(),
            fixture_path(REGIONS_FIXTURE).display()
        ),
    );
    let mut cmd = olympic_stats();
    cmd.args(["options", "--format", "json", "-c"]).arg(&config);
    let value = stdout_json(&mut cmd);
    assert_eq!(value["seasons"], json!(["Summer", "Winter"]));
}

#[test]
fn events_can_be_read_from_stdin() {
    let events = std::fs::read_to_string(fixture_path(EVENTS_FIXTURE)).expect("fixture");
    olympic_stats()
        .args(["summary", "--format", "json", "-e", "-", "-r"])
        .arg(fixture_path(REGIONS_FIXTURE))
        .write_stdin(events)
        .assert()
        .success()
        .stdout(contains("\"total_medals\": 7"));
}

#[test]
fn missing_column_fails_with_message() {
    let workspace = TestWorkspace::new();
    let events = workspace.write(
        "events.csv",
        "Name,Sex,NOC,Games,Year,Season,Sport,Event\nA,F,USA,2000 Summer,2000,Summer,Judo,Judo Women's Lightweight\n",
    );
    olympic_stats()
        .arg("summary")
        .arg("-e")
        .arg(&events)
        .arg("-r")
        .arg(fixture_path(REGIONS_FIXTURE))
        .assert()
        .failure()
        .stderr(contains("missing required column 'Medal'"));
}

#[test]
fn missing_inputs_are_reported() {
    olympic_stats()
        .arg("summary")
        .assert()
        .failure()
        .stderr(contains("No athlete events table given"));
}

#[test]
fn inverted_year_range_is_rejected_by_the_parser() {
    let mut cmd = olympic_stats();
    cmd.args(["summary", "--years", "2016:1896"]);
    with_sample(&mut cmd)
        .assert()
        .failure()
        .stderr(contains("after its end").and(contains("--years")));
}
