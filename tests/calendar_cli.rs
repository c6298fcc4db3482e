mod support;

use support::{parse_envelope, TestEnv};

#[test]
fn month_grid_buckets_the_boards_tasks() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args([
            "calendar",
            "--month",
            "2023-06",
            "--board",
            "maintenance",
            "--json",
        ])
        .assert()
        .success();
    let envelope = parse_envelope(&output.get_output().stdout);
    assert_eq!(envelope["command"], "calendar");
    assert_eq!(envelope["data"]["year"], 2023);
    assert_eq!(envelope["data"]["month"], 6);

    let days = envelope["data"]["days"].as_array().expect("days");
    assert_eq!(days.len(), 30);
    // June 1st, 2023 is a Thursday: four leading blanks in a
    // Sunday-first grid.
    assert_eq!(envelope["data"]["leading_blanks"], 4);

    let bucketed: usize = days
        .iter()
        .map(|cell| cell["tasks"].as_array().map(Vec::len).unwrap_or(0))
        .sum();
    assert_eq!(bucketed, 6);

    // The 15th holds the valve replacement, dot colored by priority.
    let day15 = &days[14];
    assert_eq!(day15["tasks"][0]["id"], "1");
    assert_eq!(day15["dots"][0], "urgent");
    assert_eq!(day15["overflow"], 0);
}

#[test]
fn selected_day_lists_its_tasks() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args(["calendar", "--day", "2025-06-13", "--json"])
        .assert()
        .success();
    let envelope = parse_envelope(&output.get_output().stdout);
    // Month defaults to the selected day's month.
    assert_eq!(envelope["data"]["month"], 6);
    let selected = envelope["data"]["selected_tasks"]
        .as_array()
        .expect("selected tasks");
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["id"], "TK002");
}

#[test]
fn month_shift_keeps_the_selected_day() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args(["calendar", "--day", "2025-06-13", "--shift", "1", "--json"])
        .assert()
        .success();
    let envelope = parse_envelope(&output.get_output().stdout);
    assert_eq!(envelope["data"]["month"], 7);
    // The selection is outside July and stays answered anyway.
    assert_eq!(envelope["data"]["selected_day"], "2025-06-13");
    let selected = envelope["data"]["selected_tasks"]
        .as_array()
        .expect("selected tasks");
    assert_eq!(selected[0]["id"], "TK002");
    let warnings = envelope["warnings"].as_array().expect("warnings");
    assert!(!warnings.is_empty());

    // Shifting across a year boundary wraps correctly.
    let output = env
        .cmd()
        .args(["calendar", "--month", "2025-01", "--shift", "-1", "--json"])
        .assert()
        .success();
    let envelope = parse_envelope(&output.get_output().stdout);
    assert_eq!(envelope["data"]["year"], 2024);
    assert_eq!(envelope["data"]["month"], 12);
}

#[test]
fn filters_apply_before_bucketing() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args([
            "calendar",
            "--month",
            "2023-06",
            "--board",
            "maintenance",
            "--priority",
            "urgent",
            "--json",
        ])
        .assert()
        .success();
    let envelope = parse_envelope(&output.get_output().stdout);
    let days = envelope["data"]["days"].as_array().expect("days");
    let bucketed: usize = days
        .iter()
        .map(|cell| cell["tasks"].as_array().map(Vec::len).unwrap_or(0))
        .sum();
    assert_eq!(bucketed, 2);
}

#[test]
fn technician_calendar_is_role_gated() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args([
            "calendar",
            "--month",
            "2023-06",
            "--board",
            "maintenance",
            "--actor",
            "Omar Alami",
            "--role",
            "technician",
            "--json",
        ])
        .assert()
        .success();
    let envelope = parse_envelope(&output.get_output().stdout);
    let days = envelope["data"]["days"].as_array().expect("days");
    let bucketed: usize = days
        .iter()
        .map(|cell| cell["tasks"].as_array().map(Vec::len).unwrap_or(0))
        .sum();
    assert_eq!(bucketed, 1);

    let day10 = &days[9];
    assert_eq!(day10["tasks"][0]["id"], "2");
}
