mod support;

use support::{parse_envelope, TestEnv};

#[test]
fn new_task_gets_the_next_id_and_defaults() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args([
            "task",
            "new",
            "--hydrant",
            "H-TNG-010",
            "--kind",
            "inspection",
            "--description",
            "Inspection de contrôle",
            "--assigned-to",
            "Omar Alami",
            "--json",
        ])
        .assert()
        .success();
    let envelope = parse_envelope(&output.get_output().stdout);
    assert_eq!(envelope["command"], "task new");
    // Thirteen seed records, so the new task is number fourteen.
    assert_eq!(envelope["data"]["id"], "TK014");
    assert_eq!(envelope["data"]["status"], "pending");
    assert_eq!(envelope["data"]["priority"], "medium");
    assert_eq!(envelope["data"]["estimatedDuration"], "1h00");
    assert!(envelope["data"].get("progress").is_none());

    let tasks = env.read_tasks();
    assert_eq!(tasks.len(), 14);

    // A second create continues the sequence.
    let output = env
        .cmd()
        .args([
            "task",
            "new",
            "--hydrant",
            "H-TET-009",
            "--kind",
            "repair",
            "--description",
            "Fuite au raccord",
            "--assigned-to",
            "Leila Fassi",
            "--board",
            "maintenance",
            "--title",
            "Réparation fuite",
            "--json",
        ])
        .assert()
        .success();
    let envelope = parse_envelope(&output.get_output().stdout);
    assert_eq!(envelope["data"]["id"], "TK015");
    assert_eq!(envelope["data"]["board"], "maintenance");
    assert_eq!(envelope["data"]["title"], "Réparation fuite");
}

#[test]
fn missing_required_fields_reject_without_mutation() {
    let env = TestEnv::new();

    // Seed the store first so the count comparison is meaningful.
    env.cmd().args(["task", "list", "--quiet"]).assert().success();
    let before = env.read_tasks().len();

    let output = env
        .cmd()
        .args([
            "task",
            "new",
            "--hydrant",
            "H-TNG-010",
            "--kind",
            "inspection",
            "--description",
            "Inspection de contrôle",
            "--json",
        ])
        .assert()
        .failure()
        .code(3);
    let envelope = parse_envelope(&output.get_output().stdout);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["error"]["kind"], "validation_rejected");
    assert_eq!(envelope["error"]["details"]["missing"][0], "assigned_to");

    assert_eq!(env.read_tasks().len(), before);
}

#[test]
fn all_missing_fields_are_reported_at_once() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args(["task", "new", "--json"])
        .assert()
        .failure()
        .code(3);
    let envelope = parse_envelope(&output.get_output().stdout);
    let missing = envelope["error"]["details"]["missing"]
        .as_array()
        .expect("missing list");
    assert_eq!(missing.len(), 4);
}

#[test]
fn french_kind_spellings_are_accepted() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args([
            "task",
            "new",
            "--hydrant",
            "H-AHC-005",
            "--kind",
            "Réparation",
            "--description",
            "Valve grippée",
            "--assigned-to",
            "Mohammed Salim",
            "--status",
            "in-progress",
            "--date",
            "2025-07-01",
            "--json",
        ])
        .assert()
        .success();
    let envelope = parse_envelope(&output.get_output().stdout);
    assert_eq!(envelope["data"]["type"], "repair");
    assert_eq!(envelope["data"]["status"], "inProgress");
    assert_eq!(envelope["data"]["progress"], 0);
    assert_eq!(envelope["data"]["scheduledDate"], "2025-07-01");
}

#[test]
fn bad_date_is_a_user_error() {
    let env = TestEnv::new();
    env.cmd()
        .args([
            "task",
            "new",
            "--hydrant",
            "H-TNG-010",
            "--kind",
            "inspection",
            "--description",
            "x",
            "--assigned-to",
            "Omar Alami",
            "--date",
            "01/07/2025",
        ])
        .assert()
        .failure()
        .code(2);
}
