mod support;

use predicates::str::contains;

use support::{parse_envelope, TestEnv};

#[test]
fn help_lists_the_subcommands() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("task"))
        .stdout(contains("calendar"))
        .stdout(contains("actor"))
        .stdout(contains("init"));
}

#[test]
fn init_seeds_store_roster_and_config() {
    let env = TestEnv::new();

    let output = env.cmd().args(["init", "--json"]).assert().success();
    let envelope = parse_envelope(&output.get_output().stdout);
    assert_eq!(envelope["schema_version"], "hyd.v1");
    assert_eq!(envelope["command"], "init");
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["data"]["tasks"], 13);
    assert_eq!(envelope["data"]["roster"], 13);
    assert_eq!(envelope["data"]["config_written"], true);

    assert!(env.tasks_file().exists());
    assert!(env.data_dir().join("roster.json").exists());
    assert!(env.path().join(".hyd.toml").exists());

    // A second init leaves existing state alone.
    let output = env.cmd().args(["init", "--json"]).assert().success();
    let envelope = parse_envelope(&output.get_output().stdout);
    assert_eq!(envelope["data"]["config_written"], false);
}

#[test]
fn errors_render_a_json_envelope_with_exit_code() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args(["task", "show", "TK999", "--json"])
        .assert()
        .failure()
        .code(2);
    let envelope = parse_envelope(&output.get_output().stdout);
    assert_eq!(envelope["schema_version"], "hyd.v1");
    assert_eq!(envelope["command"], "task show");
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["error"]["kind"], "user_error");
    assert_eq!(envelope["error"]["details"]["task_id"], "TK999");
}

#[test]
fn quiet_suppresses_human_output() {
    let env = TestEnv::new();
    env.cmd()
        .args(["task", "list", "--quiet"])
        .assert()
        .success()
        .stdout("");
}
