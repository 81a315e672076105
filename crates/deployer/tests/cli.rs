use std::process::{Command, Output};

const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Runs the `deploy` binary with an empty environment so that no variable
/// of the host overrides the arguments.
fn deploy(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_deploy"))
        .env_clear()
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn missing_artifact_exits_with_failure() {
    let artifacts = tempfile::tempdir().unwrap();
    let output = deploy(&[
        // Nothing listens here, any RPC request would fail.
        "--node-url",
        "http://127.0.0.1:1",
        "--private-keys",
        ANVIL_KEY,
        "--artifacts",
        artifacts.path().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Deploying with address: 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n"
    );
    assert!(stderr(&output).contains(r#"artifact for contract "HeroicStory" not found"#));
}

#[test]
fn unreachable_node_exits_with_failure() {
    let artifacts = tempfile::tempdir().unwrap();
    let output = deploy(&[
        "--node-url",
        "http://127.0.0.1:1",
        "--artifacts",
        artifacts.path().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("failed to retrieve signers"));
}

#[test]
fn invalid_arguments_exit_with_failure() {
    let cases: [&[&str]; 3] = [
        &["--bogus"],
        &["--confirmations", "0"],
        &["--private-keys", "0x1234"],
    ];
    for args in cases {
        let output = deploy(args);
        assert_eq!(output.status.code(), Some(1), "{args:?}");
        assert_eq!(stdout(&output), "", "{args:?}");
        assert!(!stderr(&output).is_empty(), "{args:?}");
    }
}

#[test]
fn help_exits_with_success() {
    let output = deploy(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("--node-url"));
}
