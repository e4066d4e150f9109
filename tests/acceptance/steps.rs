use crate::ChincolWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

const FAKE_GH: &str = include_str!("fake_gh.sh");

fn append_line(path: &Path, line: &str) {
    use std::io::Write;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap_or_else(|e| panic!("Failed to open {:?}: {}", path, e));
    writeln!(file, "{line}").unwrap_or_else(|e| panic!("Failed to write {:?}: {}", path, e));
}

fn read_lines(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => panic!("Failed to read {:?}: {}", path, e),
    }
}

/// `(name, value)` pairs from a tab separated state file.
fn read_pairs(path: &Path) -> Vec<(String, String)> {
    read_lines(path)
        .iter()
        .map(|line| {
            let (name, value) = line.split_once('\t').unwrap_or((line.as_str(), ""));
            (name.to_string(), value.to_string())
        })
        .collect()
}

fn write_docstring(path: &Path, step: &Step) {
    let content = step
        .docstring
        .as_ref()
        .expect("Expected docstring with file content");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create dir {:?}: {}", parent, e));
    }
    std::fs::write(path, format!("{}\n", content.trim()))
        .unwrap_or_else(|e| panic!("Failed to write {:?}: {}", path, e));
}

#[given(regex = r#"^a repository "([^"]*)" managed by a fake gh$"#)]
async fn given_fake_gh(world: &mut ChincolWorld, repository: String) {
    let workdir = tempfile::tempdir().expect("Failed to create work directory");
    world.workdir = Some(workdir);
    world.repository = repository;

    std::fs::create_dir_all(world.bin_dir()).expect("Failed to create bin dir");
    std::fs::create_dir_all(world.state_dir()).expect("Failed to create state dir");

    let gh_path = world.bin_dir().join("gh");
    std::fs::write(&gh_path, FAKE_GH).expect("Failed to write fake gh");
    std::fs::set_permissions(&gh_path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake gh executable");
}

#[given(regex = r#"^the repository has the label "([^"]*)"$"#)]
async fn given_label_exists(world: &mut ChincolWorld, label: String) {
    append_line(&world.state_dir().join("labels"), &label);
}

#[given(regex = r#"^the repository has an issue titled "(.*)"$"#)]
async fn given_issue_exists(world: &mut ChincolWorld, title: String) {
    append_line(&world.state_dir().join("issues"), &title);
}

#[given(regex = r#"^creating the label "([^"]*)" fails$"#)]
async fn given_label_creation_fails(world: &mut ChincolWorld, label: String) {
    append_line(&world.state_dir().join("failing_labels"), &label);
}

#[given(regex = r#"^searching for "(.*)" fails$"#)]
async fn given_search_fails(world: &mut ChincolWorld, query: String) {
    append_line(&world.state_dir().join("failing_searches"), &query);
}

#[given("the issues CSV file contains:")]
async fn given_issues_csv(world: &mut ChincolWorld, step: &Step) {
    let path = world.workdir().join("issues.csv");
    write_docstring(&path, step);
}

#[given("the backlog CSV file contains:")]
async fn given_backlog_csv(world: &mut ChincolWorld, step: &Step) {
    let path = world.workdir().join("backlog").join("todo.csv");
    write_docstring(&path, step);
}

#[given(regex = r#"^the project config file contains '(.*)'$"#)]
async fn given_project_config(world: &mut ChincolWorld, content: String) {
    let config_dir = world.workdir().join(".chincol");
    std::fs::create_dir_all(&config_dir)
        .unwrap_or_else(|e| panic!("Failed to create config dir {:?}: {}", config_dir, e));
    std::fs::write(config_dir.join("config.json"), content).expect("Failed to write config file");
}

#[when(regex = r"^I run `chincol(.*)`$")]
async fn when_run_chincol(world: &mut ChincolWorld, args: String) {
    let path = match std::env::var_os("PATH") {
        Some(path) => {
            let mut dirs = vec![world.bin_dir()];
            dirs.extend(std::env::split_paths(&path));
            std::env::join_paths(dirs).expect("Failed to build PATH")
        }
        None => world.bin_dir().into_os_string(),
    };

    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_chincol"))
        .args(args.split_whitespace())
        .current_dir(world.workdir())
        .env("PATH", path)
        .env("FAKE_GH_STATE", world.state_dir())
        .env_remove("GH_REPO")
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("Failed to execute chincol");

    world.captured_output = output.stdout;
    world.captured_error = output.stderr;
    world.command_status = Some(output.status);
}

#[then(regex = r"^the exit status should be (\d+)$")]
async fn then_exit_status(world: &mut ChincolWorld, expected: i32) {
    let status = world.command_status.expect("Command has not been run");
    assert_eq!(
        status.code(),
        Some(expected),
        "Unexpected exit status.\n--- stdout ---\n{}\n--- stderr ---\n{}",
        String::from_utf8_lossy(&world.captured_output),
        String::from_utf8_lossy(&world.captured_error)
    );
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn then_output_contains(world: &mut ChincolWorld, expected: String) {
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");
    assert!(
        output.contains(&expected),
        "Expected output to contain '{}', but got:\n---\n{}\n---",
        expected,
        output
    );
}

#[then(regex = r#"^the error output should contain "(.*)"$"#)]
async fn then_error_output_contains(world: &mut ChincolWorld, expected: String) {
    let output = String::from_utf8(world.captured_error.clone()).expect("Invalid UTF-8");
    assert!(
        output.contains(&expected),
        "Expected error output to contain '{}', but got:\n---\n{}\n---",
        expected,
        output
    );
}

#[then(regex = r#"^the repository should have an issue titled "(.*)" with labels "(.*)"$"#)]
async fn then_issue_created(world: &mut ChincolWorld, title: String, labels: String) {
    let created = read_pairs(&world.state_dir().join("created_issues"));
    assert!(
        created.contains(&(title.clone(), labels.clone())),
        "Expected issue '{}' with labels '{}', created issues were: {:?}",
        title,
        labels,
        created
    );
}

#[then(regex = r#"^the repository should not have an issue titled "(.*)"$"#)]
async fn then_issue_not_created(world: &mut ChincolWorld, title: String) {
    let created = read_pairs(&world.state_dir().join("created_issues"));
    assert!(
        created.iter().all(|(created_title, _)| created_title != &title),
        "Issue '{}' should not have been created: {:?}",
        title,
        created
    );
}

#[then(regex = r"^(\d+) issues? should have been created$")]
async fn then_issue_count(world: &mut ChincolWorld, expected: usize) {
    let created = read_pairs(&world.state_dir().join("created_issues"));
    assert_eq!(created.len(), expected, "Created issues: {:?}", created);
}

#[then(regex = r#"^the label "([^"]*)" should have been created once$"#)]
async fn then_label_created_once(world: &mut ChincolWorld, label: String) {
    let created = read_pairs(&world.state_dir().join("created_labels"));
    let count = created.iter().filter(|(name, _)| name == &label).count();
    assert_eq!(count, 1, "Created labels: {:?}", created);
}

#[then(regex = r#"^the label "([^"]*)" should not have been created$"#)]
async fn then_label_not_created(world: &mut ChincolWorld, label: String) {
    let created = read_pairs(&world.state_dir().join("created_labels"));
    assert!(
        created.iter().all(|(name, _)| name != &label),
        "Label '{}' should not have been created: {:?}",
        label,
        created
    );
}

#[then(regex = r#"^the label "([^"]*)" should have been created with color "([^"]*)"$"#)]
async fn then_label_created_with_color(world: &mut ChincolWorld, label: String, color: String) {
    let created = read_pairs(&world.state_dir().join("created_labels"));
    assert!(
        created.contains(&(label.clone(), color.clone())),
        "Expected label '{}' with color '{}', created labels were: {:?}",
        label,
        color,
        created
    );
}

#[then("gh should not have been called")]
async fn then_gh_not_called(world: &mut ChincolWorld) {
    let calls = read_lines(&world.state_dir().join("calls.log"));
    assert!(calls.is_empty(), "Unexpected gh calls: {:?}", calls);
}

#[then("the output should show the created issue URL")]
async fn then_output_shows_issue_url(world: &mut ChincolWorld) {
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");
    let re = regex::Regex::new(r"🌐 Issue URL: https://github\.com/[^/\s]+/[^/\s]+/issues/\d+")
        .unwrap();
    assert!(
        re.is_match(&output),
        "Issue URL line not found in output:\n{}",
        output
    );
}
