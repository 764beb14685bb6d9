#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::{Value, json};

/// Run the CLI binary against `api_url`, feeding `stdin` to it.
pub fn run_cli_with_input(args: &[&str], api_url: &str, stdin: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_portal"));
    cmd.args(args)
        .env("PORTAL_API_URL", api_url)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().expect("Failed to execute CLI");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for CLI")
}

/// Run the CLI binary against `api_url` with empty input.
pub fn run_cli(args: &[&str], api_url: &str) -> Output {
    run_cli_with_input(args, api_url, "")
}

/// Run the CLI off the async runtime so the mock server keeps serving.
pub async fn run_cli_async(args: &[&str], api_url: &str) -> Output {
    run_cli_with_input_async(args, api_url, "").await
}

/// Like [`run_cli_async`], feeding `stdin` to the process.
pub async fn run_cli_with_input_async(args: &[&str], api_url: &str, stdin: &str) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let api_url = api_url.to_string();
    let stdin = stdin.to_string();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli_with_input(&args, &api_url, &stdin)
    })
    .await
    .expect("CLI task panicked")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn character(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": if id % 2 == 0 { "Dead" } else { "Alive" },
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": { "name": "Earth (C-137)", "url": "" },
        "location": { "name": "Citadel of Ricks", "url": "" },
        "image": format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        "episode": ["https://rickandmortyapi.com/api/episode/1"],
        "url": format!("https://rickandmortyapi.com/api/character/{id}")
    })
}

pub fn envelope(results: Vec<Value>, count: u32, next: Option<String>) -> Value {
    json!({
        "info": { "count": count, "pages": 2, "next": next, "prev": null },
        "results": results
    })
}
