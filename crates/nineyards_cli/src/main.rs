//! CLI probe for `nineyards_core`.
//!
//! # Usage
//! - `nineyards_cli` prints crate and schema versions.
//! - `nineyards_cli decode <Entity> [file]` strictly decodes a wire document
//!   (stdin when no file is given) and prints it re-encoded; exits 1 on error.

use nineyards_core::{
    decode_with, encode, CodecOptions, EditSubTask, EditTaskGroup, Entity, FullNotification,
    FullTask, ProjectBuilder, SubTask, Task, TaskGroup, User,
};
use serde_json::Value;
use std::io::Read;
use std::process::ExitCode;

const ENTITIES: &[&str] = &[
    "FullNotification",
    "TaskGroup",
    "EditTaskGroup",
    "Task",
    "SubTask",
    "EditSubTask",
    "FullTask",
    "ProjectBuilder",
    "User",
];

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            println!("nineyards_core version={}", nineyards_core::core_version());
            println!("nineyards_core schema_version={}", nineyards_core::SCHEMA_VERSION);
            ExitCode::SUCCESS
        }
        [command, entity, rest @ ..] if command == "decode" && rest.len() <= 1 => {
            match run_decode(entity, rest.first().map(String::as_str)) {
                Ok(output) => {
                    println!("{output}");
                    ExitCode::SUCCESS
                }
                Err(message) => {
                    eprintln!("error: {message}");
                    ExitCode::FAILURE
                }
            }
        }
        _ => {
            eprintln!("usage: nineyards_cli [decode <Entity> [file]]");
            eprintln!("entities: {}", ENTITIES.join(", "));
            ExitCode::FAILURE
        }
    }
}

fn run_decode(entity: &str, path: Option<&str>) -> Result<String, String> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|err| format!("{path}: {err}"))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("stdin: {err}"))?;
            buffer
        }
    };
    let wire: Value = serde_json::from_str(&raw).map_err(|err| format!("invalid JSON: {err}"))?;

    let reencoded = match entity {
        "FullNotification" => roundtrip::<FullNotification>(&wire),
        "TaskGroup" => roundtrip::<TaskGroup>(&wire),
        "EditTaskGroup" => roundtrip::<EditTaskGroup>(&wire),
        "Task" => roundtrip::<Task>(&wire),
        "SubTask" => roundtrip::<SubTask>(&wire),
        "EditSubTask" => roundtrip::<EditSubTask>(&wire),
        "FullTask" => roundtrip::<FullTask>(&wire),
        "ProjectBuilder" => roundtrip::<ProjectBuilder>(&wire),
        "User" => roundtrip::<User>(&wire),
        other => Err(format!(
            "unknown entity `{other}`; expected one of {}",
            ENTITIES.join(", ")
        )),
    }?;

    serde_json::to_string_pretty(&reencoded).map_err(|err| err.to_string())
}

fn roundtrip<E: Entity>(wire: &Value) -> Result<Value, String> {
    match decode_with::<E>(wire, &CodecOptions::strict()).map_err(|err| err.to_string())? {
        Some(entity) => encode(&entity).map_err(|err| err.to_string()),
        None => Ok(Value::Null),
    }
}
