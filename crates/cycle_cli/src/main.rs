//! Local invocation entry point.
//!
//! # Responsibility
//! - Read one gateway request event (file argument or stdin).
//! - Run it through the handler configured from the environment.
//! - Print the response envelope as JSON on stdout.
//!
//! Exit code is 0 whenever an envelope was produced, 1 on config/input errors.

use cycle_api::{CycleHandler, GatewayRequest, HandlerConfig};
use cycle_core::init_logging;
use log::error;
use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--version") {
        println!("cycle_core version={}", cycle_core::core_version());
        return ExitCode::SUCCESS;
    }

    match run(arg.as_deref(), |key| std::env::var(key).ok()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("event=cli_invoke module=cli status=error error={message}");
            eprintln!("cycle_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    event_path: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, String> {
    let config = HandlerConfig::from_lookup(lookup).map_err(|err| err.to_string())?;
    init_logging(&config.log_level, config.log_target.clone())?;

    let raw_event = read_event(event_path)?;
    invoke(&config, &raw_event)
}

/// Runs one raw gateway event through a handler built from `config`.
fn invoke(config: &HandlerConfig, raw_event: &str) -> Result<String, String> {
    let request: GatewayRequest = serde_json::from_str(raw_event)
        .map_err(|err| format!("invalid request event: {err}"))?;

    let handler = CycleHandler::from_config(config);
    let response = handler.handle(&request);
    serde_json::to_string(&response).map_err(|err| format!("failed to encode response: {err}"))
}

fn read_event(event_path: Option<&str>) -> Result<String, String> {
    match event_path {
        Some("-") | None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed to read stdin: {err}"))?;
            Ok(buffer)
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read `{path}`: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{invoke, read_event, run};
    use cycle_api::HandlerConfig;
    use serde_json::Value;

    fn config_for(db_path: &std::path::Path) -> HandlerConfig {
        let url = db_path.to_string_lossy().into_owned();
        HandlerConfig::from_lookup(move |key| (key == "DATABASE_URL").then(|| url.clone()))
            .expect("config with DATABASE_URL should build")
    }

    #[test]
    fn read_event_reads_file_argument() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, r#"{"httpMethod":"OPTIONS"}"#).unwrap();

        let raw = read_event(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(raw, r#"{"httpMethod":"OPTIONS"}"#);
    }

    #[test]
    fn read_event_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = read_event(Some(path.to_str().unwrap())).unwrap_err();
        assert!(err.starts_with("failed to read"), "unexpected error: {err}");
    }

    #[test]
    fn run_fails_without_database_url() {
        let err = run(Some("unused.json"), |_| None).unwrap_err();
        assert!(err.contains("DATABASE_URL"), "unexpected error: {err}");
    }

    #[test]
    fn invoke_rejects_malformed_event() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("cycle.db"));

        let err = invoke(&config, "{not json").unwrap_err();
        assert!(err.starts_with("invalid request event"), "unexpected error: {err}");
    }

    #[test]
    fn invoke_prints_preflight_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("cycle.db"));

        let output = invoke(&config, r#"{"httpMethod":"OPTIONS"}"#).unwrap();
        let envelope: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(envelope["statusCode"], 200);
        assert_eq!(envelope["isBase64Encoded"], false);
    }

    #[test]
    fn invoke_lists_articles_from_fresh_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("cycle.db"));
        let event = r#"{"httpMethod":"GET","queryStringParameters":{"action":"get_articles"}}"#;

        let output = invoke(&config, event).unwrap();
        let envelope: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(envelope["statusCode"], 200);
        let body: Value = serde_json::from_str(envelope["body"].as_str().unwrap()).unwrap();
        assert_eq!(body, Value::Array(Vec::new()));
    }
}
