//! proper-get — print one value from a `.proper` file.
//!
//! ```text
//! proper-get --dir=conf --name=app --separator== --type=integer port
//! ```
//!
//! Accepts every `StoreConfig` flag plus `--type=raw|string|integer|double|
//! float|boolean` (default `raw`). The last argument not starting with `--`
//! is the key.

use std::process::ExitCode;

use proper_kv::{PropertiesError, PropertiesFile, PropertiesReader, StoreConfig, ValueKind};
use tracing::error;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("proper-get: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> proper_kv::Result<String> {
    let config = StoreConfig::from_args(args)?;
    let kind = parse_kind(args)?;
    let key = args
        .iter()
        .rev()
        .find(|a| !a.starts_with("--"))
        .ok_or_else(|| PropertiesError::Config("missing key argument".to_string()))?;

    let mut store = PropertiesFile::open(&config)?;
    match kind {
        None => store.get_string_raw(key),
        Some(kind) => Ok(store.get_value(key, kind)?.to_string()),
    }
}

/// `None` means the raw, unquoted string.
fn parse_kind(args: &[String]) -> proper_kv::Result<Option<ValueKind>> {
    let Some(val) = args.iter().rev().find_map(|a| a.strip_prefix("--type=")) else {
        return Ok(None);
    };
    let kind = match val {
        "raw" => return Ok(None),
        "string" => ValueKind::String,
        "integer" => ValueKind::Integer,
        "double" => ValueKind::Double,
        "float" => ValueKind::Float,
        "boolean" => ValueKind::Boolean,
        other => {
            return Err(PropertiesError::Config(format!("unknown --type: {:?}", other)));
        }
    };
    Ok(Some(kind))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn args(tmp: &TempDir, extra: &[&str]) -> Vec<String> {
        let mut list = vec![
            format!("--dir={}", tmp.path().display()),
            "--name=app".to_string(),
        ];
        list.extend(extra.iter().map(|s| s.to_string()));
        list
    }

    fn with_file(content: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("app.proper"), content).unwrap();
        tmp
    }

    #[test]
    fn test_parse_kind_values() {
        let cases = [
            ("--type=string", Some(ValueKind::String)),
            ("--type=integer", Some(ValueKind::Integer)),
            ("--type=double", Some(ValueKind::Double)),
            ("--type=float", Some(ValueKind::Float)),
            ("--type=boolean", Some(ValueKind::Boolean)),
            ("--type=raw", None),
        ];
        for (flag, expected) in cases {
            assert_eq!(parse_kind(&[flag.to_string()]).unwrap(), expected, "{}", flag);
        }
        assert_eq!(parse_kind(&[]).unwrap(), None);
    }

    #[test]
    fn test_parse_kind_last_flag_wins() {
        let list = vec!["--type=integer".to_string(), "--type=boolean".to_string()];
        assert_eq!(parse_kind(&list).unwrap(), Some(ValueKind::Boolean));
    }

    #[test]
    fn test_parse_kind_rejects_unknown() {
        let err = parse_kind(&["--type=date".to_string()]).unwrap_err();
        assert!(matches!(err, PropertiesError::Config(_)));
    }

    #[test]
    fn test_run_raw_and_typed() {
        let tmp = with_file("name=\"John\"\nage=42\non=TRUE\n");
        assert_eq!(run(&args(&tmp, &["name"])).unwrap(), "\"John\"");
        assert_eq!(run(&args(&tmp, &["--type=string", "name"])).unwrap(), "John");
        assert_eq!(run(&args(&tmp, &["--type=integer", "age"])).unwrap(), "42");
        assert_eq!(run(&args(&tmp, &["--type=boolean", "on"])).unwrap(), "true");
    }

    #[test]
    fn test_run_uses_last_positional_as_key() {
        let tmp = with_file("first=1\nsecond=2\n");
        assert_eq!(run(&args(&tmp, &["first", "second"])).unwrap(), "2");
    }

    #[test]
    fn test_run_missing_key_argument() {
        let tmp = with_file("a=1\n");
        let err = run(&args(&tmp, &["--type=integer"])).unwrap_err();
        assert!(matches!(err, PropertiesError::Config(_)));
    }

    #[test]
    fn test_run_lookup_errors() {
        let tmp = with_file("age=abc\n");
        assert!(matches!(
            run(&args(&tmp, &["missing"])),
            Err(PropertiesError::KeyNotFound { .. })
        ));
        assert!(matches!(
            run(&args(&tmp, &["--type=integer", "age"])),
            Err(PropertiesError::Parse { .. })
        ));
    }
}
