//! Reading snapshots, instants and configuration from the command line.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use lexcase_core::Timestamp;
use lexcase_lifecycle::config::CONFIG_PATH_VAR;
use lexcase_lifecycle::{CaseSnapshot, EngineConfig};

/// Read a file, or stdin when the path is `-`.
pub fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read snapshot from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Parse exactly one snapshot.
pub fn parse_snapshot(raw: &str, origin: &str) -> Result<CaseSnapshot> {
    serde_json::from_str(raw).with_context(|| format!("{origin}: not a valid case snapshot"))
}

/// Parse a single snapshot object or an array of them.
pub fn parse_snapshots(raw: &str, origin: &str) -> Result<Vec<CaseSnapshot>> {
    let value: serde_json::Value =
        serde_json::from_str(raw).with_context(|| format!("{origin}: invalid JSON"))?;
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item)
                    .with_context(|| format!("{origin}[{i}]: not a valid case snapshot"))
            })
            .collect(),
        serde_json::Value::Object(_) => {
            let snapshot = serde_json::from_value(value)
                .with_context(|| format!("{origin}: not a valid case snapshot"))?;
            Ok(vec![snapshot])
        }
        _ => bail!("{origin}: expected a snapshot object or an array of snapshots"),
    }
}

pub fn read_snapshot(path: &Path) -> Result<CaseSnapshot> {
    parse_snapshot(&read_source(path)?, &path.display().to_string())
}

pub fn read_snapshots(path: &Path) -> Result<Vec<CaseSnapshot>> {
    parse_snapshots(&read_source(path)?, &path.display().to_string())
}

/// The evaluation instant: `--now` if given, otherwise the current time.
pub fn resolve_now(raw: Option<&str>) -> Result<Timestamp> {
    match raw {
        Some(s) => Timestamp::parse_lenient(s).with_context(|| format!("invalid --now value {s:?}")),
        None => Ok(Timestamp::now()),
    }
}

/// Load engine configuration. `--config` takes precedence over
/// `LEXCASE_CONFIG`; environment overrides apply either way.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            let path = path.display().to_string();
            EngineConfig::from_lookup(|var| {
                if var == CONFIG_PATH_VAR {
                    Some(path.clone())
                } else {
                    std::env::var(var).ok()
                }
            })
        }
        None => EngineConfig::from_env(),
    }
    .context("failed to load engine configuration")?;
    tracing::debug!(
        presentation_version = config.presentation.version(),
        at_risk_window_hours = config.sla.at_risk_window_hours,
        "engine configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_snapshot() {
        let snap = parse_snapshot(r#"{"is_assigned": true}"#, "inline").unwrap();
        assert!(snap.is_assigned);
    }

    #[test]
    fn test_parse_snapshots_accepts_object_or_array() {
        assert_eq!(parse_snapshots("{}", "inline").unwrap().len(), 1);
        let many = parse_snapshots(r#"[{}, {"is_cancelled": true}]"#, "inline").unwrap();
        assert_eq!(many.len(), 2);
        assert!(many[1].is_cancelled);
    }

    #[test]
    fn test_parse_snapshots_reports_bad_element() {
        let err = parse_snapshots(r#"[{}, {"is_assigned": "yes"}]"#, "batch.json").unwrap_err();
        assert!(format!("{err:#}").contains("batch.json[1]"), "{err:#}");
    }

    #[test]
    fn test_parse_snapshots_rejects_scalars() {
        assert!(parse_snapshots("42", "inline").is_err());
    }

    #[test]
    fn test_resolve_now() {
        let ts = resolve_now(Some("2026-03-10T14:00:00+02:00")).unwrap();
        assert_eq!(ts.to_iso8601(), "2026-03-10T12:00:00Z");
        assert!(resolve_now(Some("yesterday")).is_err());
        assert!(resolve_now(None).is_ok());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_snapshot(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("lexcase-cli-config-{}.yaml", std::process::id()));
        std::fs::write(&path, "sla:\n  at_risk_window_hours: 36\n").unwrap();
        let config = load_config(Some(&path));
        std::fs::remove_file(&path).ok();
        let config = config.unwrap();
        if std::env::var(lexcase_lifecycle::config::AT_RISK_HOURS_VAR).is_err() {
            assert_eq!(config.sla.at_risk_window_hours, 36);
        }
    }
}
