use crate::report::model::ScenarioReport;
use anyhow::Context;
use log::info;
use std::fs;
use std::path::Path;

/// Writes a report as pretty JSON, creating parent directories as needed.
pub fn write_report<P: AsRef<Path>>(path: P, report: &ScenarioReport) -> anyhow::Result<()> {
    let path_ref = path.as_ref();
    if let Some(parent) = path_ref.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("serializing scenario report")?;
    fs::write(path_ref, json)
        .with_context(|| format!("writing report {}", path_ref.display()))?;
    info!("report written to {}", path_ref.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::ScenarioConfig;
    use crate::workflow::runner::Runner;
    use tempfile::tempdir;

    #[test]
    fn report_is_written_as_json() {
        let scenario = ScenarioConfig::from_args(Some("castle".into()), &["Elmina Castle".into()]);
        let report = Runner::new(scenario).execute().unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports").join("castle.json");
        write_report(&path, &report).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["final_state"]["selected"], "Elmina Castle");
        assert_eq!(written["transitions"][0]["intent"]["intent"], "set_query");
        assert_eq!(written["final_state"]["map"]["state"], "ready");
    }
}
