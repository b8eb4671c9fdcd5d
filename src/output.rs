use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::DeployConfig;
use crate::error::DeployError;
use crate::pipeline::Action;
use crate::terraform::backend::derive_backend_key;
use crate::workspace::Workspace;

#[derive(Debug, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Setting")]
    setting: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Table printed before a run so the operator sees what is about to be
/// touched.
pub fn summary(
    config: &DeployConfig,
    action: Action,
    workspace: &Workspace,
) -> Result<String, DeployError> {
    let project = config.project_name()?;
    let environment = config.environment()?;

    let state = match &config.backend {
        Some(backend) => format!(
            "s3://{}/{}",
            backend.bucket()?,
            derive_backend_key(project, environment)?
        ),
        None => "local".to_string(),
    };

    let rows = vec![
        row("Project", project),
        row("Environment", environment),
        row("Region", config.aws_region()?),
        row("Action", &action.to_string()),
        row("State", &state),
        row("Working dir", &workspace.root().display().to_string()),
    ];

    Ok(Table::new(rows).with(Style::rounded()).to_string())
}

fn row(setting: &'static str, value: &str) -> SummaryRow {
    SummaryRow {
        setting,
        value: value.to_string(),
    }
}
