//! Remote state wiring for `terraform init`.

use crate::config::DeployConfig;
use crate::error::DeployError;

/// State key namespaced by project and environment.
pub fn derive_backend_key(project_name: &str, environment: &str) -> Result<String, DeployError> {
    if project_name.is_empty() {
        return Err(DeployError::MissingRequiredField("project_name".to_string()));
    }
    if environment.is_empty() {
        return Err(DeployError::MissingRequiredField("environment".to_string()));
    }
    Ok(format!(
        "projects/{project_name}/{environment}/terraform.tfstate"
    ))
}

/// Arguments for `terraform init`. Without a `backend` block the
/// working directory keeps local state and no backend flags are passed.
pub fn init_args(config: &DeployConfig) -> Result<Vec<String>, DeployError> {
    let mut args = vec!["init".to_string()];

    let Some(backend) = &config.backend else {
        return Ok(args);
    };

    let key = derive_backend_key(config.project_name()?, config.environment()?)?;

    args.push(format!("-backend-config=bucket={}", backend.bucket()?));
    args.push(format!("-backend-config=key={key}"));
    args.push(format!("-backend-config=region={}", backend.region()?));
    if let Some(table) = backend.dynamodb_table() {
        args.push(format!("-backend-config=dynamodb_table={table}"));
    }
    // Allows switching state locations between runs.
    args.push("-reconfigure".to_string());

    Ok(args)
}
