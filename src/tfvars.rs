//! Renders a [`DeployConfig`] into the contents of `terraform.tfvars`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::DeployConfig;
use crate::error::DeployError;

pub const TFVARS_FILE: &str = "terraform.tfvars";

/// Renders the variables file. Lines are joined by `\n` with no trailing
/// newline. Optional fields are emitted only when present, except the four
/// feature flags which always appear with their defaults.
pub fn render(config: &DeployConfig) -> Result<String, DeployError> {
    let mut vars = Tfvars::default();

    vars.string("project_name", config.project_name()?)?;
    vars.string("environment", config.environment()?)?;
    vars.string("aws_region", config.aws_region()?)?;

    if let Some(tags) = &config.common_tags {
        vars.compact("common_tags", tags)?;
    }

    vars.bool("enable_vpc", config.enable_vpc());
    vars.bool("enable_security_groups", config.enable_security_groups());

    if let Some(cidr) = &config.vpc_cidr {
        vars.string("vpc_cidr", cidr)?;
    }

    vars.bool("enable_dns_hostnames", config.enable_dns_hostnames());
    vars.bool("enable_dns_support", config.enable_dns_support());

    if let Some(subnets) = &config.public_subnets {
        vars.pretty("public_subnets", subnets)?;
    }
    if let Some(subnets) = &config.private_subnets {
        vars.pretty("private_subnets", subnets)?;
    }
    if let Some(groups) = &config.security_groups {
        vars.pretty("security_groups", groups)?;
    }
    if let Some(services) = &config.services {
        vars.pretty("services", services)?;
    }

    Ok(vars.finish())
}

/// Writes `contents` to `terraform.tfvars` under `dir`, replacing any
/// previous file.
pub fn write(dir: &Path, contents: &str) -> Result<PathBuf, DeployError> {
    let path = dir.join(TFVARS_FILE);
    fs::write(&path, contents)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote variables file");
    Ok(path)
}

#[derive(Debug, Default)]
struct Tfvars {
    lines: Vec<String>,
}

impl Tfvars {
    // JSON string escaping is a subset of HCL's, so quoted values stay valid.
    fn string(&mut self, name: &'static str, value: &str) -> Result<(), DeployError> {
        let quoted = serde_json::to_string(value)
            .map_err(|source| DeployError::Serialization { field: name, source })?;
        self.push(name, &quoted);
        Ok(())
    }

    fn bool(&mut self, name: &'static str, value: bool) {
        self.push(name, if value { "true" } else { "false" });
    }

    fn compact<T: Serialize>(&mut self, name: &'static str, value: &T) -> Result<(), DeployError> {
        let json = serde_json::to_string(value)
            .map_err(|source| DeployError::Serialization { field: name, source })?;
        self.push(name, &json);
        Ok(())
    }

    fn pretty<T: Serialize>(&mut self, name: &'static str, value: &T) -> Result<(), DeployError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| DeployError::Serialization { field: name, source })?;
        self.push(name, &json);
        Ok(())
    }

    fn push(&mut self, name: &str, value: &str) {
        self.lines.push(format!("{name} = {value}"));
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}
