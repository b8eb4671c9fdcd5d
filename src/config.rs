use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::DeployError;

pub const DEFAULT_ENABLE_VPC: bool = false;
pub const DEFAULT_ENABLE_SECURITY_GROUPS: bool = false;
pub const DEFAULT_ENABLE_DNS_HOSTNAMES: bool = true;
pub const DEFAULT_ENABLE_DNS_SUPPORT: bool = true;

/// Deployment description loaded from a YAML file.
///
/// Every field is optional at parse time. The three required ones are
/// checked by [`DeployConfig::validate`] so their absence surfaces as
/// [`DeployError::MissingRequiredField`] instead of a YAML error. Keys not
/// listed here are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeployConfig {
    pub project_name: Option<String>,
    pub environment: Option<String>,
    pub aws_region: Option<String>,
    pub common_tags: Option<Map<String, Value>>,
    pub enable_vpc: Option<bool>,
    pub enable_security_groups: Option<bool>,
    pub vpc_cidr: Option<String>,
    pub enable_dns_hostnames: Option<bool>,
    pub enable_dns_support: Option<bool>,
    pub public_subnets: Option<Vec<Value>>,
    pub private_subnets: Option<Vec<Value>>,
    pub security_groups: Option<Value>,
    pub services: Option<Value>,
    pub backend: Option<BackendSettings>,
}

/// Remote state location. Only meaningful with an S3 backend block in the
/// Terraform sources.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BackendSettings {
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub dynamodb_table: Option<String>,
}

impl DeployConfig {
    pub fn project_name(&self) -> Result<&str, DeployError> {
        required("project_name", self.project_name.as_deref())
    }

    pub fn environment(&self) -> Result<&str, DeployError> {
        required("environment", self.environment.as_deref())
    }

    pub fn aws_region(&self) -> Result<&str, DeployError> {
        required("aws_region", self.aws_region.as_deref())
    }

    pub fn enable_vpc(&self) -> bool {
        self.enable_vpc.unwrap_or(DEFAULT_ENABLE_VPC)
    }

    pub fn enable_security_groups(&self) -> bool {
        self.enable_security_groups
            .unwrap_or(DEFAULT_ENABLE_SECURITY_GROUPS)
    }

    pub fn enable_dns_hostnames(&self) -> bool {
        self.enable_dns_hostnames
            .unwrap_or(DEFAULT_ENABLE_DNS_HOSTNAMES)
    }

    pub fn enable_dns_support(&self) -> bool {
        self.enable_dns_support.unwrap_or(DEFAULT_ENABLE_DNS_SUPPORT)
    }

    /// Checks required fields and, when a backend block is given, that it
    /// names both a bucket and a region.
    pub fn validate(&self) -> Result<(), DeployError> {
        self.project_name()?;
        self.environment()?;
        self.aws_region()?;

        if let Some(backend) = &self.backend {
            backend.bucket()?;
            backend.region()?;
        }

        Ok(())
    }
}

impl BackendSettings {
    pub fn bucket(&self) -> Result<&str, DeployError> {
        required("backend.bucket", self.bucket.as_deref())
    }

    pub fn region(&self) -> Result<&str, DeployError> {
        required("backend.region", self.region.as_deref())
    }

    pub fn dynamodb_table(&self) -> Option<&str> {
        self.dynamodb_table.as_deref().filter(|t| !t.is_empty())
    }
}

fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, DeployError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DeployError::MissingRequiredField(name.to_string())),
    }
}

pub fn load(path: &Path) -> Result<DeployConfig, DeployError> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DeployError::ConfigNotFound(path.to_path_buf()),
        _ => DeployError::Io(e),
    })?;

    parse(&contents).map_err(|e| DeployError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub fn parse(contents: &str) -> Result<DeployConfig, serde_yaml::Error> {
    serde_yaml::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const FULL_CONFIG: &str = r#"
project_name: acme
environment: prod
aws_region: eu-west-1
common_tags:
  team: infra
  cost_center: "123"
enable_vpc: true
vpc_cidr: 10.0.0.0/16
public_subnets:
  - 10.0.1.0/24
  - 10.0.2.0/24
backend:
  bucket: acme-tfstate
  region: eu-west-1
  dynamodb_table: acme-locks
owner: somebody
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse(FULL_CONFIG).unwrap();
        assert_eq!(config.project_name.as_deref(), Some("acme"));
        assert_eq!(config.environment.as_deref(), Some("prod"));
        assert_eq!(config.vpc_cidr.as_deref(), Some("10.0.0.0/16"));
        assert!(config.enable_vpc());
        assert_eq!(config.public_subnets.as_ref().map(Vec::len), Some(2));

        let backend = config.backend.as_ref().unwrap();
        assert_eq!(backend.bucket().unwrap(), "acme-tfstate");
        assert_eq!(backend.dynamodb_table(), Some("acme-locks"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_common_tags_keep_file_order() {
        let config = parse(FULL_CONFIG).unwrap();
        let keys: Vec<&str> = config
            .common_tags
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["team", "cost_center"]);
    }

    #[test]
    fn test_defaults_when_absent() {
        let config = parse("project_name: x\nenvironment: dev\naws_region: us-east-1\n").unwrap();
        assert!(!config.enable_vpc());
        assert!(!config.enable_security_groups());
        assert!(config.enable_dns_hostnames());
        assert!(config.enable_dns_support());
        assert!(config.backend.is_none());
    }

    #[test]
    fn test_validate_missing_region() {
        let config = parse("project_name: x\nenvironment: dev\n").unwrap();
        match config.validate() {
            Err(DeployError::MissingRequiredField(name)) => assert_eq!(name, "aws_region"),
            other => panic!("expected MissingRequiredField, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_empty_project_name() {
        let config = parse("project_name: ''\nenvironment: dev\naws_region: us-east-1\n").unwrap();
        match config.validate() {
            Err(DeployError::MissingRequiredField(name)) => assert_eq!(name, "project_name"),
            other => panic!("expected MissingRequiredField, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_incomplete_backend() {
        let config = parse(
            "project_name: x\nenvironment: dev\naws_region: us-east-1\nbackend:\n  bucket: state\n",
        )
        .unwrap();
        match config.validate() {
            Err(DeployError::MissingRequiredField(name)) => assert_eq!(name, "backend.region"),
            other => panic!("expected MissingRequiredField, got {:?}", other),
        }
    }

    #[test]
    fn test_null_optional_is_absent() {
        let config =
            parse("project_name: x\nenvironment: dev\naws_region: us-east-1\ncommon_tags:\n").unwrap();
        assert!(config.common_tags.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        match load(&path) {
            Err(DeployError::ConfigNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "project_name: [unclosed").unwrap();

        assert!(matches!(load(&path), Err(DeployError::ConfigParse { .. })));
    }

    #[test]
    fn test_load_wrong_value_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("typed.yaml");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "project_name: x\nenable_vpc: [true]").unwrap();

        assert!(matches!(load(&path), Err(DeployError::ConfigParse { .. })));
    }

    #[test]
    fn test_load_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", FULL_CONFIG).unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.aws_region().unwrap(), "eu-west-1");
    }
}
