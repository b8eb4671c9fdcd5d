//! AutoAWS - YAML-driven Terraform deployments
//!
//! Compiles a deployment YAML file into `terraform.tfvars` and walks the
//! Terraform CLI through init, plan and apply (or destroy).

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod terraform;
pub mod tfvars;
pub mod workspace;

pub use config::{BackendSettings, DeployConfig};
pub use error::DeployError;
pub use pipeline::{Action, Outcome, Pipeline, Stage};
pub use prompt::{AssumeYes, Confirm, StdinConfirm};
pub use terraform::backend::derive_backend_key;
pub use terraform::{CommandOutput, CommandRunner, TerraformCli};
pub use workspace::Workspace;
