use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use autoaws::Action;

/// Render terraform.tfvars from a YAML file and drive terraform init/plan/apply.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// YAML configuration file
    pub config: PathBuf,

    #[arg(value_enum, default_value_t = ActionArg::Deploy)]
    pub action: ActionArg,

    /// Directory containing the Terraform sources
    #[arg(short = 'C', long, env = "AUTOAWS_WORKING_DIR", default_value = ".")]
    pub working_dir: PathBuf,

    #[arg(long, env = "TERRAFORM_BIN", default_value = "terraform")]
    pub terraform_bin: PathBuf,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionArg {
    Deploy,
    Destroy,
    Render,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Deploy => Action::Deploy,
            ActionArg::Destroy => Action::Destroy,
            ActionArg::Render => Action::Render,
        }
    }
}
