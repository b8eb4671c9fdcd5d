//! Linear deploy/destroy run over the provisioning tool.
//!
//! Each [`Stage`] either continues, halts the run because a human declined,
//! or fails with a [`DeployError`]. Nothing here exits the process, so the
//! whole sequence runs against a fake [`CommandRunner`] in tests.

use std::fmt;

use crate::config::DeployConfig;
use crate::error::DeployError;
use crate::prompt::Confirm;
use crate::terraform::{CommandOutput, CommandRunner, backend};
use crate::tfvars;
use crate::workspace::{PLAN_FILE, Workspace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Deploy,
    Destroy,
    /// Write `terraform.tfvars` and stop.
    Render,
}

impl Action {
    pub fn stages(self) -> &'static [Stage] {
        match self {
            Action::Deploy => &[
                Stage::ValidateConfig,
                Stage::RenderVariables,
                Stage::InitBackend,
                Stage::Plan,
                Stage::Confirm,
                Stage::Apply,
            ],
            Action::Destroy => &[
                Stage::ValidateConfig,
                Stage::RenderVariables,
                Stage::InitBackend,
                Stage::Plan,
                Stage::Confirm,
                Stage::Destroy,
                Stage::Cleanup,
            ],
            Action::Render => &[Stage::ValidateConfig, Stage::RenderVariables],
        }
    }

    fn plan_args(self) -> Vec<String> {
        match self {
            Action::Destroy => args(&["plan", "-destroy"]),
            Action::Deploy | Action::Render => vec!["plan".to_string(), format!("-out={PLAN_FILE}")],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Deploy => "deploy",
            Action::Destroy => "destroy",
            Action::Render => "render",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidateConfig,
    RenderVariables,
    InitBackend,
    Plan,
    Confirm,
    Apply,
    Destroy,
    Cleanup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ValidateConfig => "validate-config",
            Stage::RenderVariables => "render-variables",
            Stage::InitBackend => "init-backend",
            Stage::Plan => "plan",
            Stage::Confirm => "confirm",
            Stage::Apply => "apply",
            Stage::Destroy => "destroy",
            Stage::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// A confirmation was declined. Not an error.
    Cancelled { at: Stage },
}

enum Flow {
    Continue,
    Halt,
}

pub struct Pipeline<'a, R, C> {
    config: &'a DeployConfig,
    workspace: Workspace,
    runner: R,
    confirm: C,
    completed: Vec<Stage>,
}

impl<'a, R: CommandRunner, C: Confirm> Pipeline<'a, R, C> {
    pub fn new(config: &'a DeployConfig, workspace: Workspace, runner: R, confirm: C) -> Self {
        Self {
            config,
            workspace,
            runner,
            confirm,
            completed: Vec::new(),
        }
    }

    /// Stages that finished successfully, in order.
    pub fn completed(&self) -> &[Stage] {
        &self.completed
    }

    pub fn run(&mut self, action: Action) -> Result<Outcome, DeployError> {
        for &stage in action.stages() {
            tracing::info!(%action, %stage, "stage started");
            match self.execute(stage, action)? {
                Flow::Continue => self.completed.push(stage),
                Flow::Halt => {
                    tracing::warn!(%action, %stage, "run cancelled");
                    return Ok(Outcome::Cancelled { at: stage });
                }
            }
        }

        tracing::info!(%action, "run complete");
        Ok(Outcome::Completed)
    }

    fn execute(&mut self, stage: Stage, action: Action) -> Result<Flow, DeployError> {
        match stage {
            Stage::ValidateConfig => self.config.validate()?,
            Stage::RenderVariables => {
                let contents = tfvars::render(self.config)?;
                let path = tfvars::write(self.workspace.root(), &contents)?;
                println!("Created {}", path.display());
            }
            Stage::InitBackend => {
                let init = backend::init_args(self.config)?;
                self.terraform(&init)?;
                println!("Terraform initialized successfully.");
            }
            Stage::Plan => {
                self.terraform(&action.plan_args())?;
            }
            Stage::Confirm => {
                let label = self.label()?;
                let question = match action {
                    Action::Destroy => {
                        println!(
                            "\nWARNING: This will permanently destroy all infrastructure for {label}!"
                        );
                        "Type 'yes' to continue: ".to_string()
                    }
                    Action::Deploy | Action::Render => format!("\nDeploy {label}? (yes/no): "),
                };
                if !self.confirm.confirm(&question)? {
                    println!("{} cancelled.", capitalize(&action.to_string()));
                    return Ok(Flow::Halt);
                }
            }
            Stage::Apply => {
                self.terraform(&args(&["apply", PLAN_FILE]))?;
                println!("\n{} deployed successfully!", self.label()?);
            }
            Stage::Destroy => {
                self.terraform(&args(&["destroy", "-auto-approve"]))?;
                println!(
                    "\nInfrastructure for {} destroyed successfully!",
                    self.label()?
                );
            }
            Stage::Cleanup => {
                let question =
                    "\nRemove Terraform local files (terraform.tfvars, tfplan, .terraform)? (yes/no): ";
                if self.confirm.confirm(question)? {
                    for path in self.workspace.cleanup()? {
                        println!("Removed {}", path.display());
                    }
                } else {
                    tracing::info!("local files kept");
                }
            }
        }

        Ok(Flow::Continue)
    }

    fn terraform(&mut self, args: &[String]) -> Result<CommandOutput, DeployError> {
        println!("\nRunning: terraform {}", args.join(" "));
        let output = self.runner.run(args)?;
        if !output.stdout.is_empty() {
            println!("{}", output.stdout);
        }
        if !output.stderr.is_empty() {
            eprintln!("{}", output.stderr);
        }
        Ok(output)
    }

    fn label(&self) -> Result<String, DeployError> {
        Ok(format!(
            "{}-{}",
            self.config.project_name()?,
            self.config.environment()?
        ))
    }
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
