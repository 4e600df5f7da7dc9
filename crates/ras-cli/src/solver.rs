//! Running plans with the HEC-RAS solver.
//!
//! The solver is started as `<exe> -c <project> <plan>` and blocks until
//! the computation finishes.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Outcome of one plan computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeOutcome {
    pub success: bool,
    /// Process exit code, `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub elapsed: Duration,
}

/// Something that can compute a plan of a project.
pub trait PlanExecutor {
    /// Run `plan_file` of `project_file` to completion.
    ///
    /// # Errors
    ///
    /// Returns an error when the computation cannot be started. A solver that
    /// starts and fails is reported through [`ComputeOutcome::success`].
    fn compute(&self, project_file: &Path, plan_file: &Path) -> Result<ComputeOutcome>;
}

/// The HEC-RAS executable invoked in compute mode.
#[derive(Debug, Clone)]
pub struct SolverCommand {
    executable: PathBuf,
}

impl SolverCommand {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// The process invocation for one plan.
    pub fn command(&self, project_file: &Path, plan_file: &Path) -> Command {
        let mut command = Command::new(&self.executable);
        command.arg("-c").arg(project_file).arg(plan_file);
        command
    }
}

impl PlanExecutor for SolverCommand {
    fn compute(&self, project_file: &Path, plan_file: &Path) -> Result<ComputeOutcome> {
        info!(
            executable = %self.executable.display(),
            project = %project_file.display(),
            plan = %plan_file.display(),
            "starting computation"
        );
        let started = Instant::now();
        let status = self
            .command(project_file, plan_file)
            .status()
            .with_context(|| format!("start solver {}", self.executable.display()))?;
        let outcome = outcome_from_status(status, started.elapsed());
        if outcome.success {
            info!(elapsed_ms = outcome.elapsed.as_millis(), "computation finished");
        } else {
            warn!(
                exit_code = ?outcome.exit_code,
                elapsed_ms = outcome.elapsed.as_millis(),
                "computation failed"
            );
        }
        Ok(outcome)
    }
}

fn outcome_from_status(status: ExitStatus, elapsed: Duration) -> ComputeOutcome {
    ComputeOutcome {
        success: status.success(),
        exit_code: status.code(),
        elapsed,
    }
}
