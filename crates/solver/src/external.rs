//! JSON-over-stdio plumbing for external programs.
//!
//! A request is written as one JSON document on the child's stdin; the reply
//! is one JSON document on its stdout. Non-zero exit is an error and stderr
//! is kept for the message. There is no retry and no timeout.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uam_config::CommandConfig;
use uam_core::Quantity;
use uam_model::{ModelInfo, Problem, SubstitutionSet, VarPath};

use crate::{Solution, SolveError, Solver};

/// Failures of the process round trip itself.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("I/O error talking to child process: {0}")]
    Io(#[from] io::Error),
    #[error("`{program}` exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("invalid JSON on the wire: {0}")]
    Protocol(#[from] serde_json::Error),
}

/// An external program invoked once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl JsonCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn from_config(config: &CommandConfig) -> Self {
        Self::new(&config.program).args(config.args.iter().cloned())
    }

    pub fn program(&self) -> String {
        self.program.display().to_string()
    }

    /// Run the program with `request` on stdin and decode its stdout.
    pub fn call<Req, Resp>(&self, request: &Req) -> Result<Resp, CommandError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_vec(request)?;
        debug!(program = %self.program(), bytes = body.len(), "sending request");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: self.program(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("child stdin was not captured"))?;
        // Feed stdin from a separate thread so a chatty child cannot block
        // on a full stdout pipe while we are still writing.
        let writer = std::thread::spawn(move || stdin.write_all(&body));
        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(Ok(())) => {}
            // The child may answer without reading its input; its exit
            // status decides.
            Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {}
            Ok(Err(err)) => return Err(err.into()),
            Err(_) => return Err(io::Error::other("stdin writer panicked").into()),
        }

        if !output.status.success() {
            return Err(CommandError::Exit {
                program: self.program(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        debug!(program = %self.program(), bytes = output.stdout.len(), "received reply");
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[derive(Serialize)]
struct SolveRequest<'a> {
    objective: &'a VarPath,
    models: Vec<ModelInfo>,
    substitutions: &'a SubstitutionSet,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum SolveReply {
    Optimal {
        objective: Quantity,
        #[serde(default)]
        variables: BTreeMap<VarPath, Quantity>,
    },
    Infeasible {
        #[serde(default)]
        message: String,
    },
    Unbounded {
        #[serde(default)]
        message: String,
    },
    Error {
        #[serde(default)]
        message: String,
    },
}

impl SolveReply {
    fn into_result(self) -> Result<Solution, SolveError> {
        match self {
            SolveReply::Optimal {
                objective,
                variables,
            } => Ok(Solution::new(objective, variables)),
            SolveReply::Infeasible { message } => Err(SolveError::Infeasible(message)),
            SolveReply::Unbounded { message } => Err(SolveError::Unbounded(message)),
            SolveReply::Error { message } => Err(SolveError::Failed(message)),
        }
    }
}

/// [`Solver`] backed by an external geometric-programming program.
#[derive(Debug, Clone)]
pub struct ExternalSolver {
    command: JsonCommand,
}

impl ExternalSolver {
    pub fn new(command: JsonCommand) -> Self {
        Self { command }
    }

    pub fn from_config(config: &CommandConfig) -> Self {
        Self::new(JsonCommand::from_config(config))
    }
}

impl Solver for ExternalSolver {
    fn solve(&self, problem: &Problem) -> Result<Solution, SolveError> {
        let request = SolveRequest {
            objective: problem.objective(),
            models: problem.models(),
            substitutions: problem.substitutions(),
        };
        let reply: SolveReply = self.command.call(&request)?;
        let result = reply.into_result();
        if let Ok(solution) = &result {
            debug!(variables = solution.len(), "solver returned optimum");
        }
        result
    }
}
