use super::{CommandExecutor, ExecError, ExecOutput};
use crate::backend::{BackendError, BlockingBackend};

const BACKEND_FAILED: &str = "Could not connect to backend server";
const BACKEND_DOWN: &str = "Backend server is not running. Please start the backend.";

/// Runs commands on the backend's `/execute` endpoint
pub struct RemoteExecutor {
    backend: BlockingBackend,
    cwd: String,
}

impl RemoteExecutor {
    pub fn new(backend: BlockingBackend) -> Self {
        Self {
            backend,
            cwd: "~".to_string(),
        }
    }

    /// Ask the backend where it is now; keep the old prompt on failure
    fn refresh_cwd(&mut self) {
        match self.backend.execute("pwd") {
            Ok(dir) => {
                let dir = dir.trim();
                if !dir.is_empty() {
                    self.cwd = dir.to_string();
                }
            }
            Err(e) => log::debug!("Could not refresh cwd after cd: {}", e),
        }
    }
}

impl From<BackendError> for ExecError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::Status(_) | BackendError::Parse(_) => {
                ExecError::Backend(BACKEND_FAILED.to_string())
            }
            BackendError::Network(_) => ExecError::Unreachable(BACKEND_DOWN.to_string()),
        }
    }
}

impl CommandExecutor for RemoteExecutor {
    fn execute(&mut self, line: &str) -> Result<ExecOutput, ExecError> {
        let command = line.trim();
        let output = self.backend.execute(command).map_err(|e| {
            log::debug!("Backend execute failed for {:?}: {}", command, e);
            ExecError::from(e)
        })?;

        let output = ExecOutput::from_wire(output);
        let is_cd = command
            .split_whitespace()
            .next()
            .is_some_and(|word| word.eq_ignore_ascii_case("cd"));
        if is_cd && output != ExecOutput::Clear {
            self.refresh_cwd();
        }
        Ok(output)
    }

    fn cwd(&self) -> &str {
        &self.cwd
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod remote_tests;
