//! Local model execution
//!
//! The model is an external CLI: the prompt goes in on stdin, the answer
//! comes back on stdout.

use async_trait::async_trait;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("failed to talk to model process: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that turns a prompt into an answer
#[async_trait]
pub trait ModelRunner: Send + Sync {
    async fn run(&self, prompt: &str) -> Result<String, ModelError>;

    /// Display name, used in error placeholders
    fn name(&self) -> &'static str;
}

/// Runs `ollama run <model>` per prompt
pub struct OllamaRunner {
    program: String,
    args: Vec<String>,
}

impl OllamaRunner {
    pub fn new(program: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["run".to_string(), model.into()],
        }
    }

    /// Run an arbitrary command instead of the ollama CLI
    pub fn with_command(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl ModelRunner for OllamaRunner {
    async fn run(&self, prompt: &str) -> Result<String, ModelError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ModelError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin while stdout drains, or a chatty child fills its pipe
        // and both sides block
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(prompt.as_bytes()).await?;
                // Dropping stdin closes the pipe so the model sees EOF
            }
            Ok::<(), std::io::Error>(())
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        fed?;
        if !output.status.success() {
            tracing::warn!(
                program = %self.program,
                exit_code = output.status.code().unwrap_or(-1),
                stderr = %String::from_utf8_lossy(&output.stderr),
                "Model process exited with failure"
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &'static str {
        "Ollama"
    }
}
