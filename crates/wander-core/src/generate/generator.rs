//! The [`ItineraryGenerator`] trait and its implementations.

use std::process::Stdio;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

/// Turns a prompt into a raw itinerary response.
///
/// Object safe, so callers can hold a `Box<dyn ItineraryGenerator>` chosen
/// from configuration.
#[async_trait]
pub trait ItineraryGenerator: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Send `prompt` and return the response text unchanged.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn ItineraryGenerator) {}
};

/// Runs an external program: the prompt goes to its stdin and the plan is
/// read from its stdout.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl ItineraryGenerator for CommandGenerator {
    fn name(&self) -> &str {
        &self.program
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        info!(program = %self.program, "running itinerary generator");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| {
                format!(
                    "failed to spawn generator '{}' -- is it installed and on PATH?",
                    self.program
                )
            })?;

        // Write the prompt while output is drained. A child may exit without
        // reading it, which closes the pipe early.
        let stdin = child.stdin.take();
        let write_prompt = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(prompt.as_bytes()).await {
                Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => {
                    debug!("generator closed stdin before reading the whole prompt");
                    Ok(())
                }
                other => other,
            }
        };
        let (written, output) = tokio::join!(write_prompt, child.wait_with_output());
        let output =
            output.with_context(|| format!("failed to wait for generator '{}'", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "generator '{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }

        written.context("failed to write prompt to generator stdin")?;

        let text = String::from_utf8(output.stdout).context("generator output is not UTF-8")?;
        debug!(bytes = text.len(), "generator finished");
        Ok(text)
    }
}

/// Returns a fixed response. Used when the plan was produced elsewhere
/// (`trip create --plan`) and in tests.
#[derive(Debug, Clone)]
pub struct StaticGenerator {
    response: String,
}

impl StaticGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl ItineraryGenerator for StaticGenerator {
    fn name(&self) -> &str {
        "static"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }
}
