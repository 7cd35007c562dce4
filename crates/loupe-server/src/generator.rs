//! [`CliGenerator`]: the text generator as an external command.
//!
//! The prompt is written to the child's stdin; its trimmed stdout is the
//! response. One attempt per call, bounded by a timeout, no retries.

use std::{io, process::Stdio, time::Duration};

use loupe_core::generate::{GenerateError, TextGenerator};
use tokio::{io::AsyncWriteExt as _, process::Command, time::timeout};

use crate::GeneratorConfig;

pub struct CliGenerator {
  config: GeneratorConfig,
}

impl CliGenerator {
  pub fn new(config: GeneratorConfig) -> Self { Self { config } }

  async fn run(&self, prompt: &str) -> Result<String, GenerateError> {
    let mut child = Command::new(&self.config.program)
      .args(&self.config.args)
      .env("NO_COLOR", "1")
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true)
      .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
      // A child that exits without reading its input is judged by its exit
      // status, not by the broken pipe.
      if let Err(e) = write_all_and_close(&mut stdin, prompt).await
        && e.kind() != io::ErrorKind::BrokenPipe
      {
        return Err(e.into());
      }
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
      return Err(GenerateError::Failed {
        code:   output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
      });
    }

    let text = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    if text.is_empty() {
      return Err(GenerateError::Empty);
    }
    Ok(text)
  }
}

async fn write_all_and_close(
  stdin: &mut tokio::process::ChildStdin,
  prompt: &str,
) -> io::Result<()> {
  stdin.write_all(prompt.as_bytes()).await?;
  stdin.shutdown().await
}

impl TextGenerator for CliGenerator {
  async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
    let secs = self.config.timeout_secs;
    tracing::debug!(program = %self.config.program, chars = prompt.len(), "calling generator");
    // Dropping the timed-out future drops the child, which kills it.
    match timeout(Duration::from_secs(secs), self.run(prompt)).await {
      Ok(result) => result,
      Err(_) => Err(GenerateError::Timeout(secs)),
    }
  }
}

#[cfg(all(test, unix))]
mod tests {
  use super::*;

  fn sh(script: &str, timeout_secs: u64) -> CliGenerator {
    CliGenerator::new(GeneratorConfig {
      program: "sh".into(),
      args: vec!["-c".into(), script.into()],
      timeout_secs,
    })
  }

  #[tokio::test]
  async fn stdout_is_the_trimmed_response() {
    let reply = sh("cat", 10).generate("  TYPE: Dashboard\n").await.unwrap();
    assert_eq!(reply, "TYPE: Dashboard");
  }

  #[tokio::test]
  async fn no_color_is_set_for_the_child() {
    let reply = sh("cat >/dev/null; echo \"$NO_COLOR\"", 10).generate("x").await.unwrap();
    assert_eq!(reply, "1");
  }

  #[tokio::test]
  async fn non_zero_exit_is_a_failure() {
    let err = sh("echo oops >&2; exit 3", 10).generate("x").await.unwrap_err();
    match err {
      GenerateError::Failed { code, stderr } => {
        assert_eq!(code, Some(3));
        assert_eq!(stderr, "oops");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[tokio::test]
  async fn blank_output_is_empty() {
    let err = sh("cat >/dev/null; echo '   '", 10).generate("x").await.unwrap_err();
    assert!(matches!(err, GenerateError::Empty));
  }

  #[tokio::test]
  async fn slow_generator_times_out() {
    let err = sh("sleep 5", 1).generate("x").await.unwrap_err();
    assert!(matches!(err, GenerateError::Timeout(1)));
  }

  #[tokio::test]
  async fn missing_program_is_a_spawn_error() {
    let generator = CliGenerator::new(GeneratorConfig {
      program: "/nonexistent/loupe-generator".into(),
      ..GeneratorConfig::default()
    });
    let err = generator.generate("x").await.unwrap_err();
    assert!(matches!(err, GenerateError::Spawn(_)));
  }
}
