//! The external text generator seam.
//!
//! The generator is a black box: it accepts a prompt and either returns a
//! text response or fails. Failures are never fatal to a submission; callers
//! fall back to snapshot-only normalisation.

use std::future::Future;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("failed to start generator: {0}")]
  Spawn(#[from] std::io::Error),

  #[error("generator timed out after {0}s")]
  Timeout(u64),

  #[error("generator exited with {code:?}: {stderr}")]
  Failed { code: Option<i32>, stderr: String },

  #[error("generator produced no output")]
  Empty,
}

/// Produces free text for an analysis prompt. At most one attempt is made per
/// call; implementations bound the call with their own timeout.
pub trait TextGenerator: Send + Sync {
  fn generate<'a>(
    &'a self,
    prompt: &'a str,
  ) -> impl Future<Output = Result<String, GenerateError>> + Send + 'a;
}
