//! Background removal collaborators.
//!
//! The removal service is opaque: image bytes in, image bytes out. The
//! workspace only ever talks to it through [`BackgroundRemover`].

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use serde::{Deserialize, Serialize};

use crate::error::{CutoutError, Result};

/// Turns an uploaded image into one with its background removed.
pub trait BackgroundRemover {
    fn remove_background(&self, image: &[u8]) -> Result<Vec<u8>>;
}

impl<F> BackgroundRemover for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>>,
{
    fn remove_background(&self, image: &[u8]) -> Result<Vec<u8>> {
        self(image)
    }
}

/// Returns the upload unchanged, for editing an image as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRemover;

impl BackgroundRemover for PassthroughRemover {
    fn remove_background(&self, image: &[u8]) -> Result<Vec<u8>> {
        Ok(image.to_vec())
    }
}

/// Runs an external program that reads the image on stdin and writes the
/// processed image to stdout.
///
/// `rembg i - -` works directly; an HTTP service can be reached with
/// `curl -sf -F file=@- http://localhost:8000/remove-bg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRemover {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandRemover {
    pub fn new(command: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl BackgroundRemover for CommandRemover {
    fn remove_background(&self, image: &[u8]) -> Result<Vec<u8>> {
        log::info!("Running remover: {} {}", self.command, self.args.join(" "));

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CutoutError::Upstream {
                message: format!("Failed to start '{}': {}", self.command, e),
                help: Some("Check the remover command in cutout.yaml".to_string()),
            })?;

        // Feed stdin from another thread so a remover that streams output
        // before reading all input cannot deadlock on a full pipe.
        let mut stdin = child.stdin.take().ok_or_else(|| upstream("stdin was not captured"))?;
        let input = image.to_vec();
        let writer = thread::spawn(move || stdin.write_all(&input));

        let output = child
            .wait_with_output()
            .map_err(|e| upstream(format!("Failed to run '{}': {}", self.command, e)))?;

        // A remover may exit without consuming all input; its exit status
        // decides success, not the write.
        if let Ok(Err(e)) = writer.join() {
            log::debug!("Remover closed stdin early: {}", e);
        }

        if !output.status.success() {
            let errors = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CutoutError::Upstream {
                message: format!("'{}' exited with {}", self.command, output.status),
                help: Some(errors).filter(|s| !s.is_empty()),
            });
        }
        if output.stdout.is_empty() {
            return Err(upstream(format!("'{}' produced no output", self.command)));
        }

        Ok(output.stdout)
    }
}

fn upstream(message: impl Into<String>) -> CutoutError {
    CutoutError::Upstream {
        message: message.into(),
        help: None,
    }
}
