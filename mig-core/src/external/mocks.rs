// mig-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::{ProbeExecutor, ToolOutput};
use crate::error::{CoreError, CoreResult};
use crate::processing::media_type::MediaTypeGuess;
use crate::sources::ProbeSource;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Canned outcome of one tool invocation.
///
/// `CoreError` is not `Clone`, so failures are described here and turned
/// into a fresh error on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockToolResponse {
    /// The tool ran and printed this on stdout.
    Output(Vec<u8>),
    /// The tool binary does not exist.
    Missing,
    /// The tool ran and exited with `code`, printing `stderr`.
    Failed { code: i32, stderr: String },
}

impl MockToolResponse {
    pub fn output(stdout: impl Into<Vec<u8>>) -> Self {
        MockToolResponse::Output(stdout.into())
    }
}

/// Mock implementation of ProbeExecutor.
///
/// Tools without a configured response behave as if the binary was missing.
#[derive(Clone, Default)]
pub struct MockProbeExecutor {
    responses: Rc<RefCell<HashMap<ProbeSource, MockToolResponse>>>,
    media_type: Rc<RefCell<MediaTypeGuess>>,
    received_calls: Rc<RefCell<Vec<(ProbeSource, PathBuf)>>>,
}

impl MockProbeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the response for mediainfo, ffprobe or exiftool.
    pub fn respond(&self, source: ProbeSource, response: MockToolResponse) -> &Self {
        self.responses.borrow_mut().insert(source, response);
        self
    }

    /// Sets the guess returned by the sniffer.
    pub fn sniff_as(&self, guess: MediaTypeGuess) -> &Self {
        *self.media_type.borrow_mut() = guess;
        self
    }

    /// Sources invoked so far, in call order.
    pub fn get_received_calls(&self) -> Vec<ProbeSource> {
        self.received_calls
            .borrow()
            .iter()
            .map(|(source, _)| *source)
            .collect()
    }

    fn call(&self, source: ProbeSource, path: &Path) -> CoreResult<ToolOutput> {
        self.received_calls
            .borrow_mut()
            .push((source, path.to_path_buf()));
        let command = format!("{} {}", source.key(), path.display());

        match self.responses.borrow().get(&source) {
            Some(MockToolResponse::Output(stdout)) => Ok(ToolOutput {
                command,
                stdout: stdout.clone(),
            }),
            Some(MockToolResponse::Failed { code, stderr }) => Err(CoreError::CommandFailed {
                command,
                status: exit_status(*code),
                stderr: stderr.clone(),
            }),
            Some(MockToolResponse::Missing) | None => {
                log::debug!("MockProbeExecutor: no {} configured", source.key());
                Err(CoreError::DependencyNotFound(source.key().to_string()))
            }
        }
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code as u32)
}

impl ProbeExecutor for MockProbeExecutor {
    fn mediainfo(&self, path: &Path) -> CoreResult<ToolOutput> {
        self.call(ProbeSource::Mediainfo, path)
    }

    fn ffprobe(&self, path: &Path) -> CoreResult<ToolOutput> {
        self.call(ProbeSource::Ffprobe, path)
    }

    fn exiftool(&self, path: &Path) -> CoreResult<ToolOutput> {
        self.call(ProbeSource::Exiftool, path)
    }

    fn sniff_media_type(&self, path: &Path) -> MediaTypeGuess {
        self.received_calls
            .borrow_mut()
            .push((ProbeSource::FileMagic, path.to_path_buf()));
        self.media_type.borrow().clone()
    }
}
