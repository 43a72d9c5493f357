use anyhow::{anyhow, Result};
use tracing::warn;

use crate::domain::{ScanRequest, ScanVerdict};
use crate::presenter::{present, PresentationModel};
use crate::scanner::{ScanError, VerdictSource};

/// Error shown to the user after a failed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    pub kind: &'static str,
    pub status: Option<u16>,
    pub message: String,
}

impl ScanFailure {
    pub fn from_error(err: &ScanError, endpoint: &str) -> Self {
        let status = match err {
            ScanError::Transport(code) => Some(*code),
            _ => None,
        };
        Self {
            kind: err.kind(),
            status,
            message: err.user_message(endpoint),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Scanning { url: String },
    Resolved {
        verdict: ScanVerdict,
        model: Box<PresentationModel>,
    },
    Failed(ScanFailure),
}

impl ViewState {
    /// A new scan may start from `Idle` or from a terminal state.
    pub fn can_scan(&self) -> bool {
        !matches!(self, Self::Scanning { .. })
    }

    pub fn begin(&mut self, req: &ScanRequest) -> Result<()> {
        if !self.can_scan() {
            return Err(anyhow!("a scan is already in progress"));
        }
        *self = Self::Scanning {
            url: req.url().to_string(),
        };
        Ok(())
    }

    pub fn resolve(&mut self, verdict: ScanVerdict) -> Result<()> {
        if !matches!(self, Self::Scanning { .. }) {
            return Err(anyhow!("no scan in progress"));
        }
        let model = Box::new(present(&verdict));
        *self = Self::Resolved { verdict, model };
        Ok(())
    }

    /// Failures are accepted from any non-scanning state too, so blank input
    /// can be reported without ever entering `Scanning`.
    pub fn fail(&mut self, failure: ScanFailure) {
        *self = Self::Failed(failure);
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}

/// Owns the current verdict/error slot and the source used to fill it.
pub struct ScanSession<S> {
    source: S,
    state: ViewState,
}

impl<S: VerdictSource> ScanSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Runs one scan to completion. `on_scanning` sees the `Scanning` state
    /// before the request goes out; it is not called for blank input. The
    /// state only ever moves `Scanning -> Resolved | Failed` as a whole.
    pub async fn submit(
        &mut self,
        input: &str,
        on_scanning: impl FnOnce(&ViewState),
    ) -> Result<()> {
        if !self.state.can_scan() {
            return Err(anyhow!("a scan is already in progress"));
        }

        let req = match ScanRequest::new(input) {
            Ok(req) => req,
            Err(err) => {
                self.state
                    .fail(ScanFailure::from_error(&err, self.source.endpoint()));
                return Ok(());
            }
        };

        self.state.begin(&req)?;
        on_scanning(&self.state);

        match self.source.fetch(&req).await {
            Ok(verdict) => self.state.resolve(verdict)?,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, url = req.url(), "scan.failed");
                self.state
                    .fail(ScanFailure::from_error(&err, self.source.endpoint()));
            }
        }
        Ok(())
    }
}
