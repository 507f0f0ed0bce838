//! One-at-a-time guard around the native share sheet.
//!
//! A [`ShareGate`] owns a single pending-share slot. `request_share` fills the
//! slot and hands a [`SendIntent`] to the platform [`ChooserLauncher`]; the
//! launcher later reports back through the [`ChooserResultHandler`] it was
//! given, which resolves the caller's [`ShareCompletion`] and empties the slot.
//!
//! States: `Idle` and `Pending`. A request while `Pending` is rejected with
//! [`Error::AlreadySharing`] and leaves the pending share untouched.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{ChooserResult, SendIntent, ShareRequest};

/// Presents the platform chooser for a send intent.
///
/// Implementations must not block until the user picks a target: they
/// dispatch and return, then call `handler` once the chooser gives control
/// back. Returning an error means nothing was dispatched.
pub trait ChooserLauncher: Send + Sync {
    fn present(&self, intent: SendIntent, handler: ChooserResultHandler) -> Result<()>;
}

/// Whether a share is currently waiting on the chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Pending,
}

#[derive(Debug)]
enum ShareOutcome {
    Shared,
    Cancelled,
    Failed(Error),
}

impl ShareOutcome {
    fn into_result(self) -> Result<()> {
        match self {
            ShareOutcome::Shared => Ok(()),
            ShareOutcome::Cancelled => Err(Error::Cancel),
            ShareOutcome::Failed(e) => Err(e),
        }
    }
}

struct PendingShare {
    id: u64,
    completion: oneshot::Sender<ShareOutcome>,
}

#[derive(Default)]
struct Slot {
    pending: Option<PendingShare>,
    next_id: u64,
}

/// Handle the host uses to report how the chooser returned.
///
/// Cheap to clone; every clone refers to the same slot.
#[derive(Clone)]
pub struct ChooserResultHandler {
    slot: Arc<Mutex<Slot>>,
}

impl ChooserResultHandler {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take(&self) -> Option<PendingShare> {
        self.lock().pending.take()
    }

    /// Resolve the pending share from a host result code.
    ///
    /// Returns `false` when nothing was pending.
    pub fn on_chooser_result(&self, result: impl Into<ChooserResult>) -> bool {
        let result = result.into();
        let Some(pending) = self.take() else {
            debug!("Chooser result {:?} arrived with no pending share", result);
            return false;
        };

        let outcome = match result {
            ChooserResult::Cancelled => {
                info!("Share #{} cancelled by the user", pending.id);
                ShareOutcome::Cancelled
            }
            ChooserResult::Completed(code) => {
                info!("Share #{} completed (result code {})", pending.id, code);
                ShareOutcome::Shared
            }
        };
        resolve(pending, outcome);
        true
    }

    /// Reject the pending share with a bridge error.
    ///
    /// Returns `false` when nothing was pending.
    pub fn abort(&self, error: Error) -> bool {
        let Some(pending) = self.take() else {
            debug!("Abort ({}) with no pending share", error);
            return false;
        };
        warn!("Share #{} aborted: {}", pending.id, error);
        resolve(pending, ShareOutcome::Failed(error));
        true
    }

    fn clear_if(&self, id: u64) {
        let mut slot = self.lock();
        if slot.pending.as_ref().is_some_and(|p| p.id == id) {
            slot.pending = None;
        }
    }

    fn state(&self) -> GateState {
        if self.lock().pending.is_some() {
            GateState::Pending
        } else {
            GateState::Idle
        }
    }
}

fn resolve(pending: PendingShare, outcome: ShareOutcome) {
    if pending.completion.send(outcome).is_err() {
        debug!("Share #{} resolved after its caller went away", pending.id);
    }
}

/// Serializes share requests onto the native chooser.
pub struct ShareGate<L> {
    launcher: L,
    handler: ChooserResultHandler,
}

impl<L: ChooserLauncher> ShareGate<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            handler: ChooserResultHandler {
                slot: Arc::new(Mutex::new(Slot::default())),
            },
        }
    }

    /// Start a share, or fail with [`Error::AlreadySharing`] if one is pending.
    ///
    /// The returned completion resolves once the chooser reports back.
    pub fn request_share(&self, request: &ShareRequest) -> Result<ShareCompletion> {
        let (tx, rx) = oneshot::channel();

        let id = {
            let mut slot = self.handler.lock();
            if let Some(pending) = &slot.pending {
                warn!("Share #{} still pending, rejecting new request", pending.id);
                return Err(Error::AlreadySharing);
            }
            slot.next_id += 1;
            let id = slot.next_id;
            slot.pending = Some(PendingShare { id, completion: tx });
            id
        };

        let intent = SendIntent::from_request(request);
        debug!(
            "Presenting chooser for share #{} (label: {:?}, title: {:?})",
            id, intent.chooser_label, intent.title
        );

        // The slot lock is released here: launchers may report synchronously.
        if let Err(e) = self.launcher.present(intent, self.handler.clone()) {
            warn!("Failed to present chooser for share #{}: {}", id, e);
            self.handler.clear_if(id);
            return Err(e);
        }

        Ok(ShareCompletion { id, receiver: rx })
    }

    /// Host callback for the chooser result. See [`ChooserResultHandler::on_chooser_result`].
    pub fn on_chooser_result(&self, result: impl Into<ChooserResult>) -> bool {
        self.handler.on_chooser_result(result)
    }

    /// A handle the host can keep to report results later.
    pub fn result_handler(&self) -> ChooserResultHandler {
        self.handler.clone()
    }

    pub fn state(&self) -> GateState {
        self.handler.state()
    }

    #[cfg(test)]
    pub(crate) fn launcher(&self) -> &L {
        &self.launcher
    }
}

/// The caller's side of an accepted share.
#[derive(Debug)]
pub struct ShareCompletion {
    id: u64,
    receiver: oneshot::Receiver<ShareOutcome>,
}

impl ShareCompletion {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Wait for the chooser. A gate dropped mid-share counts as a cancel.
    pub async fn wait(self) -> Result<()> {
        match self.receiver.await {
            Ok(outcome) => outcome.into_result(),
            Err(_) => Err(Error::Cancel),
        }
    }

    /// Non-blocking check; `None` while the chooser is still open.
    pub fn try_outcome(&mut self) -> Option<Result<()>> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome.into_result()),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(Error::Cancel)),
        }
    }
}
