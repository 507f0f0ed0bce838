use tauri::{command, AppHandle, Runtime, Url, Webview};
use tracing::warn;

use crate::config::Config;
use crate::models::*;
use crate::Error;
use crate::Result;
use crate::WebshareExt;

/// Whether the runtime reports real window focus.
///
/// tao answers `is_focused` with a constant `false` on Android and iOS, so on
/// mobile the focus state is unknown.
const RUNTIME_REPORTS_FOCUS: bool = cfg!(desktop);

/// Share `request` through the native share sheet.
///
/// Resolves once the user picked a target, rejects with `Cancel` when the
/// sheet was dismissed and with `AlreadySharing` when another share is open.
#[command]
pub(crate) async fn share<R: Runtime>(
    app: AppHandle<R>,
    webview: Webview<R>,
    request: ShareRequest,
) -> Result<()> {
    let webshare = app.webshare();

    let focused = known_focus(RUNTIME_REPORTS_FOCUS, webview.window().is_focused().ok());
    let base = webview.url().ok();
    let request = prepare_share(request, webshare.config(), focused, base.as_ref())
        .inspect_err(|e| warn!("Share from {} rejected: {}", webview.label(), e))?;

    webshare.share(request).await
}

/// Focus as far as it can be trusted; `None` when unknown.
fn known_focus(runtime_reports_focus: bool, reported: Option<bool>) -> Option<bool> {
    if runtime_reports_focus {
        reported
    } else {
        None
    }
}

/// Focus check, then validation. Only a request that passes both reaches the gate.
///
/// An unknown focus state does not block sharing.
fn prepare_share(
    request: ShareRequest,
    config: &Config,
    focused: Option<bool>,
    base: Option<&Url>,
) -> Result<ShareRequest> {
    if config.require_focus && focused == Some(false) {
        return Err(Error::NotAllowed(
            "You are not allowed to share while the document is unfocused.".into(),
        ));
    }
    request.validate(config, base)
}
