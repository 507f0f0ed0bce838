use std::marker::PhantomData;

use tauri::{plugin::PluginApi, AppHandle, Runtime};
use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::gate::{ChooserLauncher, ChooserResultHandler, GateState, ShareGate};
use crate::models::*;

/// Initialize the desktop plugin (share sheets are mobile-only).
pub fn init<R: Runtime>(
    _app: &AppHandle<R>,
    api: PluginApi<R, Option<Config>>,
) -> crate::Result<Webshare<R>> {
    Ok(Webshare {
        gate: ShareGate::new(DesktopChooser),
        config: api.config().clone().unwrap_or_default(),
        _runtime: PhantomData,
    })
}

/// Desktop has no share targets, so nothing is ever dispatched.
pub struct DesktopChooser;

impl ChooserLauncher for DesktopChooser {
    fn present(&self, _intent: SendIntent, _handler: ChooserResultHandler) -> crate::Result<()> {
        Err(Error::Unsupported)
    }
}

/// Access to the webshare APIs (desktop stub).
///
/// The plugin still loads on desktop so a shared frontend can call it and get
/// an `Unsupported` rejection instead of a missing command.
pub struct Webshare<R: Runtime> {
    gate: ShareGate<DesktopChooser>,
    config: Config,
    _runtime: PhantomData<fn() -> R>,
}

impl<R: Runtime> Webshare<R> {
    /// Always rejected with `Unsupported` on desktop.
    ///
    /// `request` is sent as is: callers outside the `share` command should run
    /// [`ShareRequest::validate`] first.
    pub async fn share(&self, request: ShareRequest) -> crate::Result<()> {
        let completion = self.gate.request_share(&request)?;
        let id = completion.id();
        let result = completion.wait().await;
        debug!("Share #{} finished: {:?}", id, result);
        result
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> GateState {
        self.gate.state()
    }
}
