//! Mobile implementation bridging to native Android/iOS code.
//!
//! - **Android**: Kotlin plugin wrapping `Intent.createChooser` in an activity-for-result
//! - **iOS**: Swift plugin presenting `UIActivityViewController`
//!
//! The native `presentChooser` call only resolves once the chooser closes, so it
//! runs on a blocking task and reports back through the gate's result handler.

use tauri::{
    plugin::{PluginApi, PluginHandle},
    AppHandle, Runtime,
};
use tracing::debug;

use crate::config::Config;
use crate::gate::{ChooserLauncher, ChooserResultHandler, GateState, ShareGate};
use crate::models::*;

#[cfg(target_os = "ios")]
tauri::ios_plugin_binding!(init_plugin_webshare);

/// Initialize the mobile plugin by registering with the native layer.
pub fn init<R: Runtime>(
    _app: &AppHandle<R>,
    api: PluginApi<R, Option<Config>>,
) -> crate::Result<Webshare<R>> {
    let config = api.config().clone().unwrap_or_default();
    #[cfg(target_os = "android")]
    let handle = api.register_android_plugin("app.tauri.webshare", "WebsharePlugin")?;
    #[cfg(target_os = "ios")]
    let handle = api.register_ios_plugin(init_plugin_webshare)?;
    Ok(Webshare {
        gate: ShareGate::new(NativeChooser(handle)),
        config,
    })
}

/// Launches the platform chooser through the native plugin.
pub struct NativeChooser<R: Runtime>(PluginHandle<R>);

impl<R: Runtime> ChooserLauncher for NativeChooser<R> {
    fn present(&self, intent: SendIntent, handler: ChooserResultHandler) -> crate::Result<()> {
        let handle = self.0.clone();
        tauri::async_runtime::spawn_blocking(move || {
            match handle.run_mobile_plugin::<ChooserResponse>("presentChooser", intent) {
                Ok(response) => {
                    debug!("Native chooser returned {}", response.result_code);
                    handler.on_chooser_result(response.result_code);
                }
                Err(e) => {
                    handler.abort(e.into());
                }
            }
        });
        Ok(())
    }
}

/// Access to the webshare mobile APIs.
pub struct Webshare<R: Runtime> {
    gate: ShareGate<NativeChooser<R>>,
    config: Config,
}

impl<R: Runtime> Webshare<R> {
    /// Open the share sheet and wait for the user to pick a target or cancel.
    ///
    /// Fails immediately with `AlreadySharing` if a share sheet is already open.
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
