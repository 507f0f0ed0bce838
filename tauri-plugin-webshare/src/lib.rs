use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, RunEvent, Runtime,
};
use tracing::debug;

pub use config::Config;
pub use gate::{ChooserLauncher, ChooserResultHandler, GateState, ShareCompletion, ShareGate};
pub use models::*;

#[cfg(desktop)]
mod desktop;
#[cfg(mobile)]
mod mobile;

mod commands;
mod config;
mod error;
mod gate;
mod models;

pub use error::{Error, Result};

#[cfg(desktop)]
use desktop::Webshare;
#[cfg(mobile)]
use mobile::Webshare;

/// Extensions to [`tauri::App`], [`tauri::AppHandle`] and [`tauri::Window`] to access the webshare APIs.
pub trait WebshareExt<R: Runtime> {
    fn webshare(&self) -> &Webshare<R>;
}

impl<R: Runtime, T: Manager<R>> crate::WebshareExt<R> for T {
    fn webshare(&self) -> &Webshare<R> {
        self.state::<Webshare<R>>().inner()
    }
}

/// Initializes the webshare plugin.
///
/// Exposes `navigator.share()` semantics to the webview:
/// - Opens the platform share sheet for a url or text
/// - Only one share sheet at a time (`AlreadySharing` otherwise)
/// - Rejects with `Cancel` when the user dismisses the sheet
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<Config>> {
    Builder::<R, Option<Config>>::new("webshare")
        .invoke_handler(tauri::generate_handler![commands::share])
        .setup(|app, api| {
            #[cfg(mobile)]
            let webshare = mobile::init(app, api)?;
            #[cfg(desktop)]
            let webshare = desktop::init(app, api)?;
            app.manage(webshare);
            Ok(())
        })
        .on_event(|app, event| {
            if let RunEvent::Resumed = event {
                if let Some(webshare) = app.try_state::<Webshare<R>>() {
                    debug!("webshare: app resumed, gate {:?}", webshare.state());
                }
            }
        })
        .build()
}
