//! Error types for the webshare plugin.

/// Result type alias for plugin operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a share request can be rejected with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A share sheet is already open for an earlier request.
    #[error("Cannot share twice at the same time!")]
    AlreadySharing,

    /// The user dismissed the share sheet without picking a target.
    #[error("Operation canceled by the user.")]
    Cancel,

    /// The request data is malformed (no content, bad URL, files, ...).
    #[error("Invalid share data: {0}")]
    InvalidData(String),

    /// Sharing is not allowed from the calling window right now.
    #[error("Not allowed: {0}")]
    NotAllowed(String),

    /// No share targets exist on this platform.
    #[error("Sharing is not supported on this platform")]
    Unsupported,

    /// Mobile plugin invocation error.
    #[cfg(mobile)]
    #[error("Plugin invoke error: {0}")]
    PluginInvoke(String),
}

impl Error {
    /// Stable code handed to the frontend for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Error::AlreadySharing => "AlreadySharing",
            Error::Cancel => "Cancel",
            Error::InvalidData(_) => "InvalidData",
            Error::NotAllowed(_) => "NotAllowed",
            Error::Unsupported => "Unsupported",
            #[cfg(mobile)]
            Error::PluginInvoke(_) => "PluginInvoke",
        }
    }
}

#[cfg(mobile)]
impl From<tauri::plugin::mobile::PluginInvokeError> for Error {
    fn from(err: tauri::plugin::mobile::PluginInvokeError) -> Self {
        Error::PluginInvoke(err.to_string())
    }
}

// ============================================================================
// Serialization for Tauri IPC
// ============================================================================

impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Error", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(Error::AlreadySharing.code(), "AlreadySharing");
        assert_eq!(Error::Cancel.code(), "Cancel");
        assert_eq!(Error::InvalidData("x".into()).code(), "InvalidData");
        assert_eq!(Error::NotAllowed("x".into()).code(), "NotAllowed");
        assert_eq!(Error::Unsupported.code(), "Unsupported");
    }

    #[test]
    fn test_error_serialization() {
        let json = serde_json::to_value(Error::Cancel).unwrap();
        assert_eq!(json["code"], "Cancel");
        assert_eq!(json["message"], "Operation canceled by the user.");

        let json = serde_json::to_value(Error::InvalidData("Missing content to share!".into()))
            .unwrap();
        assert_eq!(json["code"], "InvalidData");
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("Missing content to share!"));
    }
}
