use serde::{Deserialize, Serialize};
use tauri::Url;

use crate::config::Config;
use crate::error::{Error, Result};

/// Android `Intent.ACTION_SEND`.
pub const ACTION_SEND: &str = "android.intent.action.SEND";

/// Mime type of every shared payload.
pub const MIME_TEXT_PLAIN: &str = "text/plain";

/// Host result code for a dismissed chooser (Android `Activity.RESULT_CANCELED`).
pub const RESULT_CANCELED: i32 = 0;

/// Host result code for a completed chooser (Android `Activity.RESULT_OK`).
pub const RESULT_OK: i32 = -1;

/// Data passed to `navigator.share()`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub url: Option<String>,
    pub text: Option<String>,
    pub title: Option<String>,
    /// Accepted on the wire only so it can be rejected explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<serde_json::Value>>,
}

impl ShareRequest {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Check the request the way a browser's `navigator.share()` does before
    /// anything reaches native code.
    ///
    /// Empty strings count as absent. A relative `url` is resolved against
    /// `base` (the calling document's location) and replaced by its
    /// serialized form.
    pub fn validate(self, config: &Config, base: Option<&Url>) -> Result<ShareRequest> {
        let url = non_empty(self.url);
        let text = non_empty(self.text);
        let title = non_empty(self.title);

        if let Some(files) = &self.files {
            if files.is_empty() {
                return Err(Error::InvalidData(
                    "The 'files' array has to have at least 1 item!".into(),
                ));
            }
            return Err(Error::InvalidData(
                "Sharing of files is currently unsupported!".into(),
            ));
        }

        // A title alone has nothing to send
        if config.require_content && url.is_none() && text.is_none() {
            return Err(Error::InvalidData("Missing content to share!".into()));
        }

        let url = match url {
            Some(raw) => Some(parse_url(&raw, config, base)?),
            None => None,
        };

        Ok(ShareRequest {
            url,
            text,
            title,
            files: None,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_url(raw: &str, config: &Config, base: Option<&Url>) -> Result<String> {
    let parsed = Url::options()
        .base_url(base)
        .parse(raw)
        .map_err(|e| Error::InvalidData(format!("Could not parse URL! {}", e)))?;

    if !config.allows_scheme(parsed.scheme()) {
        return Err(Error::InvalidData(format!(
            "Invalid protocol! Can only share URLs with {} protocol.",
            config
                .url_schemes
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(" or ")
        )));
    }

    Ok(parsed.to_string())
}

/// The native send action handed to the platform chooser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendIntent {
    pub action: String,
    pub mime_type: String,
    /// `url` when present, otherwise `text`, otherwise empty.
    pub text: String,
    pub title: Option<String>,
    /// Label shown by the chooser.
    pub chooser_label: String,
}

impl SendIntent {
    pub fn from_request(request: &ShareRequest) -> Self {
        let content = request
            .url
            .as_ref()
            .or(request.text.as_ref())
            .cloned()
            .unwrap_or_default();

        Self {
            action: ACTION_SEND.to_string(),
            mime_type: MIME_TEXT_PLAIN.to_string(),
            text: content.clone(),
            title: request.title.clone(),
            chooser_label: content,
        }
    }
}

/// How the chooser returned control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserResult {
    /// The user backed out without picking a target.
    Cancelled,
    /// Anything else; carries the raw host code.
    Completed(i32),
}

impl ChooserResult {
    pub fn from_code(code: i32) -> Self {
        if code == RESULT_CANCELED {
            ChooserResult::Cancelled
        } else {
            ChooserResult::Completed(code)
        }
    }
}

impl From<i32> for ChooserResult {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

/// Response from the native `presentChooser` command.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChooserResponse {
    pub result_code: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://app.test/page/index.html").unwrap()
    }

    #[test]
    fn test_intent_prefers_url_over_text() {
        let request = ShareRequest {
            url: Some("https://a.test".into()),
            text: Some("hello".into()),
            title: None,
            files: None,
        };
        let intent = SendIntent::from_request(&request);
        assert_eq!(intent.text, "https://a.test");
        assert_eq!(intent.chooser_label, "https://a.test");
        assert_eq!(intent.action, ACTION_SEND);
        assert_eq!(intent.mime_type, MIME_TEXT_PLAIN);
    }

    #[test]
    fn test_intent_uses_text_and_title() {
        let intent = SendIntent::from_request(&ShareRequest::text("hello").with_title("Hi"));
        assert_eq!(intent.text, "hello");
        assert_eq!(intent.title.as_deref(), Some("Hi"));
        assert_eq!(intent.chooser_label, "hello");
    }

    #[test]
    fn test_intent_without_content_sends_empty_text() {
        let intent = SendIntent::from_request(&ShareRequest::default());
        assert_eq!(intent.text, "");
        assert_eq!(intent.chooser_label, "");
        assert!(intent.title.is_none());
    }

    #[test]
    fn test_intent_wire_format() {
        let json = serde_json::to_value(SendIntent::from_request(&ShareRequest::text("x"))).unwrap();
        assert_eq!(json["mimeType"], "text/plain");
        assert_eq!(json["chooserLabel"], "x");
    }

    #[test]
    fn test_chooser_result_codes() {
        assert_eq!(ChooserResult::from_code(RESULT_CANCELED), ChooserResult::Cancelled);
        assert_eq!(ChooserResult::from(RESULT_OK), ChooserResult::Completed(RESULT_OK));
        assert_eq!(ChooserResult::from(42), ChooserResult::Completed(42));
    }

    #[test]
    fn test_chooser_response_deserialize() {
        let resp: ChooserResponse = serde_json::from_str(r#"{"resultCode":-1}"#).unwrap();
        assert_eq!(resp.result_code, RESULT_OK);
    }

    #[test]
    fn test_validate_rejects_title_only() {
        let request = ShareRequest::default().with_title("Hi");
        let err = request.validate(&Config::default(), None).unwrap_err();
        assert!(matches!(err, Error::InvalidData(ref m) if m.contains("Missing content")));
    }

    #[test]
    fn test_validate_treats_empty_strings_as_absent() {
        let request = ShareRequest {
            url: Some(String::new()),
            text: Some("hello".into()),
            title: Some(String::new()),
            files: None,
        };
        let validated = request.validate(&Config::default(), None).unwrap();
        assert_eq!(validated.url, None);
        assert_eq!(validated.title, None);
        assert_eq!(validated.text.as_deref(), Some("hello"));
    }

    #[test]
    fn test_validate_allows_empty_request_when_content_not_required() {
        let config = Config {
            require_content: false,
            ..Config::default()
        };
        assert!(ShareRequest::default().validate(&config, None).is_ok());
    }

    #[test]
    fn test_validate_rejects_files() {
        let request = ShareRequest {
            text: Some("hello".into()),
            files: Some(vec![]),
            ..Default::default()
        };
        let err = request.validate(&Config::default(), None).unwrap_err();
        assert!(matches!(err, Error::InvalidData(ref m) if m.contains("at least 1 item")));

        let request = ShareRequest {
            text: Some("hello".into()),
            files: Some(vec![serde_json::json!({ "name": "a.png" })]),
            ..Default::default()
        };
        let err = request.validate(&Config::default(), None).unwrap_err();
        assert!(matches!(err, Error::InvalidData(ref m) if m.contains("unsupported")));
    }

    #[test]
    fn test_validate_normalizes_url() {
        let validated = ShareRequest::url("https://a.test")
            .validate(&Config::default(), None)
            .unwrap();
        assert_eq!(validated.url.as_deref(), Some("https://a.test/"));
    }

    #[test]
    fn test_validate_resolves_relative_url() {
        let base = base();
        let validated = ShareRequest::url("../about")
            .validate(&Config::default(), Some(&base))
            .unwrap();
        assert_eq!(validated.url.as_deref(), Some("https://app.test/about"));
    }

    #[test]
    fn test_validate_rejects_unparseable_url() {
        let err = ShareRequest::url("not a url")
            .validate(&Config::default(), None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(ref m) if m.contains("Could not parse URL")));
    }

    #[test]
    fn test_validate_rejects_disallowed_scheme() {
        let err = ShareRequest::url("file:///etc/hosts")
            .validate(&Config::default(), None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(ref m) if m.contains("Invalid protocol")));
    }

    #[test]
    fn test_request_deserialize_from_ipc() {
        let request: ShareRequest =
            serde_json::from_str(r#"{"url":"https://a.test","title":"Hi"}"#).unwrap();
        assert_eq!(request.url.as_deref(), Some("https://a.test"));
        assert_eq!(request.title.as_deref(), Some("Hi"));
        assert!(request.text.is_none());
        assert!(request.files.is_none());
    }
}
