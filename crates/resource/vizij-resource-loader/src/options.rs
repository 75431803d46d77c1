use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Per-request loading options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadOptions {
    /// Allow images to be requested with CORS when the URL is cross origin.
    pub allow_cross_origin: bool,
    /// Send credentials (cookies, auth headers) with the request.
    pub with_credentials: bool,
    pub headers: HashMap<String, String>,
    pub override_mime_type: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            allow_cross_origin: true,
            with_credentials: false,
            headers: HashMap::new(),
            override_mime_type: None,
        }
    }
}

impl LoadOptions {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    pub fn allow_cross_origin(mut self, allow: bool) -> Self {
        self.allow_cross_origin = allow;
        self
    }

    pub fn override_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.override_mime_type = Some(mime.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_origin_is_allowed_by_default() {
        let opts: LoadOptions = serde_json::from_str(r#"{ "withCredentials": true }"#).unwrap();
        assert!(opts.allow_cross_origin);
        assert!(opts.with_credentials);
        assert!(opts.headers.is_empty());
    }
}
