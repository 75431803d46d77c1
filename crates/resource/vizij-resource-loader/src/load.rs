//! Loading entry points.

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::LoadError;
use crate::options::LoadOptions;
use crate::origin::{is_cross_origin, is_data_uri};
use crate::transport::{CrossOrigin, LoadedImage, ResponseType, Transport, XhrRequest};

/// A URL that is either known now or produced later.
pub enum UrlSource {
    Ready(String),
    Deferred(BoxFuture<'static, Result<String, LoadError>>),
}

impl UrlSource {
    pub fn deferred(
        future: impl std::future::Future<Output = Result<String, LoadError>> + Send + 'static,
    ) -> Self {
        UrlSource::Deferred(future.boxed())
    }

    pub async fn resolve(self) -> Result<String, LoadError> {
        match self {
            UrlSource::Ready(url) => Ok(url),
            UrlSource::Deferred(future) => future.await,
        }
    }
}

impl std::fmt::Debug for UrlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlSource::Ready(url) => f.debug_tuple("Ready").field(url).finish(),
            UrlSource::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<&str> for UrlSource {
    fn from(url: &str) -> Self {
        UrlSource::Ready(url.to_string())
    }
}

impl From<String> for UrlSource {
    fn from(url: String) -> Self {
        UrlSource::Ready(url)
    }
}

fn require_url(url: String) -> Result<String, LoadError> {
    if url.trim().is_empty() {
        return Err(LoadError::InvalidArgument("url is required".into()));
    }
    Ok(url)
}

/// CORS mode for an image request.
///
/// Data URIs never use CORS. When cross origin is allowed without credentials,
/// CORS is only used for URLs that really are cross origin.
pub fn cross_origin_mode(
    transport: &dyn Transport,
    url: &str,
    options: &LoadOptions,
) -> Option<CrossOrigin> {
    let mut allow = options.allow_cross_origin;
    if !is_data_uri(url) && allow && !options.with_credentials {
        allow = is_cross_origin(transport.page_origin().as_ref(), url);
    }
    match (allow, options.with_credentials) {
        (false, _) => None,
        (true, true) => Some(CrossOrigin::UseCredentials),
        (true, false) => Some(CrossOrigin::Anonymous),
    }
}

/// Load raw bytes, forwarding headers, MIME override and credentials.
pub async fn load_array_buffer(
    transport: &dyn Transport,
    url: impl Into<UrlSource>,
    options: &LoadOptions,
) -> Result<Vec<u8>, LoadError> {
    let url = require_url(url.into().resolve().await?)?;
    let request = XhrRequest {
        url,
        response_type: ResponseType::ArrayBuffer,
        headers: options.headers.clone(),
        override_mime_type: options.override_mime_type.clone(),
        with_credentials: options.with_credentials,
    };
    log::debug!("loading array buffer '{}'", request.url);
    transport.fetch(request).await
}

/// Load an image, choosing the CORS mode from `options` and the URL.
pub async fn load_image(
    transport: &dyn Transport,
    url: impl Into<UrlSource>,
    options: &LoadOptions,
) -> Result<LoadedImage, LoadError> {
    let url = require_url(url.into().resolve().await?)?;
    let cross_origin = cross_origin_mode(transport, &url, options);
    log::debug!(
        "loading image '{}' (crossorigin={:?})",
        if is_data_uri(&url) { "data:..." } else { url.as_str() },
        cross_origin.map(|c| c.as_attribute())
    );
    transport.create_image(url, cross_origin).await
}
