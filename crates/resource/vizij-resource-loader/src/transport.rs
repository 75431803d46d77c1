//! The I/O boundary: everything that actually touches the network or disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use hashbrown::HashMap;
use vizij_entity_core::ImageHandle;

use crate::error::LoadError;
use crate::origin::Origin;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResponseType {
    ArrayBuffer,
    Text,
}

/// A single request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XhrRequest {
    pub url: String,
    pub response_type: ResponseType,
    pub headers: HashMap<String, String>,
    pub override_mime_type: Option<String>,
    pub with_credentials: bool,
}

/// CORS mode of an image request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrossOrigin {
    /// CORS without credentials.
    Anonymous,
    UseCredentials,
}

impl CrossOrigin {
    /// Value of the HTML `crossorigin` attribute.
    pub fn as_attribute(&self) -> &'static str {
        match self {
            CrossOrigin::Anonymous => "",
            CrossOrigin::UseCredentials => "use-credentials",
        }
    }
}

/// A decoded-or-fetched image ready for a renderer.
#[derive(Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub url: String,
    pub cross_origin: Option<CrossOrigin>,
    pub bytes: Arc<[u8]>,
}

impl LoadedImage {
    /// Key under which entities reference this image.
    pub fn handle(&self) -> ImageHandle {
        ImageHandle::new(&self.url)
    }
}

impl fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedImage")
            .field("url", &self.url)
            .field("cross_origin", &self.cross_origin)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Performs requests. Implementations decide what a URL means (HTTP, files,
/// an in-memory table in tests).
pub trait Transport: Send + Sync {
    fn fetch(&self, request: XhrRequest) -> BoxFuture<'_, Result<Vec<u8>, LoadError>>;

    fn create_image(
        &self,
        url: String,
        cross_origin: Option<CrossOrigin>,
    ) -> BoxFuture<'_, Result<LoadedImage, LoadError>>;

    /// Origin of the page issuing requests, used to decide whether a URL is
    /// cross origin. `None` outside a page context.
    fn page_origin(&self) -> Option<Origin> {
        None
    }
}

/// Serves relative URLs and `file://` URLs from a directory.
#[derive(Clone, Debug)]
pub struct FsTransport {
    root: PathBuf,
}

impl FsTransport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, url: &str) -> Result<PathBuf, LoadError> {
        let rel = url.strip_prefix("file://").unwrap_or(url);
        if rel.contains("://") {
            return Err(LoadError::Request {
                url: url.to_string(),
                message: "only relative and file:// urls are served from disk".into(),
            });
        }
        let rel = rel.split(['?', '#']).next().unwrap_or(rel);
        let path = Path::new(rel);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.root.join(path))
        }
    }

    async fn read(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.path_for(url)?;
        log::trace!("reading '{url}' from {}", path.display());
        tokio::fs::read(&path).await.map_err(|e| LoadError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl Transport for FsTransport {
    fn fetch(&self, request: XhrRequest) -> BoxFuture<'_, Result<Vec<u8>, LoadError>> {
        async move { self.read(&request.url).await }.boxed()
    }

    fn create_image(
        &self,
        url: String,
        cross_origin: Option<CrossOrigin>,
    ) -> BoxFuture<'_, Result<LoadedImage, LoadError>> {
        async move {
            let bytes = self.read(&url).await?;
            if bytes.is_empty() {
                return Err(LoadError::Image {
                    url,
                    message: "image file is empty".into(),
                });
            }
            Ok(LoadedImage {
                url,
                cross_origin,
                bytes: bytes.into(),
            })
        }
        .boxed()
    }
}
