use std::sync::Mutex;

use futures::future::BoxFuture;
use futures::FutureExt;
use hashbrown::HashMap;
use vizij_resource_loader::{
    load_array_buffer, load_image, CrossOrigin, FsTransport, LoadError, LoadOptions,
    LoadedImage, Origin, ResponseType, Transport, UrlSource, XhrRequest,
};

#[derive(Default)]
struct MockTransport {
    page: Option<Origin>,
    files: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<XhrRequest>>,
    images: Mutex<Vec<(String, Option<CrossOrigin>)>>,
}

impl MockTransport {
    fn on_page(page: &str) -> Self {
        Self {
            page: Origin::parse(page),
            ..Self::default()
        }
    }

    fn with_file(mut self, url: &str, bytes: &[u8]) -> Self {
        self.files.insert(url.to_string(), bytes.to_vec());
        self
    }

    fn last_image_mode(&self) -> Option<CrossOrigin> {
        self.images.lock().unwrap().last().and_then(|(_, mode)| *mode)
    }

    fn lookup(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        self.files.get(url).cloned().ok_or_else(|| LoadError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

impl Transport for MockTransport {
    fn fetch(&self, request: XhrRequest) -> BoxFuture<'_, Result<Vec<u8>, LoadError>> {
        let result = self.lookup(&request.url);
        self.requests.lock().unwrap().push(request);
        async move { result }.boxed()
    }

    fn create_image(
        &self,
        url: String,
        cross_origin: Option<CrossOrigin>,
    ) -> BoxFuture<'_, Result<LoadedImage, LoadError>> {
        self.images
            .lock()
            .unwrap()
            .push((url.clone(), cross_origin));
        let result = self.lookup(&url).map(|bytes| LoadedImage {
            url,
            cross_origin,
            bytes: bytes.into(),
        });
        async move { result }.boxed()
    }

    fn page_origin(&self) -> Option<Origin> {
        self.page.clone()
    }
}

#[tokio::test]
async fn array_buffer_request_forwards_options() {
    let transport = MockTransport::default().with_file("data/tiles.bin", &[1, 2, 3]);
    let options = LoadOptions::default()
        .with_header("Accept", "application/octet-stream")
        .override_mime_type("application/octet-stream")
        .with_credentials(true);

    let bytes = load_array_buffer(&transport, "data/tiles.bin", &options)
        .await
        .unwrap();
    assert_eq!(bytes, vec![1, 2, 3]);

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.response_type, ResponseType::ArrayBuffer);
    assert_eq!(
        req.headers.get("Accept").map(String::as_str),
        Some("application/octet-stream")
    );
    assert_eq!(req.override_mime_type.as_deref(), Some("application/octet-stream"));
    assert!(req.with_credentials);
}

#[tokio::test]
async fn missing_resource_fails_with_load_error() {
    let transport = MockTransport::default();
    let err = load_array_buffer(&transport, "nope.bin", &LoadOptions::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LoadError::Status {
            url: "nope.bin".into(),
            status: 404
        }
    );
}

#[tokio::test]
async fn empty_url_is_invalid() {
    let transport = MockTransport::default();
    let err = load_image(&transport, "", &LoadOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::InvalidArgument(_)));
    assert!(transport.images.lock().unwrap().is_empty());
}

#[tokio::test]
async fn same_origin_images_skip_cors() {
    let transport =
        MockTransport::on_page("https://app.example.com/").with_file("icons/a.png", b"png");
    let image = load_image(&transport, "icons/a.png", &LoadOptions::default())
        .await
        .unwrap();
    assert_eq!(image.cross_origin, None);
    assert_eq!(image.handle().as_str(), "icons/a.png");
}

#[tokio::test]
async fn cross_origin_images_use_anonymous_cors() {
    let url = "https://cdn.example.com/a.png";
    let transport = MockTransport::on_page("https://app.example.com/").with_file(url, b"png");
    load_image(&transport, url, &LoadOptions::default())
        .await
        .unwrap();
    assert_eq!(transport.last_image_mode(), Some(CrossOrigin::Anonymous));
}

#[tokio::test]
async fn credentials_always_request_credentialed_cors() {
    let transport =
        MockTransport::on_page("https://app.example.com/").with_file("icons/a.png", b"png");
    let options = LoadOptions::default().with_credentials(true);
    load_image(&transport, "icons/a.png", &options).await.unwrap();
    assert_eq!(transport.last_image_mode(), Some(CrossOrigin::UseCredentials));
    assert_eq!(CrossOrigin::UseCredentials.as_attribute(), "use-credentials");
}

#[tokio::test]
async fn disallowed_cross_origin_never_sets_a_mode() {
    let url = "https://cdn.example.com/a.png";
    let transport = MockTransport::on_page("https://app.example.com/").with_file(url, b"png");
    let options = LoadOptions::default().allow_cross_origin(false);
    load_image(&transport, url, &options).await.unwrap();
    assert_eq!(transport.last_image_mode(), None);
}

#[tokio::test]
async fn data_uris_keep_the_requested_mode() {
    let url = "data:image/png;base64,iVBORw0KGgo=";
    let transport = MockTransport::on_page("https://app.example.com/").with_file(url, b"png");
    load_image(&transport, url, &LoadOptions::default())
        .await
        .unwrap();
    // No origin check happens for data URIs, so the allowed mode stands.
    assert_eq!(transport.last_image_mode(), Some(CrossOrigin::Anonymous));
}

#[tokio::test]
async fn deferred_urls_resolve_before_loading() {
    let transport = MockTransport::default().with_file("late.png", b"png");
    let url = UrlSource::deferred(async { Ok("late.png".to_string()) });
    let image = load_image(&transport, url, &LoadOptions::default())
        .await
        .unwrap();
    assert_eq!(image.url, "late.png");

    let failing = UrlSource::deferred(async { Err(LoadError::Unresolved("catalog offline".into())) });
    let err = load_image(&transport, failing, &LoadOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Unresolved(_)));
}

#[tokio::test]
async fn fs_transport_reads_relative_and_file_urls() {
    let dir = std::env::temp_dir().join(format!("vizij-loader-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("marker.png"), b"\x89PNG").await.unwrap();

    let transport = FsTransport::new(&dir);
    let image = load_image(&transport, "marker.png", &LoadOptions::default())
        .await
        .unwrap();
    assert_eq!(&image.bytes[..], b"\x89PNG");

    let absolute = format!("file://{}", dir.join("marker.png").display());
    let bytes = load_array_buffer(&transport, absolute, &LoadOptions::default())
        .await
        .unwrap();
    assert_eq!(bytes.len(), 4);

    let err = load_array_buffer(&transport, "missing.bin", &LoadOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Request { .. }));

    tokio::fs::remove_dir_all(&dir).await.ok();
}
