//! Vizij Resource Loader
//!
//! Asynchronous loading of images and binary buffers for visualizers. All I/O
//! goes through a [`Transport`], so hosts choose how URLs are served and tests
//! can substitute an in-memory table. Loaded images are referenced from entities
//! by their [`ImageHandle`](vizij_entity_core::ImageHandle).

pub mod error;
pub mod load;
pub mod options;
pub mod origin;
pub mod transport;

pub use error::LoadError;
pub use load::{cross_origin_mode, load_array_buffer, load_image, UrlSource};
pub use options::LoadOptions;
pub use origin::{is_cross_origin, is_data_uri, Origin};
pub use transport::{CrossOrigin, FsTransport, LoadedImage, ResponseType, Transport, XhrRequest};
