//! Background image loading.
//!
//! Loading is the stage's only suspending operation. It is split in two so
//! that a caller can start a load, keep editing, and apply the result later:
//! [`Stage::request_background`] hands out a [`LoadTicket`], and
//! [`Stage::apply_background`] accepts the load result for that ticket only
//! if no newer request was made in between and the stage is still alive.

use std::future::Future;
use std::path::Path;

use crate::error::BoxerError;
use crate::geometry::ImageBounds;

use super::Stage;

/// Natural size of a decoded image, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The image currently displayed behind the boxes.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundImage {
    url: String,
    size: ImageSize,
}

impl BackgroundImage {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Containment bounds for boxes drawn over this image.
    pub fn bounds(&self) -> ImageBounds {
        ImageBounds::from((self.size.width, self.size.height))
    }
}

/// Proof of a background request, redeemed by [`Stage::apply_background`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    url: String,
}

impl LoadTicket {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Resolves an image URL to its natural size.
pub trait ImageLoader {
    fn load(&self, url: &str) -> impl Future<Output = Result<ImageSize, BoxerError>>;
}

/// Loads images from the local filesystem.
///
/// Accepts plain paths and `file://` URLs. Only the image header is
/// inspected; pixels are never decoded.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    async fn load(&self, url: &str) -> Result<ImageSize, BoxerError> {
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| BoxerError::ImageLoad {
                url: url.to_string(),
                message: source.to_string(),
            })?;
        image_size_from_bytes(url, &bytes)
    }
}

/// Reads the natural size from an encoded image header.
pub fn image_size_from_bytes(url: &str, bytes: &[u8]) -> Result<ImageSize, BoxerError> {
    let size = imagesize::blob_size(bytes).map_err(|source| BoxerError::ImageLoad {
        url: url.to_string(),
        message: source.to_string(),
    })?;

    let width: u32 = size.width.try_into().map_err(|_| BoxerError::ImageLoad {
        url: url.to_string(),
        message: format!("image width {} does not fit in u32", size.width),
    })?;
    let height: u32 = size.height.try_into().map_err(|_| BoxerError::ImageLoad {
        url: url.to_string(),
        message: format!("image height {} does not fit in u32", size.height),
    })?;

    if width == 0 || height == 0 {
        return Err(BoxerError::ImageLoad {
            url: url.to_string(),
            message: format!("image has empty dimensions {}x{}", width, height),
        });
    }

    Ok(ImageSize::new(width, height))
}

impl Stage {
    /// Registers `url` as the wanted background and returns its ticket.
    ///
    /// Any ticket handed out earlier becomes stale.
    pub fn request_background(&mut self, url: impl Into<String>) -> LoadTicket {
        self.load_generation += 1;
        let url = url.into();
        self.requested_url = Some(url.clone());
        log::debug!("requesting background {} (#{})", url, self.load_generation);
        LoadTicket {
            generation: self.load_generation,
            url,
        }
    }

    /// Applies the outcome of a background load.
    ///
    /// Returns `Ok(None)` when the result was discarded because the stage was
    /// disposed or a newer request superseded `ticket`. A failed load for the
    /// current request is returned as `Err` and leaves every box untouched.
    ///
    /// On success the viewport resets to the origin at zoom 1, the background
    /// is replaced, and all existing boxes are disposed.
    pub fn apply_background(
        &mut self,
        ticket: LoadTicket,
        result: Result<ImageSize, BoxerError>,
    ) -> Result<Option<BackgroundImage>, BoxerError> {
        if self.disposed {
            log::debug!("stage disposed; dropping background load for {}", ticket.url);
            return Ok(None);
        }
        if ticket.generation != self.load_generation {
            log::warn!(
                "discarding stale background load for {} (superseded by {:?})",
                ticket.url,
                self.requested_url
            );
            return Ok(None);
        }

        let size = result?;
        let background = BackgroundImage {
            url: ticket.url,
            size,
        };

        self.viewport.reset();
        self.clear_boxes();
        self.background = Some(background.clone());
        log::debug!(
            "background {} loaded at {}x{}",
            background.url,
            size.width,
            size.height
        );
        self.emit_change();

        Ok(Some(background))
    }

    /// Requests `url`, loads it with `loader`, and applies the result.
    pub async fn set_background_image<L: ImageLoader>(
        &mut self,
        loader: &L,
        url: impl Into<String>,
    ) -> Result<Option<BackgroundImage>, BoxerError> {
        let ticket = self.request_background(url);
        let result = loader.load(ticket.url()).await;
        self.apply_background(ticket, result)
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    /// The URL of the most recent background request, loaded or not.
    pub fn requested_url(&self) -> Option<&str> {
        self.requested_url.as_deref()
    }
}
