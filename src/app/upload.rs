use std::path::Path;
use std::time::Duration;

use image::{DynamicImage, ImageFormat};
use reqwest::blocking::{Client, multipart};
use serde::Deserialize;

use crate::config::CloudinaryConfig;
use crate::error::{UploadError, WatchlistError, truncate_body};

/// Turns a local image into a publicly reachable URL.
pub trait ImageUploader: Send + Sync {
    fn upload(&self, image: &ImageFile) -> Result<String, UploadError>;
}

/// An image picked from disk, already sniffed as a known format.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn read(path: &Path) -> Result<Self, WatchlistError> {
        let bytes = std::fs::read(path).map_err(|e| {
            WatchlistError::Validation(format!("Cannot read {}: {e}", path.display()))
        })?;
        let format = image::guess_format(&bytes).map_err(|_| {
            WatchlistError::Validation(format!("{} is not a supported image", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "poster".to_string());
        Ok(Self { file_name, format, bytes })
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn decode(&self) -> image::ImageResult<DynamicImage> {
        image::load_from_memory_with_format(&self.bytes, self.format)
    }
}

#[derive(Debug, Deserialize)]
struct CloudinaryResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

impl CloudinaryResponse {
    fn into_url(self) -> Result<String, UploadError> {
        self.secure_url.or(self.url).filter(|u| !u.is_empty()).ok_or(UploadError::MissingUrl)
    }
}

/// Unsigned uploads to Cloudinary. Without configuration every upload fails with `NotConfigured`.
pub struct CloudinaryUploader {
    client: Client,
    config: Option<CloudinaryConfig>,
}

impl CloudinaryUploader {
    pub fn new(config: Option<CloudinaryConfig>, timeout: Duration) -> Result<Self, UploadError> {
        if config.is_none() {
            tracing::warn!("image upload disabled - no Cloudinary configuration provided");
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(config: &CloudinaryConfig) -> String {
        format!("https://api.cloudinary.com/v1_1/{}/image/upload", config.cloud_name)
    }
}

impl ImageUploader for CloudinaryUploader {
    fn upload(&self, image: &ImageFile) -> Result<String, UploadError> {
        let config = self.config.as_ref().ok_or(UploadError::NotConfigured)?;

        let part = file_part(image, image.mime_type())?;
        let form = multipart::Form::new()
            .text("upload_preset", config.upload_preset.clone())
            .part("file", part);

        tracing::debug!(file = %image.file_name, size = image.bytes.len(), "uploading poster");
        let response = self.client.post(Self::endpoint(config)).multipart(form).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(UploadError::Status { status, body: truncate_body(body) });
        }

        let url = response.json::<CloudinaryResponse>()?.into_url()?;
        tracing::info!(%url, "poster uploaded");
        Ok(url)
    }
}

fn file_part(image: &ImageFile, mime: &str) -> Result<multipart::Part, UploadError> {
    multipart::Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(mime)
        .map_err(|source| UploadError::InvalidMime { mime: mime.to_string(), source })
}
