// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigDocument;
use async_std::sync::Arc;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sku_studio_shared::messages::analysis::ProductAnalysis;
use sku_studio_shared::messages::session::ImageFormat;
use std::error::Error;
use std::fmt;
use tide::utils::async_trait;

mod openai;
use openai::OpenAiVisionAnalyzer;

mod simulated;
use simulated::SimulatedAnalyzer;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// A product photo as received by the analyze endpoint: the original data
/// URL (forwarded verbatim to the vision model) plus the decoded payload
/// facts the simulated analyzer seeds from.
#[derive(Clone, Debug)]
pub struct ImageUpload {
	pub data_url: String,
	pub media_type: String,
	pub byte_len: usize,
}

impl ImageUpload {
	/// Validates and decodes a `data:image/...;base64,...` URL. The payload
	/// is fully decoded so corrupt base64 is rejected here rather than
	/// surfacing as a confusing upstream failure.
	pub fn from_data_url(data_url: &str) -> Result<Self, UploadError> {
		if !data_url.starts_with("data:image/") {
			return Err(UploadError::NotAnImage);
		}
		let (header, payload) = match data_url.split_once(";base64,") {
			Some(parts) => parts,
			None => return Err(UploadError::NotBase64),
		};
		let media_type = header.trim_start_matches("data:").to_string();
		let bytes = STANDARD.decode(payload)?;
		Ok(Self {
			data_url: data_url.to_string(),
			media_type,
			byte_len: bytes.len(),
		})
	}

	pub fn format(&self) -> ImageFormat {
		if self.media_type == "image/jpeg" {
			ImageFormat::Jpeg
		} else {
			ImageFormat::Png
		}
	}
}

#[derive(Debug)]
pub enum UploadError {
	NotAnImage,
	NotBase64,
	InvalidBase64(base64::DecodeError),
}

impl fmt::Display for UploadError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NotAnImage => write!(f, "invalid image format; expected a base64 image data URL"),
			Self::NotBase64 => write!(f, "image data URL is missing a base64 payload"),
			Self::InvalidBase64(error) => write!(f, "image payload is not valid base64: {}", error),
		}
	}
}

impl Error for UploadError {}

impl From<base64::DecodeError> for UploadError {
	fn from(value: base64::DecodeError) -> Self {
		Self::InvalidBase64(value)
	}
}

#[derive(Debug)]
pub enum AnalyzerError {
	InvalidApiKey,
	QuotaExceeded,
	Upstream(String),
	MalformedResponse(String),
}

impl fmt::Display for AnalyzerError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidApiKey => write!(f, "vision API authentication failed; check the configured key"),
			Self::QuotaExceeded => write!(f, "vision API quota or rate limit exceeded; try again later"),
			Self::Upstream(details) => write!(f, "vision API error: {}", details),
			Self::MalformedResponse(details) => write!(f, "could not extract an analysis from the vision API response: {}", details),
		}
	}
}

impl Error for AnalyzerError {}

impl AnalyzerError {
	pub fn status(&self) -> tide::StatusCode {
		match self {
			Self::InvalidApiKey => tide::StatusCode::Unauthorized,
			Self::QuotaExceeded => tide::StatusCode::TooManyRequests,
			Self::Upstream(_) => tide::StatusCode::ServiceUnavailable,
			Self::MalformedResponse(_) => tide::StatusCode::InternalServerError,
		}
	}
}

/// Strategy for turning an uploaded product photo into a structured
/// analysis. Selected once at startup from configuration; handlers never
/// branch on the environment themselves.
#[async_trait]
pub trait ProductAnalyzer: Send + Sync {
	async fn analyze(&self, image: &ImageUpload) -> Result<ProductAnalysis, AnalyzerError>;

	/// Short mode name surfaced by the debug endpoint.
	fn mode(&self) -> &'static str;

	/// Response-level note attached to successful analyses, if any.
	fn note(&self) -> Option<String> {
		None
	}
}

pub fn build_analyzer(config: &ConfigDocument) -> miette::Result<Arc<dyn ProductAnalyzer>> {
	match config.analyzer.as_deref().unwrap_or("simulated") {
		"simulated" => Ok(Arc::new(SimulatedAnalyzer)),
		"openai" => {
			let openai = config
				.openai
				.as_ref()
				.ok_or_else(|| miette::miette!("analyzer mode is \"openai\" but no openai node is configured"))?;
			let key = openai
				.key
				.clone()
				.ok_or_else(|| miette::miette!("analyzer mode is \"openai\" but no API key is configured"))?;
			let model = openai.model.clone().unwrap_or_else(|| String::from(DEFAULT_OPENAI_MODEL));
			let endpoint = openai
				.endpoint
				.clone()
				.unwrap_or_else(|| String::from(DEFAULT_OPENAI_ENDPOINT));
			Ok(Arc::new(OpenAiVisionAnalyzer::new(key, model, endpoint)))
		}
		other => Err(miette::miette!("unknown analyzer mode \"{}\"", other)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_a_png_data_url() {
		// "hello" in base64
		let upload = ImageUpload::from_data_url("data:image/png;base64,aGVsbG8=").unwrap();
		assert_eq!(upload.media_type, "image/png");
		assert_eq!(upload.byte_len, 5);
		assert_eq!(upload.format(), ImageFormat::Png);
	}

	#[test]
	fn detects_jpeg_format() {
		let upload = ImageUpload::from_data_url("data:image/jpeg;base64,aGVsbG8=").unwrap();
		assert_eq!(upload.format(), ImageFormat::Jpeg);
	}

	#[test]
	fn rejects_non_image_payloads() {
		assert!(matches!(
			ImageUpload::from_data_url("data:text/plain;base64,aGVsbG8="),
			Err(UploadError::NotAnImage)
		));
		assert!(matches!(ImageUpload::from_data_url("hello"), Err(UploadError::NotAnImage)));
	}

	#[test]
	fn rejects_missing_base64_marker() {
		assert!(matches!(
			ImageUpload::from_data_url("data:image/png,plain"),
			Err(UploadError::NotBase64)
		));
	}

	#[test]
	fn rejects_corrupt_base64() {
		assert!(matches!(
			ImageUpload::from_data_url("data:image/png;base64,%%%"),
			Err(UploadError::InvalidBase64(_))
		));
	}
}
