// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::json_response;
use crate::analyzer::{ImageUpload, ProductAnalyzer};
use async_std::sync::Arc;
use sku_studio_shared::messages::analysis::{AnalyzeRequest, AnalyzeResponse};
use tide::{Request, Response, StatusCode};

/// POST /api/analyze
///
/// Analyzes an uploaded product photo. The body carries the image as a
/// base64 data URL; the response carries the structured analysis produced
/// by the configured analyzer.
pub async fn analyze(mut request: Request<()>, analyzer: Arc<dyn ProductAnalyzer>) -> tide::Result {
	let analyze_request: AnalyzeRequest = request.body_json().await?;

	let image = match ImageUpload::from_data_url(&analyze_request.image_b64) {
		Ok(image) => image,
		Err(error) => {
			return Ok(Response::builder(StatusCode::BadRequest).body(error.to_string()).build());
		}
	};

	match analyzer.analyze(&image).await {
		Ok(analysis) => {
			tide::log::info!("Analyzed {} byte {} upload as: {}", image.byte_len, image.media_type, analysis.product_type);
			json_response(&AnalyzeResponse {
				success: true,
				analysis,
				note: analyzer.note(),
			})
		}
		Err(error) => {
			tide::log::error!("Product analysis failed: {}", error);
			Err(tide::Error::new(error.status(), anyhow::Error::msg(error.to_string())))
		}
	}
}
