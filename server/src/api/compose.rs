// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::json_response;
use crate::composer::{compose_scene, ComposeError, DEFAULT_TARGET_RATIO};
use chrono::Utc;
use sku_studio_shared::messages::compose::{ComposeRequest, ComposeResponse};
use tide::{Request, Response, StatusCode};

/// POST /api/compose
///
/// Plans the ad composition for a completed session: where the product
/// image sits, which text color keeps the copy readable (adjusting the
/// backdrop behind the text when needed), and how the result is exported.
pub async fn compose(mut request: Request<()>) -> tide::Result {
	let compose_request: ComposeRequest = request.body_json().await?;
	let target_ratio = compose_request.target_ratio.unwrap_or(DEFAULT_TARGET_RATIO);

	match compose_scene(&compose_request.session, target_ratio, compose_request.variation, Utc::now()) {
		Ok(plan) => {
			if !plan.warnings.is_empty() {
				tide::log::info!(
					"Composed session {} with {} accessibility warning(s)",
					compose_request.session.id,
					plan.warnings.len()
				);
			}
			json_response(&ComposeResponse { success: true, plan })
		}
		Err(error @ ComposeError::SessionIncomplete(_)) => {
			Ok(Response::builder(StatusCode::UnprocessableEntity).body(error.to_string()).build())
		}
		Err(error @ ComposeError::EmptyImage) => {
			Ok(Response::builder(StatusCode::BadRequest).body(error.to_string()).build())
		}
	}
}
