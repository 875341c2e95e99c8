// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::json_response;
use crate::copywriter::generate_copy_options;
use sku_studio_shared::messages::copy::{CopyRequest, CopyResponse};
use tide::Request;

/// POST /api/copy
///
/// Generates three marketing copy options from a product analysis.
pub async fn generate_copy(mut request: Request<()>) -> tide::Result {
	let copy_request: CopyRequest = request.body_json().await?;

	let copy_options = generate_copy_options(&copy_request.analysis);
	tide::log::info!(
		"Generated {} copy options for product type: {}",
		copy_options.len(),
		copy_request.analysis.product_type
	);

	json_response(&CopyResponse {
		success: true,
		copy_options,
	})
}
