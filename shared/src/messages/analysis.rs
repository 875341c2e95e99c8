// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

/// The structured product description extracted from an uploaded photo.
///
/// Field names follow the JSON the browser client already consumes.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysis {
	pub product_type: String,
	pub key_features: Vec<String>,
	pub target_audience: String,
	pub brand_positioning: BrandPositioning,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub simulation_note: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BrandPositioning {
	pub tone: BrandTone,
	pub style: BrandStyle,
	pub description: String,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BrandTone {
	#[serde(rename = "premium")]
	Premium,
	#[serde(rename = "budget-friendly")]
	BudgetFriendly,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandStyle {
	Bold,
	Minimal,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AnalyzeRequest {
	pub image_b64: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AnalyzeResponse {
	pub success: bool,
	pub analysis: ProductAnalysis,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
}
