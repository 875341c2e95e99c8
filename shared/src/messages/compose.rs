// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::session::AdSession;
use chrono::{DateTime, Utc};
use rgb::RGB8;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeRequest {
	pub session: AdSession,
	/// Contrast ratio the overlay text must reach; defaults to the WCAG AA
	/// threshold for normal text when omitted.
	#[serde(default)]
	pub target_ratio: Option<f64>,
	/// When set, applies the session seed as layout jitter and stamps the
	/// export file name, as the "generate new ad" action does.
	#[serde(default)]
	pub variation: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ComposeResponse {
	pub success: bool,
	pub plan: ScenePlan,
}

/// Everything the client needs to draw and export one ad: where the product
/// image sits on the fixed stage, what the overlay text looks like, whether
/// a contrast panel goes behind it, and how the capture is exported.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenePlan {
	pub stage_width: f64,
	pub stage_height: f64,
	pub background: RGB8,
	/// Variation band (1-3) steering the stage background treatment;
	/// absent for a plain export.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub background_variation: Option<u8>,
	pub sku: SkuPlacement,
	pub text: TextBlock,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub overlay: Option<OverlayPanel>,
	pub warnings: Vec<String>,
	pub export: ExportSettings,
	pub generated_at: DateTime<Utc>,
}

/// Placement of the uploaded product image on the stage, in stage pixels.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuPlacement {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
	pub x: f64,
	pub y: f64,
	pub color: RGB8,
	/// CSS text-shadow keeping the text legible over busy imagery; dark
	/// for white text, light for black text.
	pub shadow: String,
	pub headline: TextSpec,
	pub subhead: TextSpec,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpec {
	pub content: String,
	pub font_size_px: u32,
	pub font_weight: u32,
}

/// A semi-transparent panel rendered behind the text region when the stage
/// background alone couldn't reach the target contrast.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPanel {
	pub inset_px: f64,
	pub height_px: f64,
	pub color: RGB8,
	pub opacity: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
	pub scale: f64,
	pub file_name: String,
	/// Flat color painted under the captured canvas so transparent regions
	/// export cleanly.
	pub background: RGB8,
}
