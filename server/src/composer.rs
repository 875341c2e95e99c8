// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use sku_studio_shared::messages::compose::{ExportSettings, OverlayPanel, ScenePlan, SkuPlacement, TextBlock, TextSpec};
use sku_studio_shared::messages::session::{AdSession, Fidelity};
use sku_studio_shared::text_contrast::{best_text_color, TextColor};
use std::error::Error;
use std::fmt;

pub const STAGE_WIDTH: f64 = 1942.0;
pub const STAGE_HEIGHT: f64 = 384.0;

/// WCAG AA minimum contrast ratio for normal-size text.
pub const DEFAULT_TARGET_RATIO: f64 = 4.5;

const SKU_MAX_HEIGHT_RATIO: f64 = 0.7;
const SKU_MAX_WIDTH_RATIO: f64 = 0.4;
const SKU_EDGE_MARGIN: f64 = 20.0;
const JITTER_RANGE_PX: f64 = 20.0;

const TEXT_INSET: f64 = 20.0;
const HEADLINE_SIZE_PX: u32 = 34;
const SUBHEAD_SIZE_PX: u32 = 16;
const MIN_HEADLINE_SIZE_PX: u32 = 34;
const MIN_SUBHEAD_SIZE_PX: u32 = 16;
const WHITE_TEXT_SHADOW: &str = "1px 1px 2px rgba(0, 0, 0, 0.5)";
const BLACK_TEXT_SHADOW: &str = "1px 1px 2px rgba(255, 255, 255, 0.5)";

const OVERLAY_INSET_PX: f64 = 15.0;
const OVERLAY_HEIGHT_PX: f64 = 80.0;
const OVERLAY_OPACITY: f64 = 0.8;

const VARIATION_BAND_THRESHOLD: f64 = 0.033;

#[derive(Debug, Eq, PartialEq)]
pub enum ComposeError {
	SessionIncomplete(Vec<&'static str>),
	EmptyImage,
}

impl fmt::Display for ComposeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::SessionIncomplete(missing) => {
				write!(f, "session is missing required stages: {}", missing.join(", "))
			}
			Self::EmptyImage => write!(f, "uploaded image has zero pixel dimensions"),
		}
	}
}

impl Error for ComposeError {}

/// Plans one ad composition from a completed session.
///
/// Pure over its inputs: the same session, target ratio, variation flag and
/// timestamp always produce the same plan, so "generate new ad" is just a
/// call with a fresh seed rather than hidden global state.
pub fn compose_scene(
	session: &AdSession,
	target_ratio: f64,
	variation: bool,
	generated_at: DateTime<Utc>,
) -> Result<ScenePlan, ComposeError> {
	let missing = session.missing_stages();
	if !missing.is_empty() {
		return Err(ComposeError::SessionIncomplete(missing));
	}
	// Completeness was just checked; these stages are all present.
	let (image, copy, style, quality) = match (&session.image, &session.chosen_copy, session.style, session.quality) {
		(Some(image), Some(copy), Some(style), Some(quality)) => (image, copy, style, quality),
		_ => return Err(ComposeError::SessionIncomplete(vec!["image", "chosenCopy", "style", "quality"])),
	};
	if image.pixel_width == 0 || image.pixel_height == 0 {
		return Err(ComposeError::EmptyImage);
	}

	let fidelity = session.fidelity.unwrap_or(Fidelity::Standard);
	let background = style.stage_background(fidelity);

	let sku = place_sku(
		f64::from(image.pixel_width),
		f64::from(image.pixel_height),
		session.seed,
		variation,
	);
	let background_variation = variation.then(|| variation_band(session.seed));

	let mut warnings = Vec::new();
	let resolution = best_text_color(background, target_ratio);
	let overlay = match &resolution.adjustment {
		Some(adjustment) => {
			warnings.push(format!(
				"Original contrast ratio ({:.1}:1) was below WCAG AA standard ({}:1). Background adjusted to achieve {:.1}:1 contrast.",
				adjustment.original_ratio, target_ratio, resolution.ratio
			));
			Some(OverlayPanel {
				inset_px: OVERLAY_INSET_PX,
				height_px: OVERLAY_HEIGHT_PX,
				color: adjustment.background,
				opacity: OVERLAY_OPACITY,
			})
		}
		None => {
			if resolution.ratio < target_ratio {
				warnings.push(format!(
					"Text contrast ratio ({:.1}:1) is below WCAG AA standard ({}:1). Using best available color.",
					resolution.ratio, target_ratio
				));
			}
			None
		}
	};

	let shadow = match resolution.color {
		TextColor::White => WHITE_TEXT_SHADOW,
		TextColor::Black => BLACK_TEXT_SHADOW,
	};
	let text = TextBlock {
		x: TEXT_INSET,
		y: TEXT_INSET,
		color: resolution.color.color(),
		shadow: String::from(shadow),
		headline: TextSpec {
			content: copy.headline.clone(),
			font_size_px: HEADLINE_SIZE_PX,
			font_weight: 700,
		},
		subhead: TextSpec {
			content: copy.subhead.clone(),
			font_size_px: SUBHEAD_SIZE_PX,
			font_weight: 400,
		},
	};

	if text.headline.font_size_px < MIN_HEADLINE_SIZE_PX {
		warnings.push(format!(
			"Headline font size ({}px) is below recommended {}px",
			text.headline.font_size_px, MIN_HEADLINE_SIZE_PX
		));
	}
	if text.subhead.font_size_px < MIN_SUBHEAD_SIZE_PX {
		warnings.push(format!(
			"Subhead font size ({}px) is below recommended {}px",
			text.subhead.font_size_px, MIN_SUBHEAD_SIZE_PX
		));
	}

	let file_name = if variation {
		format!("sku-ad-{}.png", generated_at.format("%H%M%S"))
	} else {
		String::from("sku-ad.png")
	};

	Ok(ScenePlan {
		stage_width: STAGE_WIDTH,
		stage_height: STAGE_HEIGHT,
		background,
		background_variation,
		sku,
		text,
		overlay,
		warnings,
		export: ExportSettings {
			scale: quality.export_scale(),
			file_name,
			background: style.safe_export_background(),
		},
		generated_at,
	})
}

/// Fits the product image to the stage: 70% of stage height, capped at 40%
/// of stage width, anchored near the right edge and vertically centered.
/// With variation enabled, the seed nudges the layer up to ±20px each way,
/// clamped so it never leaves the stage.
fn place_sku(pixel_width: f64, pixel_height: f64, seed: f64, variation: bool) -> SkuPlacement {
	let aspect_ratio = pixel_width / pixel_height;

	let mut height = STAGE_HEIGHT * SKU_MAX_HEIGHT_RATIO;
	let mut width = height * aspect_ratio;
	if width > STAGE_WIDTH * SKU_MAX_WIDTH_RATIO {
		width = STAGE_WIDTH * SKU_MAX_WIDTH_RATIO;
		height = width / aspect_ratio;
	}

	let base_x = STAGE_WIDTH - width - SKU_EDGE_MARGIN;
	let base_y = (STAGE_HEIGHT - height) / 2.0;

	let (x, y) = if variation {
		let magnitude = seed * JITTER_RANGE_PX * 2.0 - JITTER_RANGE_PX;
		let offset_x = magnitude * (seed * 10.0).sin();
		let offset_y = magnitude * (seed * 10.0).cos();
		(
			(base_x + offset_x).clamp(0.0, STAGE_WIDTH - width),
			(base_y + offset_y).clamp(0.0, STAGE_HEIGHT - height),
		)
	} else {
		(base_x, base_y)
	};

	SkuPlacement { x, y, width, height }
}

/// Buckets the seed into one of three background treatment bands.
fn variation_band(seed: f64) -> u8 {
	let variation = (seed * std::f64::consts::TAU).sin() * 0.1;
	if variation < -VARIATION_BAND_THRESHOLD {
		1
	} else if variation > VARIATION_BAND_THRESHOLD {
		2
	} else {
		3
	}
}
