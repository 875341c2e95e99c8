// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::colors::{relative_luminance, BLACK, WHITE};
use contrast::contrast;
use rgb::RGB8;
use serde::{Deserialize, Serialize};

/// Floor for the current background luminance when computing the scale
/// factor, so near-black backgrounds don't divide by zero.
const LUMINANCE_FLOOR: f64 = 0.001;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
	White,
	Black,
}

impl TextColor {
	pub fn color(self) -> RGB8 {
		match self {
			Self::White => WHITE,
			Self::Black => BLACK,
		}
	}
}

/// The background replacement computed when neither text color reached the
/// target ratio against the original background.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BackgroundAdjustment {
	/// The luminance-scaled background to render behind the text.
	pub background: RGB8,
	/// The best ratio either text color managed against the original
	/// background, kept for diagnostic reporting.
	pub original_ratio: f64,
}

/// The outcome of resolving a text color against a background.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TextColorResolution {
	pub color: TextColor,
	/// The contrast ratio the chosen text color achieves, measured against
	/// the adjusted background when an adjustment was needed.
	pub ratio: f64,
	pub adjustment: Option<BackgroundAdjustment>,
}

impl TextColorResolution {
	pub fn adjusted(&self) -> bool {
		self.adjustment.is_some()
	}
}

/// Picks white or black text for the given background.
///
/// White wins whenever it meets the target ratio and is at least as
/// contrasting as black; the `>=` comparison makes ties resolve to white,
/// which keeps output visually deterministic. If black meets the target
/// instead, black wins. When neither reaches the target, the more
/// contrasting of the two is kept and the background itself is adjusted
/// (see [`adjust_background_for_contrast`]) to carry that text color.
pub fn best_text_color(background: RGB8, target_ratio: f64) -> TextColorResolution {
	let white_contrast: f64 = contrast(WHITE, background);
	let black_contrast: f64 = contrast(BLACK, background);

	if white_contrast >= target_ratio && white_contrast >= black_contrast {
		return TextColorResolution {
			color: TextColor::White,
			ratio: white_contrast,
			adjustment: None,
		};
	}
	if black_contrast >= target_ratio {
		return TextColorResolution {
			color: TextColor::Black,
			ratio: black_contrast,
			adjustment: None,
		};
	}

	let text_color = if white_contrast > black_contrast {
		TextColor::White
	} else {
		TextColor::Black
	};
	let (adjusted_background, ratio) = adjust_background_for_contrast(background, text_color.color(), target_ratio);
	TextColorResolution {
		color: text_color,
		ratio,
		adjustment: Some(BackgroundAdjustment {
			background: adjusted_background,
			original_ratio: white_contrast.max(black_contrast),
		}),
	}
}

/// Scales a background's luminance so the given text color reads against it
/// at the target ratio.
///
/// Light text (luminance above 0.5) needs a darker background and dark text
/// a lighter one; the target luminance is solved directly from the contrast
/// ratio formula, clamped to [0, 1], and reached by scaling all three
/// channels by the square root of the luminance ratio. This is a single
/// pass, not an iterative solver: rounding and channel saturation can leave
/// the achieved ratio below the target (a background already at a channel
/// extreme cannot move further), so the actual ratio is recomputed and
/// returned alongside the color for callers to report.
pub fn adjust_background_for_contrast(background: RGB8, text_color: RGB8, target_ratio: f64) -> (RGB8, f64) {
	let text_luminance = relative_luminance(text_color);

	let target_luminance = if text_luminance > 0.5 {
		(text_luminance + 0.05) / target_ratio - 0.05
	} else {
		target_ratio * (text_luminance + 0.05) - 0.05
	};
	let target_luminance = target_luminance.clamp(0.0, 1.0);

	let current_luminance = relative_luminance(background);
	let scale = (target_luminance / current_luminance.max(LUMINANCE_FLOOR)).sqrt();

	let adjusted = RGB8::new(
		scale_channel(background.r, scale),
		scale_channel(background.g, scale),
		scale_channel(background.b, scale),
	);
	let achieved_ratio: f64 = contrast(text_color, adjusted);
	(adjusted, achieved_ratio)
}

fn scale_channel(channel: u8, scale: f64) -> u8 {
	(f64::from(channel) * scale).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::colors::color_from_rgb_str;

	fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
		(a - b).abs() < eps
	}

	#[test]
	fn contrast_of_black_on_white_is_21() {
		let ratio: f64 = contrast(BLACK, WHITE);
		assert!(approx_eq(ratio, 21.0, 1e-2), "black/white contrast: {}", ratio);
	}

	#[test]
	fn contrast_is_symmetric() {
		let a = RGB8::new(204, 51, 77);
		let b = RGB8::new(26, 26, 102);
		let ab: f64 = contrast(a, b);
		let ba: f64 = contrast(b, a);
		assert!(approx_eq(ab, ba, 1e-9), "asymmetric: {} vs {}", ab, ba);
	}

	#[test]
	fn contrast_of_equal_colors_is_1() {
		let color = RGB8::new(128, 64, 32);
		let ratio: f64 = contrast(color, color);
		assert!(approx_eq(ratio, 1.0, 1e-9), "equal-color contrast: {}", ratio);
	}

	#[test]
	fn near_white_studio_background_takes_black_text() {
		let background = color_from_rgb_str("#f8f9fa").unwrap();
		let resolution = best_text_color(background, 4.5);
		assert_eq!(resolution.color, TextColor::Black);
		assert!(!resolution.adjusted());
		assert!(resolution.ratio > 4.5, "ratio: {}", resolution.ratio);
	}

	#[test]
	fn dark_background_takes_white_text() {
		let background = color_from_rgb_str("#1a1a1a").unwrap();
		let resolution = best_text_color(background, 4.5);
		assert_eq!(resolution.color, TextColor::White);
		assert!(!resolution.adjusted());
		assert!(resolution.ratio >= 4.5, "ratio: {}", resolution.ratio);
	}

	#[test]
	fn passing_white_is_never_adjusted() {
		// Any background white already clears at AA stays unadjusted.
		for color_str in ["#000000", "#1a1a1a", "#2c3e50", "#333366"] {
			let background = color_from_rgb_str(color_str).unwrap();
			let white_contrast: f64 = contrast(WHITE, background);
			assert!(white_contrast >= 4.5, "test premise broken for {}", color_str);
			let resolution = best_text_color(background, 4.5);
			assert_eq!(resolution.color, TextColor::White);
			assert!(!resolution.adjusted());
		}
	}

	#[test]
	fn mid_gray_at_aaa_target_adjusts_background() {
		let background = color_from_rgb_str("#808080").unwrap();
		let resolution = best_text_color(background, 7.0);
		assert!(resolution.adjusted());
		let adjustment = resolution.adjustment.expect("adjustment should be present");
		let original: f64 = contrast(resolution.color.color(), background);
		let improved: f64 = contrast(resolution.color.color(), adjustment.background);
		assert!(improved >= original, "adjustment did not improve contrast: {} -> {}", original, improved);
		assert!(approx_eq(adjustment.original_ratio, original, 1e-9));
	}

	#[test]
	fn near_tie_resolves_to_white() {
		// #737373 sits where white and black contrast nearly cross over
		// (about 4.7 vs 4.4); both clear the AA floor comparison order, and
		// the white-first comparison must keep white.
		let background = color_from_rgb_str("#737373").unwrap();
		let white_contrast: f64 = contrast(WHITE, background);
		let black_contrast: f64 = contrast(BLACK, background);
		assert!((white_contrast - black_contrast).abs() < 0.5, "premise: contrasts nearly equal");
		let resolution = best_text_color(background, 4.5);
		assert_eq!(resolution.color, TextColor::White);
		assert!(!resolution.adjusted());
	}

	#[test]
	fn white_preferred_when_strictly_more_contrasting_below_target() {
		// #737373: white contrast ~4.7, black ~4.4; with a 7.0 target
		// neither passes and white must be kept as the text color.
		let background = color_from_rgb_str("#737373").unwrap();
		let resolution = best_text_color(background, 7.0);
		assert_eq!(resolution.color, TextColor::White);
		assert!(resolution.adjusted());
	}

	#[test]
	fn dark_text_adjustment_lightens_background() {
		let background = color_from_rgb_str("#808080").unwrap();
		let (adjusted, ratio) = adjust_background_for_contrast(background, BLACK, 7.0);
		assert!(adjusted.r > background.r);
		assert!(ratio >= 7.0 - 0.25, "achieved ratio: {}", ratio);
		let luminance = relative_luminance(adjusted);
		assert!(approx_eq(luminance, 0.30, 0.03), "target luminance missed: {}", luminance);
	}

	#[test]
	fn light_text_adjustment_darkens_background() {
		let background = color_from_rgb_str("#737373").unwrap();
		let (adjusted, ratio) = adjust_background_for_contrast(background, WHITE, 7.0);
		assert!(adjusted.r < background.r);
		assert!(ratio >= 7.0 - 0.25, "achieved ratio: {}", ratio);
	}

	#[test]
	fn saturated_channel_can_undershoot_target() {
		// Pure red can't get any lighter on its only populated channel, so
		// the single-pass adjustment tops out below an AAA target. The
		// resolver reports the shortfall instead of failing.
		let background = color_from_rgb_str("#ff0000").unwrap();
		let resolution = best_text_color(background, 7.0);
		assert!(resolution.adjusted());
		assert!(resolution.ratio < 7.0, "expected undershoot, got {}", resolution.ratio);
		let adjustment = resolution.adjustment.expect("adjustment should be present");
		assert!(approx_eq(resolution.ratio, adjustment.original_ratio, 0.1));
	}

	#[test]
	fn near_black_background_survives_zero_luminance() {
		let background = color_from_rgb_str("#000000").unwrap();
		let (adjusted, ratio) = adjust_background_for_contrast(background, BLACK, 4.5);
		// All channels are zero, so scaling can't move the color at all.
		assert_eq!(adjusted, background);
		assert!(approx_eq(ratio, 1.0, 1e-9), "ratio: {}", ratio);
	}
}
