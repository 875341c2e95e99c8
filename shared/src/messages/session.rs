// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::analysis::ProductAnalysis;
use super::copy::CopyOption;
use rgb::RGB8;
use serde::{Deserialize, Serialize};

/// The ad-building session: one immutable value accumulated through the
/// pipeline stages (upload, analyze, choose copy, pick style and quality).
///
/// Each `with_*` transition consumes the session and returns the next one,
/// so every stage is a plain function over its input rather than a writer
/// of shared state. The server issues sessions; the client threads the
/// current value through each request.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSession {
	pub id: String,
	/// Seed in [0, 1) driving layout jitter for "generate new ad"
	/// variations; fixed at session creation so replays are deterministic.
	pub seed: f64,
	pub image: Option<UploadedImage>,
	pub analysis: Option<ProductAnalysis>,
	pub chosen_copy: Option<CopyOption>,
	pub style: Option<AdStyle>,
	pub fidelity: Option<Fidelity>,
	pub quality: Option<Quality>,
}

impl AdSession {
	pub fn new(id: String, seed: f64) -> Self {
		Self {
			id,
			seed,
			image: None,
			analysis: None,
			chosen_copy: None,
			style: None,
			fidelity: None,
			quality: None,
		}
	}

	pub fn with_image(mut self, image: UploadedImage) -> Self {
		self.image = Some(image);
		self
	}

	pub fn with_analysis(mut self, analysis: ProductAnalysis) -> Self {
		self.analysis = Some(analysis);
		self
	}

	pub fn with_chosen_copy(mut self, copy: CopyOption) -> Self {
		self.chosen_copy = Some(copy);
		self
	}

	pub fn with_style(mut self, style: AdStyle) -> Self {
		self.style = Some(style);
		self
	}

	pub fn with_fidelity(mut self, fidelity: Fidelity) -> Self {
		self.fidelity = Some(fidelity);
		self
	}

	pub fn with_quality(mut self, quality: Quality) -> Self {
		self.quality = Some(quality);
		self
	}

	/// Names the stages still missing before the session can be composed.
	/// Fidelity is not required; composition falls back to standard shades.
	pub fn missing_stages(&self) -> Vec<&'static str> {
		let mut missing = Vec::new();
		if self.image.is_none() {
			missing.push("image");
		}
		if self.chosen_copy.is_none() {
			missing.push("chosenCopy");
		}
		if self.style.is_none() {
			missing.push("style");
		}
		if self.quality.is_none() {
			missing.push("quality");
		}
		missing
	}

	pub fn is_ready_for_compose(&self) -> bool {
		self.missing_stages().is_empty()
	}
}

/// Metadata about the uploaded product photo. Pixel dimensions are measured
/// by the client when the image loads; the raw bytes travel only in the
/// analyze request.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
	pub file_name: String,
	pub format: ImageFormat,
	pub byte_len: u64,
	pub pixel_width: u32,
	pub pixel_height: u32,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
	Png,
	Jpeg,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStyle {
	Studio,
	Nature,
}

impl AdStyle {
	/// The stage background sampled behind the overlay text, varying
	/// slightly with render fidelity.
	pub fn stage_background(self, fidelity: Fidelity) -> RGB8 {
		match (self, fidelity) {
			(Self::Studio, Fidelity::High) => RGB8::new(241, 243, 244),
			(Self::Studio, Fidelity::Standard) => RGB8::new(248, 249, 250),
			(Self::Nature, Fidelity::High) => RGB8::new(224, 242, 224),
			(Self::Nature, Fidelity::Standard) => RGB8::new(232, 245, 232),
		}
	}

	/// The flat color painted under the exported canvas.
	pub fn safe_export_background(self) -> RGB8 {
		match self {
			Self::Studio => RGB8::new(248, 249, 250),
			Self::Nature => RGB8::new(232, 245, 232),
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fidelity {
	Standard,
	High,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
	Low,
	Medium,
	High,
}

impl Quality {
	/// Canvas capture scale for export.
	pub fn export_scale(self) -> f64 {
		match self {
			Self::Low => 1.0,
			Self::Medium => 1.5,
			Self::High => 2.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_image() -> UploadedImage {
		UploadedImage {
			file_name: String::from("bottle.png"),
			format: ImageFormat::Png,
			byte_len: 48_213,
			pixel_width: 800,
			pixel_height: 1200,
		}
	}

	fn sample_copy() -> CopyOption {
		CopyOption {
			id: String::from("copy_1"),
			headline: String::from("Simply Superior"),
			subhead: String::from("Clean design, powerful performance"),
			tone: String::from("premium"),
			confidence: 92,
		}
	}

	#[test]
	fn new_session_is_not_ready() {
		let session = AdSession::new(String::from("abc123"), 0.42);
		assert!(!session.is_ready_for_compose());
		assert_eq!(session.missing_stages(), vec!["image", "chosenCopy", "style", "quality"]);
	}

	#[test]
	fn stage_transitions_accumulate() {
		let session = AdSession::new(String::from("abc123"), 0.42)
			.with_image(sample_image())
			.with_chosen_copy(sample_copy())
			.with_style(AdStyle::Studio)
			.with_quality(Quality::Medium);
		assert!(session.is_ready_for_compose());
		assert_eq!(session.id, "abc123");
		assert_eq!(session.style, Some(AdStyle::Studio));
	}

	#[test]
	fn fidelity_is_optional_for_compose() {
		let session = AdSession::new(String::from("abc123"), 0.0)
			.with_image(sample_image())
			.with_chosen_copy(sample_copy())
			.with_style(AdStyle::Nature)
			.with_quality(Quality::High);
		assert!(session.is_ready_for_compose());
		assert_eq!(session.fidelity, None);
	}

	#[test]
	fn quality_maps_to_export_scale() {
		assert_eq!(Quality::Low.export_scale(), 1.0);
		assert_eq!(Quality::Medium.export_scale(), 1.5);
		assert_eq!(Quality::High.export_scale(), 2.0);
	}

	#[test]
	fn stage_backgrounds_vary_with_fidelity() {
		assert_eq!(AdStyle::Studio.stage_background(Fidelity::Standard), RGB8::new(248, 249, 250));
		assert_eq!(AdStyle::Studio.stage_background(Fidelity::High), RGB8::new(241, 243, 244));
		assert_eq!(AdStyle::Nature.stage_background(Fidelity::Standard), RGB8::new(232, 245, 232));
		assert_eq!(AdStyle::Nature.stage_background(Fidelity::High), RGB8::new(224, 242, 224));
	}
}
