// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{AnalyzerError, ImageUpload, ProductAnalyzer};
use rand::{thread_rng, Rng};
use sku_studio_shared::messages::analysis::{BrandPositioning, BrandStyle, BrandTone, ProductAnalysis};
use sku_studio_shared::messages::session::ImageFormat;
use tide::utils::async_trait;

const SIMULATION_NOTE: &str =
	"SIMULATION: This analysis is randomly generated for demo purposes. Real product identification requires AI vision APIs.";
const RESPONSE_NOTE: &str = "This is a simulated response. Configure an OpenAI key for real analysis.";

/// Offline analyzer: picks a plausible canned analysis from a fixed catalog,
/// seeded by the upload's size and format so the same image keeps getting
/// the same product.
pub struct SimulatedAnalyzer;

#[async_trait]
impl ProductAnalyzer for SimulatedAnalyzer {
	async fn analyze(&self, image: &ImageUpload) -> Result<ProductAnalysis, AnalyzerError> {
		let catalog = analysis_catalog();
		let mut analysis = catalog[catalog_index(image, catalog.len())].clone();

		// Vary the feature list a little so repeated demos don't look
		// copy-pasted; always keeps at least the first two features.
		let features_to_remove = thread_rng().gen_range(0..3);
		if features_to_remove > 0 && analysis.key_features.len() > 3 {
			let keep = analysis.key_features.len() - features_to_remove;
			analysis.key_features.truncate(keep);
		}

		analysis.simulation_note = Some(String::from(SIMULATION_NOTE));
		Ok(analysis)
	}

	fn mode(&self) -> &'static str {
		"simulated"
	}

	fn note(&self) -> Option<String> {
		Some(String::from(RESPONSE_NOTE))
	}
}

fn catalog_index(image: &ImageUpload, catalog_len: usize) -> usize {
	let format_weight = match image.format() {
		ImageFormat::Jpeg => 50,
		ImageFormat::Png => 25,
	};
	let seed = image.byte_len % 1000 + image.byte_len % 100 + format_weight;
	seed % catalog_len
}

fn positioning(tone: BrandTone, style: BrandStyle, description: &str) -> BrandPositioning {
	BrandPositioning {
		tone,
		style,
		description: String::from(description),
	}
}

fn entry(
	product_type: &str,
	key_features: &[&str],
	target_audience: &str,
	brand_positioning: BrandPositioning,
) -> ProductAnalysis {
	ProductAnalysis {
		product_type: String::from(product_type),
		key_features: key_features.iter().map(|feature| String::from(*feature)).collect(),
		target_audience: String::from(target_audience),
		brand_positioning,
		simulation_note: None,
	}
}

fn analysis_catalog() -> Vec<ProductAnalysis> {
	vec![
		entry(
			"Wireless Bluetooth Headphones",
			&[
				"Active noise cancellation",
				"Premium leather padding",
				"30-hour battery life",
				"Quick charge technology",
				"Foldable design",
			],
			"Music enthusiasts and commuters",
			positioning(
				BrandTone::Premium,
				BrandStyle::Bold,
				"Premium bold positioning - High-end audio experience for discerning listeners",
			),
		),
		entry(
			"Smartphone Case",
			&[
				"Drop protection up to 10ft",
				"Wireless charging compatible",
				"Slim profile design",
				"Anti-fingerprint coating",
			],
			"Tech-savvy professionals and students",
			positioning(
				BrandTone::BudgetFriendly,
				BrandStyle::Minimal,
				"Budget-friendly minimal positioning - Essential protection without the bulk",
			),
		),
		entry(
			"Stainless Steel Water Bottle",
			&[
				"Double-wall vacuum insulation",
				"24-hour cold retention",
				"Leak-proof cap",
				"BPA-free materials",
				"Wide mouth opening",
			],
			"Health-conscious individuals and outdoor enthusiasts",
			positioning(
				BrandTone::Premium,
				BrandStyle::Minimal,
				"Premium minimal positioning - Clean design meets superior performance",
			),
		),
		entry(
			"Gaming Mechanical Keyboard",
			&[
				"RGB backlighting",
				"Tactile mechanical switches",
				"Programmable macro keys",
				"Anti-ghosting technology",
				"Detachable cable",
			],
			"Gaming enthusiasts and programmers",
			positioning(
				BrandTone::BudgetFriendly,
				BrandStyle::Bold,
				"Budget-friendly bold positioning - Professional gaming performance at an accessible price",
			),
		),
		entry(
			"Ceramic Coffee Mug",
			&[
				"Heat-retaining ceramic",
				"Comfortable grip handle",
				"Microwave safe",
				"Dishwasher friendly",
				"Elegant matte finish",
			],
			"Coffee lovers and office workers",
			positioning(
				BrandTone::BudgetFriendly,
				BrandStyle::Minimal,
				"Budget-friendly minimal positioning - Simple elegance for everyday moments",
			),
		),
		entry(
			"Fitness Tracker Watch",
			&[
				"Heart rate monitoring",
				"Sleep tracking",
				"7-day battery life",
				"Water resistant to 50m",
				"Smartphone notifications",
			],
			"Fitness enthusiasts and health-conscious individuals",
			positioning(
				BrandTone::Premium,
				BrandStyle::Bold,
				"Premium bold positioning - Advanced health insights for serious athletes",
			),
		),
		entry(
			"LED Desk Lamp",
			&[
				"Adjustable brightness levels",
				"USB charging port",
				"Flexible arm design",
				"Eye-care LED technology",
				"Touch controls",
			],
			"Students, remote workers, and creative professionals",
			positioning(
				BrandTone::BudgetFriendly,
				BrandStyle::Minimal,
				"Budget-friendly minimal positioning - Smart lighting for productive workspaces",
			),
		),
		entry(
			"Wireless Charging Pad",
			&[
				"Fast 15W charging",
				"Universal compatibility",
				"LED charging indicator",
				"Non-slip surface",
				"Overheating protection",
			],
			"Tech professionals and smartphone users",
			positioning(
				BrandTone::Premium,
				BrandStyle::Minimal,
				"Premium minimal positioning - Effortless charging with sophisticated design",
			),
		),
		entry(
			"Bluetooth Portable Speaker",
			&[
				"360-degree sound",
				"Waterproof rating IPX7",
				"12-hour playtime",
				"Voice assistant compatible",
				"Compact travel size",
			],
			"Music lovers and outdoor adventurers",
			positioning(
				BrandTone::BudgetFriendly,
				BrandStyle::Bold,
				"Budget-friendly bold positioning - Big sound, small price, endless adventures",
			),
		),
		entry(
			"Ergonomic Office Chair",
			&[
				"Lumbar support system",
				"Breathable mesh back",
				"Height adjustable",
				"Armrest customization",
				"360-degree swivel",
			],
			"Remote workers and office professionals",
			positioning(
				BrandTone::Premium,
				BrandStyle::Minimal,
				"Premium minimal positioning - Professional comfort meets timeless design",
			),
		),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_std::task::block_on;

	fn upload(media_type: &str, byte_len: usize) -> ImageUpload {
		ImageUpload {
			data_url: format!("data:{};base64,", media_type),
			media_type: String::from(media_type),
			byte_len,
		}
	}

	#[test]
	fn selection_is_deterministic_for_a_given_upload() {
		let image = upload("image/png", 48_213);
		let first = catalog_index(&image, analysis_catalog().len());
		let second = catalog_index(&image, analysis_catalog().len());
		assert_eq!(first, second);
	}

	#[test]
	fn format_shifts_the_selection_seed() {
		let png = upload("image/png", 500);
		let jpeg = upload("image/jpeg", 500);
		assert_ne!(
			catalog_index(&png, analysis_catalog().len()),
			catalog_index(&jpeg, analysis_catalog().len())
		);
	}

	#[test]
	fn analysis_keeps_at_least_two_features() {
		let analyzer = SimulatedAnalyzer;
		for byte_len in [0, 123, 48_213, 999_999] {
			let image = upload("image/png", byte_len);
			let analysis = block_on(analyzer.analyze(&image)).unwrap();
			assert!(analysis.key_features.len() >= 2, "too few features: {:?}", analysis.key_features);
			assert!(analysis.simulation_note.is_some());
		}
	}

	#[test]
	fn every_catalog_entry_is_well_formed() {
		for analysis in analysis_catalog() {
			assert!(!analysis.product_type.is_empty());
			assert!((3..=5).contains(&analysis.key_features.len()));
			assert!(!analysis.target_audience.is_empty());
			assert!(!analysis.brand_positioning.description.is_empty());
		}
	}

	#[test]
	fn simulated_mode_reports_a_note() {
		let analyzer = SimulatedAnalyzer;
		assert_eq!(analyzer.mode(), "simulated");
		assert!(analyzer.note().is_some());
	}
}
