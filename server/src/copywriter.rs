// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rand::{thread_rng, Rng};
use sku_studio_shared::messages::analysis::{BrandStyle, BrandTone, ProductAnalysis};
use sku_studio_shared::messages::copy::CopyOption;

const HEADLINE_WORD_LIMIT: usize = 7;
const SUBHEAD_WORD_LIMIT: usize = 14;
const OPTION_COUNT: usize = 3;

const PREMIUM_WORDS: [&str; 5] = ["Premium", "Luxury", "Elite", "Exclusive", "Professional"];
const BUDGET_WORDS: [&str; 5] = ["Smart", "Affordable", "Essential", "Practical", "Value"];
const BOLD_WORDS: [&str; 4] = ["Revolutionary", "Game-Changing", "Ultimate", "Breakthrough"];
const MINIMAL_WORDS: [&str; 4] = ["Simply", "Effortlessly", "Perfectly", "Elegantly"];

struct CopyTemplate {
	headline: String,
	subhead: String,
	tone: &'static str,
}

/// Generates three headline/subhead options from a product analysis.
///
/// Word pools are chosen by the brand positioning (tone picks premium vs.
/// budget vocabulary, style picks bold vs. minimal), then filled in with the
/// product type's leading word, the first two features, and the audience.
/// Headlines are capped at 7 words and subheads at 14.
pub fn generate_copy_options(analysis: &ProductAnalysis) -> Vec<CopyOption> {
	let mut rng = thread_rng();
	copy_templates(analysis)
		.into_iter()
		.take(OPTION_COUNT)
		.enumerate()
		.map(|(index, template)| CopyOption {
			id: format!("copy_{}", index + 1),
			headline: truncate_to_word_limit(&template.headline, HEADLINE_WORD_LIMIT),
			subhead: truncate_to_word_limit(&template.subhead, SUBHEAD_WORD_LIMIT),
			tone: String::from(template.tone),
			confidence: rng.gen_range(85..=99),
		})
		.collect()
}

fn copy_templates(analysis: &ProductAnalysis) -> Vec<CopyTemplate> {
	let is_premium = analysis.brand_positioning.tone == BrandTone::Premium;
	let is_bold = analysis.brand_positioning.style == BrandStyle::Bold;

	let style_words = if is_premium { &PREMIUM_WORDS } else { &BUDGET_WORDS };
	let tone_words: &[&str] = if is_bold { &BOLD_WORDS } else { &MINIMAL_WORDS };

	let first_feature = feature_or(analysis, 0, "innovative design");
	let second_feature = feature_or(analysis, 1, "superior quality");
	let product_word = analysis.product_type.split_whitespace().next().unwrap_or("Product");
	let audience = analysis.target_audience.to_lowercase();

	vec![
		CopyTemplate {
			headline: format!("{} {}", tone_words[0], product_word),
			subhead: format!(
				"Experience {} like never before with our innovative solution",
				first_feature.to_lowercase()
			),
			tone: if is_premium { "premium" } else { "accessible" },
		},
		CopyTemplate {
			headline: format!("{} {} Solution", style_words[1], product_word),
			subhead: format!("Perfect for {} who demand {}", audience, second_feature.to_lowercase()),
			tone: if is_bold { "confident" } else { "friendly" },
		},
		CopyTemplate {
			headline: format!("Your {} {}", style_words[2], product_word),
			subhead: format!(
				"Combining {} with {} for maximum impact",
				first_feature.to_lowercase(),
				second_feature.to_lowercase()
			),
			tone: "balanced",
		},
		CopyTemplate {
			headline: format!("{} {} Experience", tone_words[1], product_word),
			subhead: format!("Designed specifically for {} seeking superior performance", audience),
			tone: if is_premium { "sophisticated" } else { "approachable" },
		},
		CopyTemplate {
			headline: format!("The {} Choice", style_words[0]),
			subhead: format!(
				"{} meets {} in this exceptional {}",
				first_feature,
				second_feature.to_lowercase(),
				analysis.product_type.to_lowercase()
			),
			tone: "authoritative",
		},
	]
}

fn feature_or<'a>(analysis: &'a ProductAnalysis, index: usize, fallback: &'a str) -> &'a str {
	analysis
		.key_features
		.get(index)
		.map(String::as_str)
		.filter(|feature| !feature.is_empty())
		.unwrap_or(fallback)
}

fn truncate_to_word_limit(text: &str, word_limit: usize) -> String {
	let words: Vec<&str> = text.split(' ').collect();
	if words.len() <= word_limit {
		return text.to_string();
	}
	words[..word_limit].join(" ")
}
