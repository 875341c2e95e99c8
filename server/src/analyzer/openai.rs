// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{AnalyzerError, ImageUpload, ProductAnalyzer};
use serde::{Deserialize, Serialize};
use sku_studio_shared::messages::analysis::{BrandPositioning, ProductAnalysis};
use tide::utils::async_trait;
use tide::StatusCode;

const ANALYSIS_PROMPT: &str = "Analyze this product image and extract the following information in JSON format:

{
  \"product_type\": \"Specific product name/type\",
  \"features\": [\"3-5 key product features\"],
  \"target_audience\": \"Primary target audience description\",
  \"brand_positioning\": {
    \"tone\": \"premium\" or \"budget-friendly\",
    \"style\": \"bold\" or \"minimal\",
    \"description\": \"Brief positioning strategy description\"
  }
}

Focus on:
- Accurate product identification
- Specific, marketable features
- Realistic target audience
- Appropriate brand positioning based on product appearance and quality cues";

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f64 = 0.3;

/// Analyzer backed by the OpenAI vision chat completions API.
pub struct OpenAiVisionAnalyzer {
	key: String,
	model: String,
	endpoint: String,
}

impl OpenAiVisionAnalyzer {
	pub fn new(key: String, model: String, endpoint: String) -> Self {
		Self { key, model, endpoint }
	}
}

#[async_trait]
impl ProductAnalyzer for OpenAiVisionAnalyzer {
	async fn analyze(&self, image: &ImageUpload) -> Result<ProductAnalysis, AnalyzerError> {
		let request = ChatRequest {
			model: &self.model,
			messages: vec![ChatMessage {
				role: "user",
				content: vec![
					ContentPart::Text { text: ANALYSIS_PROMPT },
					ContentPart::ImageUrl {
						image_url: ImageUrl { url: &image.data_url },
					},
				],
			}],
			max_tokens: MAX_TOKENS,
			temperature: TEMPERATURE,
		};

		let authorization = format!("Bearer {}", self.key);
		let mut response = surf::post(&self.endpoint)
			.header("Authorization", authorization.as_str())
			.body_json(&request)
			.map_err(|error| AnalyzerError::Upstream(error.to_string()))?
			.await
			.map_err(|error| AnalyzerError::Upstream(error.to_string()))?;

		match response.status() {
			StatusCode::Unauthorized => return Err(AnalyzerError::InvalidApiKey),
			StatusCode::TooManyRequests => return Err(AnalyzerError::QuotaExceeded),
			status if !status.is_success() => {
				return Err(AnalyzerError::Upstream(format!("unexpected status {}", status)))
			}
			_ => (),
		}

		let chat_response: ChatResponse = response
			.body_json()
			.await
			.map_err(|error| AnalyzerError::MalformedResponse(error.to_string()))?;
		let content = match chat_response.choices.first() {
			Some(choice) => &choice.message.content,
			None => return Err(AnalyzerError::MalformedResponse(String::from("response contained no choices"))),
		};

		let raw = extract_analysis(content)?;
		Ok(ProductAnalysis {
			product_type: raw.product_type,
			key_features: raw.features,
			target_audience: raw.target_audience,
			brand_positioning: raw.brand_positioning,
			simulation_note: None,
		})
	}

	fn mode(&self) -> &'static str {
		"openai"
	}
}

/// Pulls the analysis object out of the model's reply. Replies are usually
/// bare JSON, but the model sometimes wraps the object in markdown fencing
/// or prose; the fallback slices out the outermost braced region.
fn extract_analysis(content: &str) -> Result<RawAnalysis, AnalyzerError> {
	let trimmed = content.trim();
	if let Ok(parsed) = serde_json::from_str(trimmed) {
		return Ok(parsed);
	}

	let start = trimmed
		.find('{')
		.ok_or_else(|| AnalyzerError::MalformedResponse(String::from("no JSON object in response")))?;
	let end = trimmed
		.rfind('}')
		.filter(|end| *end > start)
		.ok_or_else(|| AnalyzerError::MalformedResponse(String::from("no JSON object in response")))?;
	serde_json::from_str(&trimmed[start..=end]).map_err(|error| AnalyzerError::MalformedResponse(error.to_string()))
}

#[derive(Serialize)]
struct ChatRequest<'a> {
	model: &'a str,
	messages: Vec<ChatMessage<'a>>,
	max_tokens: u32,
	temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
	role: &'static str,
	content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
	Text { text: &'a str },
	ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
	url: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
	choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
	message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
	content: String,
}

/// The model's field names, before renaming onto the client-facing shape.
#[derive(Deserialize)]
struct RawAnalysis {
	product_type: String,
	features: Vec<String>,
	target_audience: String,
	brand_positioning: BrandPositioning,
}

#[cfg(test)]
mod tests {
	use super::*;
	use sku_studio_shared::messages::analysis::{BrandStyle, BrandTone};

	const SAMPLE_JSON: &str = r#"{
		"product_type": "Stainless Steel Water Bottle",
		"features": ["Double-wall vacuum insulation", "Leak-proof cap"],
		"target_audience": "Outdoor enthusiasts",
		"brand_positioning": {
			"tone": "premium",
			"style": "minimal",
			"description": "Clean design meets superior performance"
		}
	}"#;

	#[test]
	fn parses_bare_json() {
		let raw = extract_analysis(SAMPLE_JSON).unwrap();
		assert_eq!(raw.product_type, "Stainless Steel Water Bottle");
		assert_eq!(raw.features.len(), 2);
		assert_eq!(raw.brand_positioning.tone, BrandTone::Premium);
		assert_eq!(raw.brand_positioning.style, BrandStyle::Minimal);
	}

	#[test]
	fn parses_fenced_json() {
		let fenced = format!("```json\n{}\n```", SAMPLE_JSON);
		let raw = extract_analysis(&fenced).unwrap();
		assert_eq!(raw.target_audience, "Outdoor enthusiasts");
	}

	#[test]
	fn parses_json_with_surrounding_prose() {
		let wrapped = format!("Here is the analysis you asked for:\n{}\nLet me know if you need more.", SAMPLE_JSON);
		let raw = extract_analysis(&wrapped).unwrap();
		assert_eq!(raw.product_type, "Stainless Steel Water Bottle");
	}

	#[test]
	fn rejects_reply_without_json() {
		assert!(matches!(
			extract_analysis("I cannot analyze this image."),
			Err(AnalyzerError::MalformedResponse(_))
		));
	}

	#[test]
	fn rejects_budget_tone_typos() {
		let bad = SAMPLE_JSON.replace("premium", "luxurious");
		assert!(matches!(extract_analysis(&bad), Err(AnalyzerError::MalformedResponse(_))));
	}
}
