// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::json_response;
use crate::analyzer::ProductAnalyzer;
use crate::config::ConfigDocument;
use async_std::sync::Arc;
use chrono::Utc;
use serde::Serialize;
use tide::Request;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DebugInfo {
	success: bool,
	timestamp: String,
	version: &'static str,
	analyzer_mode: &'static str,
	has_api_key: bool,
	api_key_prefix: String,
	listen_host: String,
	listen_port: u16,
	assets_dir: String,
}

/// GET /api/debug
///
/// Deployment introspection for troubleshooting: which analyzer is active,
/// whether a key is configured (only a masked prefix is ever echoed), and
/// the effective listen/assets settings.
pub async fn debug_info(
	_request: Request<()>,
	config: Arc<ConfigDocument>,
	analyzer: Arc<dyn ProductAnalyzer>,
) -> tide::Result {
	let api_key = config.openai.as_ref().and_then(|openai| openai.key.as_deref());
	let api_key_prefix = match api_key {
		Some(key) => format!("{}...", key.chars().take(7).collect::<String>()),
		None => String::from("NOT_SET"),
	};

	json_response(&DebugInfo {
		success: true,
		timestamp: Utc::now().to_rfc3339(),
		version: env!("CARGO_PKG_VERSION"),
		analyzer_mode: analyzer.mode(),
		has_api_key: api_key.is_some(),
		api_key_prefix,
		listen_host: config.listen_host().to_string(),
		listen_port: config.listen_port(),
		assets_dir: config.assets_dir().to_string(),
	})
}
