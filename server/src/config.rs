// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use knuffel::Decode;
use miette::{IntoDiagnostic, Result};
use std::fs;

#[derive(Debug, Decode)]
pub struct ConfigDocument {
	#[knuffel(child)]
	pub listen: Option<Listen>,
	#[knuffel(child, unwrap(argument))]
	pub assets: Option<String>,
	/// Product analyzer mode: "simulated" (no external calls) or "openai".
	#[knuffel(child, unwrap(argument))]
	pub analyzer: Option<String>,
	#[knuffel(child)]
	pub openai: Option<OpenAiConfig>,
}

#[derive(Debug, Decode)]
pub struct Listen {
	#[knuffel(argument)]
	pub host: String,
	#[knuffel(property)]
	pub port: Option<u16>,
}

#[derive(Debug, Decode)]
pub struct OpenAiConfig {
	#[knuffel(property)]
	pub key: Option<String>,
	#[knuffel(property)]
	pub model: Option<String>,
	#[knuffel(property)]
	pub endpoint: Option<String>,
}

impl ConfigDocument {
	pub fn listen_host(&self) -> &str {
		match &self.listen {
			Some(listen) => &listen.host,
			None => "127.0.0.1",
		}
	}

	pub fn listen_port(&self) -> u16 {
		self.listen.as_ref().and_then(|listen| listen.port).unwrap_or(8080)
	}

	pub fn assets_dir(&self) -> &str {
		self.assets.as_deref().unwrap_or("static")
	}
}

pub fn parse_config(config_path: &str) -> Result<ConfigDocument> {
	let config_file_contents = fs::read_to_string(config_path).into_diagnostic()?;
	let config = knuffel::parse(config_path, &config_file_contents).into_diagnostic()?;
	Ok(config)
}
