// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_std::sync::Arc;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::Path;
use tide::http::headers::HeaderValue;
use tide::security::{CorsMiddleware, Origin};

mod analyzer;
use analyzer::build_analyzer;

mod api;

mod args;
use args::CliArgs;

mod composer;

mod config;
use config::parse_config;

mod copywriter;

#[async_std::main]
async fn main() -> Result<()> {
	let args = CliArgs::parse();
	let config = Arc::new(parse_config(&args.config)?);

	tide::log::start();

	let analyzer = build_analyzer(&config)?;
	tide::log::info!("Product analyzer mode: {}", analyzer.mode());

	let mut app = tide::new();

	let cors = CorsMiddleware::new()
		.allow_methods(
			"GET, POST, OPTIONS"
				.parse::<HeaderValue>()
				.map_err(|error| miette::miette!("{}", error))?,
		)
		.allow_headers(
			"Content-Type"
				.parse::<HeaderValue>()
				.map_err(|error| miette::miette!("{}", error))?,
		)
		.allow_origin(Origin::from("*"));
	app.with(cors);

	api::add_routes(&mut app, Arc::clone(&config), analyzer)?;

	let assets_dir = config.assets_dir();
	let assets_path = Path::new(assets_dir);
	if assets_path.is_dir() {
		let index_path = assets_path.join("index.html");
		if index_path.is_file() {
			app.at("/").serve_file(&index_path).into_diagnostic()?;
		}
		app.at("/").serve_dir(assets_dir).into_diagnostic()?;
	} else {
		tide::log::warn!("Assets directory {} not found; serving the API only", assets_dir);
	}

	let listen_address = format!("{}:{}", config.listen_host(), config.listen_port());
	tide::log::info!("Listening on {}", listen_address);
	app.listen(listen_address).await.into_diagnostic()?;
	Ok(())
}
