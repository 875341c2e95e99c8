// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::analyzer::ProductAnalyzer;
use crate::config::ConfigDocument;
use async_std::sync::Arc;
use http_types::mime;
use serde::Serialize;
use tide::{Response, Server, StatusCode};

mod analyze;
use analyze::analyze;

mod compose;
use compose::compose;

mod copy;
use copy::generate_copy;

mod debug;
use debug::debug_info;

mod session;
use session::create_session;

pub fn add_routes(
	app: &mut Server<()>,
	config: Arc<ConfigDocument>,
	analyzer: Arc<dyn ProductAnalyzer>,
) -> miette::Result<()> {
	app.at("/api/session").post(create_session);
	app.at("/api/analyze").post({
		let analyzer = Arc::clone(&analyzer);
		move |request| analyze(request, Arc::clone(&analyzer))
	});
	app.at("/api/copy").post(generate_copy);
	app.at("/api/compose").post(compose);
	app.at("/api/debug").get({
		let config = Arc::clone(&config);
		let analyzer = Arc::clone(&analyzer);
		move |request| debug_info(request, Arc::clone(&config), Arc::clone(&analyzer))
	});

	Ok(())
}

fn json_response<T: Serialize>(value: &T) -> tide::Result {
	match serde_json::to_string(value) {
		Ok(data) => Ok(Response::builder(StatusCode::Ok)
			.body(data)
			.content_type(mime::JSON)
			.build()),
		Err(_) => Err(tide::Error::new(
			StatusCode::InternalServerError,
			anyhow::Error::msg("Failed to generate response"),
		)),
	}
}
