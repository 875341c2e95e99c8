// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::json_response;
use rand::{thread_rng, Rng};
use sku_studio_shared::messages::session::AdSession;
use tide::Request;

/// POST /api/session
///
/// Issues a fresh ad session: a new id and a layout seed, with every
/// pipeline stage still empty. Clients thread this value through analyze,
/// copy and compose calls; requesting another session is how "generate new
/// ad" gets a different layout.
pub async fn create_session(_request: Request<()>) -> tide::Result {
	let session = AdSession::new(cuid2::create_id(), thread_rng().gen());
	tide::log::info!("Created ad session {}", session.id);
	json_response(&session)
}
