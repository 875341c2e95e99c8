// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::analysis::ProductAnalysis;
use serde::{Deserialize, Serialize};

/// One generated headline/subhead pairing the user can pick for the ad.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CopyOption {
	pub id: String,
	pub headline: String,
	pub subhead: String,
	pub tone: String,
	pub confidence: u8,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CopyRequest {
	pub analysis: ProductAnalysis,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyResponse {
	pub success: bool,
	pub copy_options: Vec<CopyOption>,
}
