// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rgb::RGB8;
use std::error::Error;
use std::fmt;
use std::str::Chars;

pub const WHITE: RGB8 = RGB8::new(255, 255, 255);
pub const BLACK: RGB8 = RGB8::new(0, 0, 0);

#[derive(Debug, Eq, PartialEq)]
pub enum RgbColorError {
	InvalidLength,
	InvalidDigit(char),
}

impl fmt::Display for RgbColorError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidLength => write!(f, "color value is an invalid length"),
			Self::InvalidDigit(digit) => write!(f, "color value contains a non-hexadecimal digit: {}", digit),
		}
	}
}

impl Error for RgbColorError {}

/// Converts a color from a #abcdef string to an RGB8.
///
/// The leading `#` is optional, and the six hex digits may be in either case.
/// Anything else (wrong length, non-hex characters) is an error; a failed
/// parse is never collapsed into a default color, so callers surface bad
/// input instead of rendering with a fabricated value.
pub fn color_from_rgb_str(color_str: &str) -> Result<RGB8, RgbColorError> {
	let color_str = color_str.strip_prefix('#').unwrap_or(color_str);

	let mut color_chars = color_str.chars();
	let red = color_channel(&mut color_chars)?;
	let green = color_channel(&mut color_chars)?;
	let blue = color_channel(&mut color_chars)?;
	if color_chars.next().is_some() {
		return Err(RgbColorError::InvalidLength);
	}

	Ok(RGB8::new(red, green, blue))
}

fn color_channel(color_chars: &mut Chars<'_>) -> Result<u8, RgbColorError> {
	let high = color_digit(color_chars)?;
	let low = color_digit(color_chars)?;
	Ok(high * 16 + low)
}

fn color_digit(color_chars: &mut Chars<'_>) -> Result<u8, RgbColorError> {
	let digit_char = match color_chars.next() {
		Some(c) => c,
		None => return Err(RgbColorError::InvalidLength),
	};
	match digit_char.to_digit(16) {
		Some(digit) => Ok(digit as u8),
		None => Err(RgbColorError::InvalidDigit(digit_char)),
	}
}

/// Converts a color to its #abcdef string form, always seven characters with
/// lower-case digits.
pub fn rgb_str_from_color(color: RGB8) -> String {
	format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Computes the WCAG 2.1 relative luminance of a color.
///
/// Channels are normalized to [0, 1], linearized with the sRGB transfer
/// curve, and combined with the standard perceptual weights. Pure black is
/// 0.0 and pure white is 1.0.
pub fn relative_luminance(color: RGB8) -> f64 {
	let red = linear_channel(color.r);
	let green = linear_channel(color.g);
	let blue = linear_channel(color.b);
	0.2126 * red + 0.7152 * green + 0.0722 * blue
}

fn linear_channel(channel: u8) -> f64 {
	let channel = f64::from(channel) / 255.0;
	if channel <= 0.03928 {
		channel / 12.92
	} else {
		((channel + 0.055) / 1.055).powf(2.4)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
		(a - b).abs() < eps
	}

	#[test]
	fn parses_with_and_without_hash() {
		assert_eq!(color_from_rgb_str("#f8f9fa"), Ok(RGB8::new(248, 249, 250)));
		assert_eq!(color_from_rgb_str("f8f9fa"), Ok(RGB8::new(248, 249, 250)));
	}

	#[test]
	fn parses_either_case() {
		assert_eq!(color_from_rgb_str("#ECF0F1"), color_from_rgb_str("#ecf0f1"));
	}

	#[test]
	fn rejects_wrong_length() {
		assert_eq!(color_from_rgb_str("#fff"), Err(RgbColorError::InvalidLength));
		assert_eq!(color_from_rgb_str("#f8f9fa00"), Err(RgbColorError::InvalidLength));
		assert_eq!(color_from_rgb_str(""), Err(RgbColorError::InvalidLength));
	}

	#[test]
	fn rejects_non_hex_characters() {
		assert_eq!(color_from_rgb_str("not-a-color"), Err(RgbColorError::InvalidDigit('n')));
		assert_eq!(color_from_rgb_str("#ff00zz"), Err(RgbColorError::InvalidDigit('z')));
		// A sign character is accepted by integer parsing but is not a hex digit.
		assert_eq!(color_from_rgb_str("#+1+1+1"), Err(RgbColorError::InvalidDigit('+')));
	}

	#[test]
	fn round_trips_valid_strings() {
		for color_str in ["#000000", "#ffffff", "#1a2b3c", "#F8F9FA", "#e8f5e8", "#808080"] {
			let color = color_from_rgb_str(color_str).unwrap();
			assert_eq!(rgb_str_from_color(color), color_str.to_lowercase());
		}
	}

	#[test]
	fn formats_with_zero_padding() {
		assert_eq!(rgb_str_from_color(RGB8::new(0, 7, 15)), "#00070f");
	}

	#[test]
	fn luminance_endpoints() {
		assert!(approx_eq(relative_luminance(BLACK), 0.0, 1e-6));
		assert!(approx_eq(relative_luminance(WHITE), 1.0, 1e-6));
	}

	#[test]
	fn luminance_in_range_for_primaries() {
		for color in [
			RGB8::new(255, 0, 0),
			RGB8::new(0, 255, 0),
			RGB8::new(0, 0, 255),
			RGB8::new(128, 128, 128),
			RGB8::new(248, 249, 250),
		] {
			let luminance = relative_luminance(color);
			assert!((0.0..=1.0).contains(&luminance), "luminance out of range: {}", luminance);
		}
	}

	#[test]
	fn luminance_uses_perceptual_weights() {
		assert!(approx_eq(relative_luminance(RGB8::new(255, 0, 0)), 0.2126, 1e-3));
		assert!(approx_eq(relative_luminance(RGB8::new(0, 255, 0)), 0.7152, 1e-3));
		assert!(approx_eq(relative_luminance(RGB8::new(0, 0, 255)), 0.0722, 1e-3));
	}
}
