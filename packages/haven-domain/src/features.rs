use regex::Regex;

pub const SQM_PER_ACRE: f64 = 4_046.856_422_4;
pub const SQM_PER_HECTARE: f64 = 10_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountOp {
	Eq,
	Gt,
}
impl CountOp {
	pub fn as_sql(self) -> &'static str {
		match self {
			Self::Eq => "=",
			Self::Gt => ">",
		}
	}
}

/// Bedroom or bathroom count with its comparison operator. Exact match unless
/// a ">"-style qualifier (or trailing "+") was present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountFilter {
	pub op: CountOp,
	pub value: i32,
}

pub fn extract_bedrooms(text: &str) -> Option<CountFilter> {
	extract_count(text, r"bed(?:room)?s?|br")
}

pub fn extract_bathrooms(text: &str) -> Option<CountFilter> {
	extract_count(text, r"bath(?:room)?s?")
}

/// Land size with its unit, normalized to square meters.
pub fn extract_land_size(text: &str) -> Option<f64> {
	if text.is_empty() {
		return None;
	}

	let re = Regex::new(
		r"\b(\d+(?:\.\d+)?)\s*(sqm|m2|square\s+met(?:er|re)s?|acres?|hectares?|ha)\b",
	)
	.ok()?;
	let caps = re.captures(text)?;
	let value: f64 = caps[1].parse().ok()?;
	let factor = match &caps[2] {
		unit if unit.starts_with("acre") => SQM_PER_ACRE,
		unit if unit.starts_with("hectare") || unit == "ha" => SQM_PER_HECTARE,
		_ => 1.0,
	};

	Some(value * factor)
}

fn extract_count(text: &str, unit: &str) -> Option<CountFilter> {
	if text.is_empty() {
		return None;
	}

	let re = Regex::new(&format!(
		r"(?:(>)\s*)?(\d{{1,2}}|one|two|three|four|five|six|seven|eight|nine|ten)\s*(\+)?\s*(?:{unit})\b"
	))
	.ok()?;
	let caps = re.captures(text)?;
	let value = parse_count(&caps[2])?;
	let op = if caps.get(1).is_some() || caps.get(3).is_some() { CountOp::Gt } else { CountOp::Eq };

	Some(CountFilter { op, value })
}

fn parse_count(raw: &str) -> Option<i32> {
	match raw {
		"one" => Some(1),
		"two" => Some(2),
		"three" => Some(3),
		"four" => Some(4),
		"five" => Some(5),
		"six" => Some(6),
		"seven" => Some(7),
		"eight" => Some(8),
		"nine" => Some(9),
		"ten" => Some(10),
		digits => digits.parse().ok(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn digit_counts_default_to_exact() {
		assert_eq!(
			extract_bedrooms("3 bedroom flat"),
			Some(CountFilter { op: CountOp::Eq, value: 3 })
		);
		assert_eq!(extract_bathrooms("2 bath"), Some(CountFilter { op: CountOp::Eq, value: 2 }));
	}

	#[test]
	fn number_words_are_understood() {
		assert_eq!(
			extract_bedrooms("three bedrooms duplex"),
			Some(CountFilter { op: CountOp::Eq, value: 3 })
		);
	}

	#[test]
	fn greater_than_qualifiers() {
		assert_eq!(
			extract_bedrooms(">5 bedrooms"),
			Some(CountFilter { op: CountOp::Gt, value: 5 })
		);
		assert_eq!(extract_bedrooms("4+ beds"), Some(CountFilter { op: CountOp::Gt, value: 4 }));
	}

	#[test]
	fn no_count_no_signal() {
		assert_eq!(extract_bedrooms("duplex lekki"), None);
		assert_eq!(extract_bathrooms(""), None);
	}

	#[test]
	fn land_units_convert_exactly() {
		let sqm = extract_land_size("2 acres fenced").expect("acres must convert");

		assert!((sqm - 8_093.712_844_8).abs() < 1e-6);
		assert_eq!(extract_land_size("1 hectare"), Some(10_000.0));
		assert_eq!(extract_land_size("450 sqm"), Some(450.0));
		assert_eq!(extract_land_size("450 m2"), Some(450.0));
		assert_eq!(extract_land_size("no units here"), None);
	}
}
