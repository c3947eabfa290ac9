use regex::Regex;

/// Price signal pulled out of free text, in Naira.
///
/// `min`/`max` come from range or comparison phrasing; `value` is a standalone
/// large number the compiler treats as a ceiling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceRange {
	pub min: Option<f64>,
	pub max: Option<f64>,
	pub value: Option<f64>,
}

// A bare number below this is more likely a count than a Naira price.
const STANDALONE_MIN: f64 = 1_000_000.0;

const AMOUNT: &str = r"(\d+(?:\.\d+)?)\s*(million|thousand|m|k)?\b";

/// Recognizes "between X and Y", "X to Y", "under/below/< X", "over/above/> X",
/// and standalone large numbers. Returns `None` when nothing price-like is
/// present; never errors.
pub fn extract_price(text: &str) -> Option<PriceRange> {
	if text.is_empty() {
		return None;
	}
	if let Some(range) = match_pair(text, &format!(r"\bbetween\s+{AMOUNT}\s+and\s+{AMOUNT}")) {
		return Some(range);
	}
	if let Some(range) = match_pair(text, &format!(r"\b{AMOUNT}\s+to\s+{AMOUNT}")) {
		return Some(range);
	}

	let ceiling = format!(r"(?:\bunder|\bbelow|\bless\s+than|\bat\s+most|\bup\s+to|<=?)\s*{AMOUNT}");

	if let Some(amount) = match_single(text, &ceiling) {
		return Some(PriceRange { max: Some(amount), ..Default::default() });
	}

	let floor = format!(r"(?:\bover|\babove|\bmore\s+than|\bat\s+least|>=?)\s*{AMOUNT}");

	if let Some(amount) = match_single(text, &floor) {
		return Some(PriceRange { min: Some(amount), ..Default::default() });
	}

	standalone_ceiling(text)
}

fn match_pair(text: &str, pattern: &str) -> Option<PriceRange> {
	let re = Regex::new(pattern).ok()?;
	let caps = re.captures(text)?;
	let end = caps.get(0)?.end();

	if followed_by_unit(text, end) {
		return None;
	}

	let min = parse_amount(caps.get(1)?.as_str(), caps.get(2).map(|m| m.as_str()))?;
	let max = parse_amount(caps.get(3)?.as_str(), caps.get(4).map(|m| m.as_str()))?;

	Some(PriceRange { min: Some(min.min(max)), max: Some(min.max(max)), value: None })
}

fn match_single(text: &str, pattern: &str) -> Option<f64> {
	let re = Regex::new(pattern).ok()?;
	let caps = re.captures(text)?;
	let end = caps.get(0)?.end();

	if followed_by_unit(text, end) {
		return None;
	}

	parse_amount(caps.get(1)?.as_str(), caps.get(2).map(|m| m.as_str()))
}

fn standalone_ceiling(text: &str) -> Option<PriceRange> {
	let re = Regex::new(AMOUNT).ok()?;
	let mut best: Option<f64> = None;

	for caps in re.captures_iter(text) {
		let Some(whole) = caps.get(0) else {
			continue;
		};

		if followed_by_unit(text, whole.end()) {
			continue;
		}

		let Some(amount) = parse_amount(&caps[1], caps.get(2).map(|m| m.as_str())) else {
			continue;
		};

		if amount >= STANDALONE_MIN && best.map(|current| amount > current).unwrap_or(true) {
			best = Some(amount);
		}
	}

	best.map(|value| PriceRange { value: Some(value), ..Default::default() })
}

// A number glued to a bed/bath count or a land unit is not a price.
fn followed_by_unit(text: &str, end: usize) -> bool {
	let Some(token) = text.get(end..).and_then(|rest| rest.split_whitespace().next()) else {
		return false;
	};

	token.starts_with("bed")
		|| token.starts_with("bath")
		|| token == "br"
		|| token == "sqm"
		|| token == "m2"
		|| token == "square"
		|| token.starts_with("acre")
		|| token.starts_with("hectare")
		|| token == "ha"
}

fn parse_amount(number: &str, multiplier: Option<&str>) -> Option<f64> {
	let base: f64 = number.parse().ok()?;
	let factor = match multiplier {
		Some("m") | Some("million") => 1_000_000.0,
		Some("k") | Some("thousand") => 1_000.0,
		_ => 1.0,
	};

	Some(base * factor)
}
