use haven_config::Lexicon;
use regex::Regex;

use crate::normalize::contains_phrase;

/// Sort orders shared by the explicit `sort_by` parameter and free-text sort
/// qualifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
	PriceAsc,
	PriceDesc,
	DateAsc,
	DateDesc,
}
impl SortKey {
	/// Lenient: unknown values are no signal, not an error.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"price_asc" => Some(Self::PriceAsc),
			"price_desc" => Some(Self::PriceDesc),
			"date_asc" => Some(Self::DateAsc),
			"date_desc" => Some(Self::DateDesc),
			_ => None,
		}
	}
}

/// Maps let/lease/rent/rental/sale/buy (optionally preceded by "for") to the
/// two canonical purchase categories. First match wins.
pub fn extract_purchase_category(text: &str) -> Option<&'static str> {
	if text.is_empty() {
		return None;
	}

	let re = Regex::new(r"\b(?:for\s+)?(let|lease|rent|rental|sale|buy)\b").ok()?;
	let caps = re.captures(text)?;

	match &caps[1] {
		"let" | "lease" | "rent" | "rental" => Some("Rent"),
		_ => Some("Sale"),
	}
}

/// First configured synonym found in the text wins; the synonym table is
/// ordered so longer phrases ("semi detached") come before their suffixes.
pub fn extract_property_type(text: &str, lexicon: &Lexicon) -> Option<String> {
	if text.is_empty() {
		return None;
	}

	lexicon
		.property_synonyms
		.iter()
		.find(|synonym| contains_phrase(text, &synonym.term))
		.map(|synonym| synonym.canonical.clone())
}

/// Ordering intent expressed in prose ("cheapest", "newest").
pub fn extract_sort_hint(text: &str) -> Option<SortKey> {
	if text.is_empty() {
		return None;
	}

	let table: [(&str, SortKey); 12] = [
		("cheapest", SortKey::PriceAsc),
		("cheap", SortKey::PriceAsc),
		("lowest price", SortKey::PriceAsc),
		("low to high", SortKey::PriceAsc),
		("affordable", SortKey::PriceAsc),
		("most expensive", SortKey::PriceDesc),
		("highest price", SortKey::PriceDesc),
		("high to low", SortKey::PriceDesc),
		("newest", SortKey::DateDesc),
		("latest", SortKey::DateDesc),
		("most recent", SortKey::DateDesc),
		("oldest", SortKey::DateAsc),
	];

	table
		.into_iter()
		.find(|(phrase, _)| contains_phrase(text, phrase))
		.map(|(_, key)| key)
}

#[cfg(test)]
mod tests {
	use haven_config::PropertySynonym;

	use super::*;

	fn lexicon() -> Lexicon {
		Lexicon {
			property_synonyms: vec![
				PropertySynonym {
					term: "semi detached".to_string(),
					canonical: "Semi-Detached House".to_string(),
				},
				PropertySynonym { term: "detached".to_string(), canonical: "Detached House".to_string() },
				PropertySynonym { term: "flat".to_string(), canonical: "Apartment".to_string() },
			],
			..Default::default()
		}
	}

	#[test]
	fn rent_phrasings_map_to_rent() {
		for text in ["for rent", "rent lekki", "flat to let", "for lease", "rental"] {
			assert_eq!(extract_purchase_category(text), Some("Rent"), "failed for {text:?}");
		}
	}

	#[test]
	fn sale_phrasings_map_to_sale() {
		assert_eq!(extract_purchase_category("duplex for sale"), Some("Sale"));
		assert_eq!(extract_purchase_category("buy land"), Some("Sale"));
	}

	#[test]
	fn first_intent_wins() {
		assert_eq!(extract_purchase_category("rent or buy"), Some("Rent"));
	}

	#[test]
	fn no_intent_no_signal() {
		assert_eq!(extract_purchase_category("3 bedroom flat"), None);
		assert_eq!(extract_purchase_category(""), None);
	}

	#[test]
	fn synonym_lookup_is_ordered() {
		assert_eq!(extract_property_type("flat lekki", &lexicon()), Some("Apartment".to_string()));
		assert_eq!(
			extract_property_type("semi detached house", &lexicon()),
			Some("Semi-Detached House".to_string())
		);
		assert_eq!(extract_property_type("mansion", &lexicon()), None);
	}

	#[test]
	fn sort_hints() {
		assert_eq!(extract_sort_hint("cheapest flat"), Some(SortKey::PriceAsc));
		assert_eq!(extract_sort_hint("newest listings lekki"), Some(SortKey::DateDesc));
		assert_eq!(extract_sort_hint("oldest first"), Some(SortKey::DateAsc));
		assert_eq!(extract_sort_hint("3 bedroom flat"), None);
	}

	#[test]
	fn sort_by_values_parse_leniently() {
		assert_eq!(SortKey::parse("price_asc"), Some(SortKey::PriceAsc));
		assert_eq!(SortKey::parse("sideways"), None);
	}
}
