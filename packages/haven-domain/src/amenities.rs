use haven_config::Lexicon;

use crate::normalize::contains_phrase;

/// Collects every configured amenity keyword present in the text. Overlapping
/// matches ("pool" inside "swimming pool") are all kept; each term becomes its
/// own ILIKE fragment downstream.
pub fn extract_amenities(text: &str, lexicon: &Lexicon) -> Vec<String> {
	if text.is_empty() {
		return Vec::new();
	}

	lexicon
		.amenities
		.iter()
		.filter(|keyword| contains_phrase(text, keyword))
		.cloned()
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lexicon() -> Lexicon {
		Lexicon {
			amenities: ["swimming pool", "pool", "gym", "borehole"]
				.into_iter()
				.map(str::to_string)
				.collect(),
			..Default::default()
		}
	}

	#[test]
	fn collects_all_matches() {
		let found = extract_amenities("duplex swimming pool gym", &lexicon());

		assert_eq!(found, vec!["swimming pool".to_string(), "pool".to_string(), "gym".to_string()]);
	}

	#[test]
	fn empty_when_nothing_matches() {
		assert!(extract_amenities("3 bedroom flat", &lexicon()).is_empty());
		assert!(extract_amenities("", &lexicon()).is_empty());
	}

	#[test]
	fn respects_word_boundaries() {
		assert!(extract_amenities("carpool lane", &lexicon()).is_empty());
	}
}
