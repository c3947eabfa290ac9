use haven_config::Lexicon;

use crate::normalize::contains_phrase;

/// Location detected in free text. A city match carries its mapped state; a
/// bare state match carries only the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectedLocation {
	pub city: Option<String>,
	pub state: String,
}

/// City lookup first (the table is ordered longest-name-first at config load),
/// falling back to a scan of state names.
pub fn extract_location(text: &str, lexicon: &Lexicon) -> Option<DetectedLocation> {
	if text.is_empty() {
		return None;
	}

	for entry in &lexicon.cities {
		if contains_phrase(text, &entry.city) {
			return Some(DetectedLocation {
				city: Some(entry.city.clone()),
				state: entry.state.clone(),
			});
		}
	}

	for state in &lexicon.states {
		if contains_phrase(text, &state.to_lowercase()) {
			return Some(DetectedLocation { city: None, state: state.clone() });
		}
	}

	None
}
