pub mod amenities;
pub mod features;
pub mod intent;
pub mod location;
pub mod normalize;
pub mod price;

pub use amenities::extract_amenities;
pub use features::{
	CountFilter, CountOp, SQM_PER_ACRE, SQM_PER_HECTARE, extract_bathrooms, extract_bedrooms,
	extract_land_size,
};
pub use intent::{SortKey, extract_property_type, extract_purchase_category, extract_sort_hint};
pub use location::{DetectedLocation, extract_location};
pub use normalize::{contains_phrase, normalize};
pub use price::{PriceRange, extract_price};

use haven_config::Lexicon;

/// Everything the extractors recognized in one normalized query.
///
/// Extraction is fail-open: an extractor that finds nothing contributes `None`
/// and the query still runs against whatever the others found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedSignals {
	pub price: Option<PriceRange>,
	pub bedrooms: Option<CountFilter>,
	pub bathrooms: Option<CountFilter>,
	pub land_size_sqm: Option<f64>,
	pub amenities: Vec<String>,
	pub location: Option<DetectedLocation>,
	pub purchase_category: Option<&'static str>,
	pub property_type: Option<String>,
	pub sort: Option<SortKey>,
}

/// Runs every extractor over already-normalized text.
pub fn extract_signals(text: &str, lexicon: &Lexicon) -> ExtractedSignals {
	ExtractedSignals {
		price: extract_price(text),
		bedrooms: extract_bedrooms(text),
		bathrooms: extract_bathrooms(text),
		land_size_sqm: extract_land_size(text),
		amenities: extract_amenities(text, lexicon),
		location: extract_location(text, lexicon),
		purchase_category: extract_purchase_category(text),
		property_type: extract_property_type(text, lexicon),
		sort: extract_sort_hint(text),
	}
}
