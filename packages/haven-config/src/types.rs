use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Search {
	pub pagination: Pagination,
	pub ranking: Ranking,
	pub lexicon: Lexicon,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Pagination {
	pub default_limit: u32,
	pub max_limit: u32,
}
impl Default for Pagination {
	fn default() -> Self {
		Self { default_limit: 10, max_limit: 100 }
	}
}

/// Ranking constants. The similarity threshold and city bonus reproduce the
/// marketplace's tuned values; treat them as tuning parameters, not fixed law.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub similarity_threshold: f32,
	pub city_bonus: f32,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { similarity_threshold: 0.25, city_bonus: 2.0 }
	}
}

/// Vocabulary the free-text extractors work from. Every list ships with a
/// built-in Nigerian-market default so a minimal config file is enough to run,
/// and tests can substitute small fixtures.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Lexicon {
	pub noise_words: Vec<String>,
	pub amenities: Vec<String>,
	/// Ordered; the first synonym found in the text wins.
	pub property_synonyms: Vec<PropertySynonym>,
	/// Ordered; longer names are matched before shorter ones at load time.
	pub cities: Vec<CityState>,
	pub states: Vec<String>,
}
impl Default for Lexicon {
	fn default() -> Self {
		Self {
			noise_words: default_noise_words(),
			amenities: default_amenities(),
			property_synonyms: default_property_synonyms(),
			cities: default_cities(),
			states: default_states(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct PropertySynonym {
	pub term: String,
	pub canonical: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CityState {
	pub city: String,
	pub state: String,
}

fn default_noise_words() -> Vec<String> {
	[
		"a", "an", "the", "i", "we", "me", "my", "am", "is", "are", "in", "at", "on", "of",
		"with", "near", "nearby", "around", "please", "want", "need", "looking", "find", "show",
		"that", "this", "some", "any", "very", "nice",
	]
	.into_iter()
	.map(str::to_string)
	.collect()
}

fn default_amenities() -> Vec<String> {
	[
		"swimming pool",
		"pool",
		"gym",
		"parking",
		"garage",
		"garden",
		"balcony",
		"security",
		"borehole",
		"generator",
		"solar",
		"air conditioning",
		"furnished",
		"serviced",
		"gated",
		"cctv",
		"elevator",
		"wifi",
		"water heater",
		"boys quarters",
		"fitted kitchen",
	]
	.into_iter()
	.map(str::to_string)
	.collect()
}

fn default_property_synonyms() -> Vec<PropertySynonym> {
	[
		("self contain", "Self-Contain"),
		("selfcontain", "Self-Contain"),
		("studio", "Self-Contain"),
		("flat", "Apartment"),
		("apartment", "Apartment"),
		("semi detached", "Semi-Detached House"),
		("detached", "Detached House"),
		("terrace", "Terraced House"),
		("townhouse", "Terraced House"),
		("duplex", "Duplex"),
		("bungalow", "Bungalow"),
		("mansion", "Mansion"),
		("penthouse", "Penthouse"),
		("warehouse", "Warehouse"),
		("shop", "Shop"),
		("office", "Office"),
		("plot", "Land"),
		("land", "Land"),
	]
	.into_iter()
	.map(|(term, canonical)| PropertySynonym {
		term: term.to_string(),
		canonical: canonical.to_string(),
	})
	.collect()
}

fn default_cities() -> Vec<CityState> {
	[
		("victoria island", "Lagos"),
		("benin city", "Edo"),
		("port harcourt", "Rivers"),
		("ado ekiti", "Ekiti"),
		("birnin kebbi", "Kebbi"),
		("lekki", "Lagos"),
		("ikeja", "Lagos"),
		("ikoyi", "Lagos"),
		("yaba", "Lagos"),
		("surulere", "Lagos"),
		("ajah", "Lagos"),
		("ikorodu", "Lagos"),
		("badagry", "Lagos"),
		("epe", "Lagos"),
		("magodo", "Lagos"),
		("gbagada", "Lagos"),
		("festac", "Lagos"),
		("abuja", "FCT"),
		("garki", "FCT"),
		("wuse", "FCT"),
		("maitama", "FCT"),
		("asokoro", "FCT"),
		("gwarinpa", "FCT"),
		("lugbe", "FCT"),
		("ibadan", "Oyo"),
		("enugu", "Enugu"),
		("nsukka", "Enugu"),
		("abeokuta", "Ogun"),
		("uyo", "Akwa Ibom"),
		("calabar", "Cross River"),
		("owerri", "Imo"),
		("warri", "Delta"),
		("asaba", "Delta"),
		("jos", "Plateau"),
		("kaduna", "Kaduna"),
		("kano", "Kano"),
		("ilorin", "Kwara"),
		("abakaliki", "Ebonyi"),
		("awka", "Anambra"),
		("onitsha", "Anambra"),
		("makurdi", "Benue"),
		("minna", "Niger"),
		("sokoto", "Sokoto"),
		("maiduguri", "Borno"),
		("osogbo", "Osun"),
		("akure", "Ondo"),
		("lokoja", "Kogi"),
		("yola", "Adamawa"),
		("bauchi", "Bauchi"),
		("gombe", "Gombe"),
		("jalingo", "Taraba"),
		("damaturu", "Yobe"),
		("katsina", "Katsina"),
		("dutse", "Jigawa"),
		("gusau", "Zamfara"),
		("lafia", "Nasarawa"),
		("umuahia", "Abia"),
		("aba", "Abia"),
		("yenagoa", "Bayelsa"),
	]
	.into_iter()
	.map(|(city, state)| CityState { city: city.to_string(), state: state.to_string() })
	.collect()
}

fn default_states() -> Vec<String> {
	[
		"Abia",
		"Adamawa",
		"Akwa Ibom",
		"Anambra",
		"Bauchi",
		"Bayelsa",
		"Benue",
		"Borno",
		"Cross River",
		"Delta",
		"Ebonyi",
		"Edo",
		"Ekiti",
		"Enugu",
		"Gombe",
		"Imo",
		"Jigawa",
		"Kaduna",
		"Kano",
		"Katsina",
		"Kebbi",
		"Kogi",
		"Kwara",
		"Lagos",
		"Nasarawa",
		"Niger",
		"Ogun",
		"Ondo",
		"Osun",
		"Oyo",
		"Plateau",
		"Rivers",
		"Sokoto",
		"Taraba",
		"Yobe",
		"Zamfara",
		"FCT",
	]
	.into_iter()
	.map(str::to_string)
	.collect()
}
