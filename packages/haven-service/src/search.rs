mod compile;
mod execute;
mod plan;

pub use plan::{OrderBy, Predicate, QueryPlan, SqlParam, SqlQuery};

use std::str::FromStr;

use haven_domain::{SortKey, extract_signals, normalize};
use haven_storage::models::ListingRow;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{ListingService, Result};

/// Raw query parameters as they arrive on the wire. Numeric fields come in as
/// strings and are parsed leniently; unparsable values count as absent.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchListingsRequest {
	pub search: Option<String>,
	pub purchase_category: Option<String>,
	pub min_price: Option<String>,
	pub max_price: Option<String>,
	pub location: Option<String>,
	pub state: Option<String>,
	pub property_type: Option<String>,
	pub bedrooms: Option<String>,
	pub bathrooms: Option<String>,
	pub land_size: Option<String>,
	pub zoning_type: Option<String>,
	pub title_type: Option<String>,
	pub agency_id: Option<String>,
	pub agent_id: Option<String>,
	pub status: Option<String>,
	#[serde(rename = "sortBy")]
	pub sort_by: Option<String>,
	pub page: Option<String>,
	pub limit: Option<String>,
}

/// Caller identity, resolved upstream of this service.
#[derive(Clone, Copy, Debug, Default)]
pub struct Viewer {
	pub role: Role,
	pub user_id: Option<Uuid>,
	pub agency_id: Option<Uuid>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
	#[default]
	Guest,
	Client,
	Agent,
	AgencyAdmin,
}
impl Role {
	/// Unknown roles get the most restrictive visibility.
	pub fn parse(raw: &str) -> Self {
		match raw.trim() {
			"client" => Self::Client,
			"agent" => Self::Agent,
			"agency_admin" => Self::AgencyAdmin,
			_ => Self::Guest,
		}
	}
}

/// Typed view of the explicit filters in a request.
#[derive(Clone, Debug, Default)]
pub struct ExplicitFilters {
	pub purchase_category: Option<String>,
	pub min_price: Option<f64>,
	pub max_price: Option<f64>,
	pub location: Option<String>,
	pub state: Option<String>,
	pub property_type: Option<String>,
	pub bedrooms: Option<i32>,
	pub bathrooms: Option<i32>,
	pub land_size: Option<f64>,
	pub zoning_type: Option<String>,
	pub title_type: Option<String>,
	pub agency_id: Option<Uuid>,
	pub agent_id: Option<Uuid>,
	pub status: Option<String>,
	pub sort_by: Option<SortKey>,
}
impl ExplicitFilters {
	pub fn from_request(req: &SearchListingsRequest) -> Self {
		Self {
			purchase_category: non_empty(&req.purchase_category),
			min_price: parse_opt(&req.min_price),
			max_price: parse_opt(&req.max_price),
			location: non_empty(&req.location),
			state: non_empty(&req.state),
			property_type: non_empty(&req.property_type),
			bedrooms: parse_opt(&req.bedrooms),
			bathrooms: parse_opt(&req.bathrooms),
			land_size: parse_opt(&req.land_size),
			zoning_type: non_empty(&req.zoning_type),
			title_type: non_empty(&req.title_type),
			agency_id: parse_opt(&req.agency_id),
			agent_id: parse_opt(&req.agent_id),
			status: non_empty(&req.status),
			sort_by: non_empty(&req.sort_by).and_then(|raw| SortKey::parse(&raw)),
		}
	}
}

#[derive(Debug, Serialize)]
pub struct ListingsPage {
	pub listings: Vec<ListingRow>,
	pub total: i64,
	#[serde(rename = "totalPages")]
	pub total_pages: i64,
	#[serde(rename = "currentPage")]
	pub current_page: i64,
}

impl ListingService {
	/// The listings search pipeline: normalize the free text, extract signals,
	/// compile them with the explicit filters into a plan, then run it.
	pub async fn search_listings(
		&self,
		req: &SearchListingsRequest,
		viewer: &Viewer,
	) -> Result<ListingsPage> {
		let lexicon = &self.cfg.search.lexicon;
		let filters = ExplicitFilters::from_request(req);
		let text =
			normalize(req.search.as_deref().unwrap_or_default(), &lexicon.noise_words);
		let signals = extract_signals(&text, lexicon);
		let plan = compile::compile(&filters, &signals, &text, viewer, &self.cfg.search);
		let page = parse_page(&req.page);
		let limit = parse_limit(&req.limit, &self.cfg.search.pagination);

		debug!(
			%text,
			page,
			limit,
			strict = plan.strict.len(),
			or_group = plan.or_group.len(),
			ranked = plan.ranking.is_some(),
			"compiled listings search",
		);

		execute::execute(&self.db, &plan, page, limit).await
	}
}

fn non_empty(raw: &Option<String>) -> Option<String> {
	raw.as_deref().map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
}

fn parse_opt<T>(raw: &Option<String>) -> Option<T>
where
	T: FromStr,
{
	raw.as_deref().and_then(|value| value.trim().parse().ok())
}

fn parse_page(raw: &Option<String>) -> i64 {
	parse_opt::<i64>(raw).filter(|page| *page >= 1).unwrap_or(1)
}

fn parse_limit(raw: &Option<String>, cfg: &haven_config::Pagination) -> i64 {
	parse_opt::<i64>(raw)
		.filter(|limit| *limit >= 1)
		.map(|limit| limit.min(i64::from(cfg.max_limit)))
		.unwrap_or(i64::from(cfg.default_limit))
}

#[cfg(test)]
mod tests {
	use haven_config::Pagination;

	use super::*;

	#[test]
	fn page_defaults_and_clamps() {
		assert_eq!(parse_page(&None), 1);
		assert_eq!(parse_page(&Some("abc".to_string())), 1);
		assert_eq!(parse_page(&Some("0".to_string())), 1);
		assert_eq!(parse_page(&Some("-3".to_string())), 1);
		assert_eq!(parse_page(&Some("7".to_string())), 7);
	}

	#[test]
	fn limit_defaults_and_caps() {
		let cfg = Pagination::default();

		assert_eq!(parse_limit(&None, &cfg), 10);
		assert_eq!(parse_limit(&Some("abc".to_string()), &cfg), 10);
		assert_eq!(parse_limit(&Some("0".to_string()), &cfg), 10);
		assert_eq!(parse_limit(&Some("25".to_string()), &cfg), 25);
		assert_eq!(parse_limit(&Some("9999".to_string()), &cfg), 100);
	}

	#[test]
	fn filters_parse_leniently() {
		let req = SearchListingsRequest {
			min_price: Some("1000000".to_string()),
			max_price: Some("not a number".to_string()),
			bedrooms: Some(" 3 ".to_string()),
			agency_id: Some("not-a-uuid".to_string()),
			sort_by: Some("price_asc".to_string()),
			status: Some("  ".to_string()),
			..Default::default()
		};
		let filters = ExplicitFilters::from_request(&req);

		assert_eq!(filters.min_price, Some(1_000_000.0));
		assert_eq!(filters.max_price, None);
		assert_eq!(filters.bedrooms, Some(3));
		assert_eq!(filters.agency_id, None);
		assert_eq!(filters.sort_by, Some(SortKey::PriceAsc));
		assert_eq!(filters.status, None);
	}

	#[test]
	fn page_envelope_uses_camel_case_keys() {
		let page = ListingsPage { listings: Vec::new(), total: 25, total_pages: 3, current_page: 1 };
		let json = serde_json::to_value(&page).unwrap();

		assert_eq!(json["totalPages"], 3);
		assert_eq!(json["currentPage"], 1);
		assert_eq!(json["total"], 25);
	}

	#[test]
	fn unknown_role_is_guest() {
		assert_eq!(Role::parse("superuser"), Role::Guest);
		assert_eq!(Role::parse("agency_admin"), Role::AgencyAdmin);
	}
}
