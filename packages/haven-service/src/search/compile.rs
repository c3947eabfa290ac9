use haven_config::Search;
use haven_domain::{CountFilter, CountOp, ExtractedSignals, SortKey};

use crate::search::{
	ExplicitFilters, Role, Viewer,
	plan::{OrderBy, Predicate, QueryPlan, SqlParam},
};

// Statuses visible to everyone regardless of ownership.
const PUBLIC_STATUSES: [&str; 3] = ["available", "sold", "under offer"];

/// Merges explicit filters with text-derived signals into a query plan.
/// Explicit filters win field by field; text-derived numeric constraints stay
/// strict while amenity, location, and full-text signals collapse into one
/// OR-group.
pub fn compile(
	filters: &ExplicitFilters,
	signals: &ExtractedSignals,
	text: &str,
	viewer: &Viewer,
	cfg: &Search,
) -> QueryPlan {
	let mut plan = QueryPlan::default();

	push_visibility(&mut plan, filters, viewer);

	let property_type = filters.property_type.clone().or_else(|| signals.property_type.clone());
	let bedrooms = filters
		.bedrooms
		.map(|value| CountFilter { op: CountOp::Eq, value })
		.or(signals.bedrooms);
	let bathrooms = filters
		.bathrooms
		.map(|value| CountFilter { op: CountOp::Eq, value })
		.or(signals.bathrooms);
	let is_land = property_type.as_deref() == Some("Land");

	if let Some(property_type) = &property_type {
		// One-bedroom apartments and self-contains are interchangeable on the
		// Nigerian market, so the two types are searched together.
		if property_type == "Apartment"
			&& bedrooms == Some(CountFilter { op: CountOp::Eq, value: 1 })
		{
			plan.strict.push(Predicate::new(
				"l.property_type = ANY({})",
				vec![SqlParam::TextArray(vec!["Apartment".to_string(), "Self-Contain".to_string()])],
			));
		} else {
			plan.strict.push(Predicate::new(
				"l.property_type = {}",
				vec![SqlParam::Text(property_type.clone())],
			));
		}
	}
	if let Some(category) =
		filters.purchase_category.as_deref().or(signals.purchase_category)
	{
		// Callers send "sale" and "Sale" interchangeably.
		plan.strict
			.push(Predicate::new("l.purchase_category ILIKE {}", vec![SqlParam::Text(
				category.to_string(),
			)]));
	}

	push_price(&mut plan, filters, signals);

	// Counts are meaningless for bare land.
	if !is_land {
		push_count(&mut plan, "l.bedrooms", bedrooms);
		push_count(&mut plan, "l.bathrooms", bathrooms);
	}
	if let Some(size) = filters.land_size.or(signals.land_size_sqm) {
		plan.strict.push(Predicate::new("l.land_size >= {}", vec![SqlParam::Float(size)]));
	}
	if let Some(zoning) = &filters.zoning_type {
		plan.strict
			.push(Predicate::new("l.zoning_type = {}", vec![SqlParam::Text(zoning.clone())]));
	}
	if let Some(title_type) = &filters.title_type {
		plan.strict
			.push(Predicate::new("l.title_type = {}", vec![SqlParam::Text(title_type.clone())]));
	}
	if let Some(agency_id) = filters.agency_id {
		plan.strict.push(Predicate::new("l.agency_id = {}", vec![SqlParam::Uuid(agency_id)]));
	}
	if let Some(agent_id) = filters.agent_id {
		plan.strict.push(Predicate::new("l.agent_id = {}", vec![SqlParam::Uuid(agent_id)]));
	}
	if let Some(location) = &filters.location {
		plan.strict.push(Predicate::new("l.location ILIKE {}", vec![SqlParam::Text(format!(
			"%{location}%"
		))]));
	}
	if let Some(state) = &filters.state {
		plan.strict.push(Predicate::new("l.state ILIKE {}", vec![SqlParam::Text(state.clone())]));
	}

	push_search_branch(&mut plan, filters, signals, text, cfg);

	plan.order_by = if plan.ranking.is_some() {
		OrderBy::Rank
	} else {
		match filters.sort_by.or(signals.sort) {
			Some(SortKey::PriceAsc) => OrderBy::PriceAsc,
			Some(SortKey::PriceDesc) => OrderBy::PriceDesc,
			Some(SortKey::DateAsc) => OrderBy::DateAsc,
			Some(SortKey::DateDesc) | None => OrderBy::Default,
		}
	};

	plan
}

fn push_visibility(plan: &mut QueryPlan, filters: &ExplicitFilters, viewer: &Viewer) {
	// An explicit status (other than the "all" escape hatch) replaces the
	// role-based default entirely.
	if let Some(status) = filters.status.as_deref()
		&& status != "all"
	{
		if status == "featured" {
			plan.strict.push(Predicate::new(
				"(l.is_featured AND l.featured_expires_at > now())",
				Vec::new(),
			));
		} else {
			plan.strict
				.push(Predicate::new("l.status = {}", vec![SqlParam::Text(status.to_string())]));
		}

		return;
	}

	let public: Vec<String> = PUBLIC_STATUSES.iter().map(|s| s.to_string()).collect();

	match viewer.role {
		Role::Guest | Role::Client => plan
			.strict
			.push(Predicate::new("l.status = {}", vec![SqlParam::Text("available".to_string())])),
		Role::Agent => match viewer.user_id {
			Some(user_id) => plan.strict.push(Predicate::new(
				"(l.status = ANY({}) OR l.agent_id = {})",
				vec![SqlParam::TextArray(public), SqlParam::Uuid(user_id)],
			)),
			None => plan
				.strict
				.push(Predicate::new("l.status = ANY({})", vec![SqlParam::TextArray(public)])),
		},
		Role::AgencyAdmin => match viewer.agency_id {
			Some(agency_id) => plan.strict.push(Predicate::new(
				"(l.agency_id = {} OR l.status = ANY({}))",
				vec![SqlParam::Uuid(agency_id), SqlParam::TextArray(public)],
			)),
			None => plan
				.strict
				.push(Predicate::new("l.status = ANY({})", vec![SqlParam::TextArray(public)])),
		},
	}
}

fn push_price(plan: &mut QueryPlan, filters: &ExplicitFilters, signals: &ExtractedSignals) {
	if filters.min_price.is_some() || filters.max_price.is_some() {
		if let Some(min) = filters.min_price {
			plan.strict.push(Predicate::new("l.price >= {}", vec![SqlParam::Float(min)]));
		}
		if let Some(max) = filters.max_price {
			plan.strict.push(Predicate::new("l.price <= {}", vec![SqlParam::Float(max)]));
		}

		return;
	}

	let Some(price) = &signals.price else {
		return;
	};

	if let Some(min) = price.min {
		plan.strict.push(Predicate::new("l.price >= {}", vec![SqlParam::Float(min)]));
	}
	if let Some(max) = price.max {
		plan.strict.push(Predicate::new("l.price <= {}", vec![SqlParam::Float(max)]));
	}
	if let Some(value) = price.value {
		plan.strict.push(Predicate::new("l.price <= {}", vec![SqlParam::Float(value)]));
	}
}

fn push_count(plan: &mut QueryPlan, column: &str, filter: Option<CountFilter>) {
	let Some(filter) = filter else {
		return;
	};

	plan.strict.push(Predicate::new(
		format!("{column} {} {{}}", filter.op.as_sql()),
		vec![SqlParam::Int(filter.value as i64)],
	));
}

fn push_search_branch(
	plan: &mut QueryPlan,
	filters: &ExplicitFilters,
	signals: &ExtractedSignals,
	text: &str,
	cfg: &Search,
) {
	if text.is_empty() {
		return;
	}

	for term in &signals.amenities {
		plan.or_group
			.push(Predicate::new("l.amenities ILIKE {}", vec![SqlParam::Text(format!("%{term}%"))]));
	}

	let detected_city = if filters.location.is_none() && filters.state.is_none() {
		if let Some(location) = &signals.location {
			if let Some(city) = &location.city {
				plan.or_group.push(Predicate::new("l.location ILIKE {}", vec![SqlParam::Text(
					format!("%{city}%"),
				)]));
			}

			plan.or_group.push(Predicate::new("l.state ILIKE {}", vec![SqlParam::Text(
				location.state.clone(),
			)]));

			location.city.clone()
		} else {
			None
		}
	} else {
		None
	};

	// tsquery syntax chokes on comparison leftovers like "<5"; only clean
	// word tokens take part in full-text matching.
	let tokens: Vec<&str> = text
		.split_whitespace()
		.filter(|token| token.chars().all(char::is_alphanumeric))
		.collect();

	if tokens.is_empty() {
		return;
	}

	let tsquery = tokens.join(" | ");
	let threshold = f64::from(cfg.ranking.similarity_threshold);

	plan.or_group.push(Predicate::new(
		"(l.search_vector @@ to_tsquery('english', {}) \
		OR similarity(l.title, {}) > {} \
		OR similarity(l.location, {}) > {} \
		OR similarity(l.state, {}) > {} \
		OR similarity(l.description, {}) > {})",
		vec![
			SqlParam::Text(tsquery.clone()),
			SqlParam::Text(text.to_string()),
			SqlParam::Float(threshold),
			SqlParam::Text(text.to_string()),
			SqlParam::Float(threshold),
			SqlParam::Text(text.to_string()),
			SqlParam::Float(threshold),
			SqlParam::Text(text.to_string()),
			SqlParam::Float(threshold),
		],
	));

	let mut fragment = String::from(
		"(ts_rank(l.search_vector, to_tsquery('english', {})) \
		+ GREATEST(similarity(l.title, {}), similarity(l.location, {}), \
		similarity(l.state, {}), similarity(l.description, {}))",
	);
	let mut params = vec![
		SqlParam::Text(tsquery),
		SqlParam::Text(text.to_string()),
		SqlParam::Text(text.to_string()),
		SqlParam::Text(text.to_string()),
		SqlParam::Text(text.to_string()),
	];

	if let Some(city) = detected_city {
		fragment.push_str(" + CASE WHEN l.location ILIKE {} THEN {} ELSE 0 END");
		params.push(SqlParam::Text(format!("%{city}%")));
		params.push(SqlParam::Float(f64::from(cfg.ranking.city_bonus)));
	}

	fragment.push(')');

	plan.ranking = Some(Predicate::new(fragment, params));
}
