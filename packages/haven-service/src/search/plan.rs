use uuid::Uuid;

/// A value bound into the rendered query. Kept as an enum so predicates can be
/// built and inspected without touching the database driver.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
	Text(String),
	Int(i64),
	Float(f64),
	Bool(bool),
	Uuid(Uuid),
	TextArray(Vec<String>),
}

/// One SQL condition with its parameters. The fragment uses `{}` markers, one
/// per parameter; positional `$n` placeholders are assigned in a single pass
/// when the whole plan is rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
	pub fragment: String,
	pub params: Vec<SqlParam>,
}
impl Predicate {
	pub fn new(fragment: impl Into<String>, params: Vec<SqlParam>) -> Self {
		let fragment = fragment.into();

		debug_assert_eq!(fragment.matches("{}").count(), params.len());

		Self { fragment, params }
	}

	fn render_into(&self, sql: &mut String, params: &mut Vec<SqlParam>) {
		let mut parts = self.fragment.split("{}");

		if let Some(first) = parts.next() {
			sql.push_str(first);
		}
		for (part, param) in parts.zip(self.params.iter()) {
			params.push(param.clone());

			sql.push('$');
			sql.push_str(&params.len().to_string());
			sql.push_str(part);
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderBy {
	Rank,
	PriceAsc,
	PriceDesc,
	DateAsc,
	Default,
}
impl Default for OrderBy {
	fn default() -> Self {
		Self::Default
	}
}
impl OrderBy {
	fn as_sql(self) -> &'static str {
		match self {
			Self::Rank => "rank DESC, l.is_featured DESC, effective_priority DESC, l.created_at DESC",
			Self::PriceAsc => "l.is_featured DESC, l.price ASC",
			Self::PriceDesc => "l.is_featured DESC, l.price DESC",
			Self::DateAsc => "l.created_at ASC",
			Self::Default => "l.is_featured DESC, effective_priority DESC, l.created_at DESC",
		}
	}
}

/// Fully rendered SQL with its ordered bind values.
#[derive(Debug)]
pub struct SqlQuery {
	pub sql: String,
	pub params: Vec<SqlParam>,
}

/// The compiled search: strict predicates are AND-ed, the OR-group collapses
/// into one parenthesized clause, and the ranking expression (present only for
/// free-text queries) is selected as `rank`.
#[derive(Debug, Default)]
pub struct QueryPlan {
	pub strict: Vec<Predicate>,
	pub or_group: Vec<Predicate>,
	pub ranking: Option<Predicate>,
	pub order_by: OrderBy,
}
impl QueryPlan {
	pub fn render_select(&self, limit: i64, offset: i64) -> SqlQuery {
		let mut params = Vec::new();
		let mut sql = String::from(
			"\
SELECT
	l.*,
	ag.name AS agent_name,
	ay.name AS agency_name,
	COALESCE(ay.priority, ag.priority, 0) AS effective_priority,
	",
		);

		match &self.ranking {
			Some(ranking) => {
				ranking.render_into(&mut sql, &mut params);

				sql.push_str("::REAL AS rank");
			},
			None => sql.push_str("NULL::REAL AS rank"),
		}

		sql.push_str(
			"\n\
FROM listings l
LEFT JOIN agents ag ON ag.id = l.agent_id
LEFT JOIN agencies ay ON ay.id = l.agency_id",
		);

		self.render_where(&mut sql, &mut params);

		sql.push_str("\nORDER BY ");
		sql.push_str(self.order_by.as_sql());

		params.push(SqlParam::Int(limit));

		sql.push_str(&format!("\nLIMIT ${}", params.len()));

		params.push(SqlParam::Int(offset));

		sql.push_str(&format!(" OFFSET ${}", params.len()));

		SqlQuery { sql, params }
	}

	pub fn render_count(&self) -> SqlQuery {
		let mut params = Vec::new();
		let mut sql = String::from(
			"\
SELECT COUNT(*)
FROM listings l
LEFT JOIN agents ag ON ag.id = l.agent_id
LEFT JOIN agencies ay ON ay.id = l.agency_id",
		);

		self.render_where(&mut sql, &mut params);

		SqlQuery { sql, params }
	}

	fn render_where(&self, sql: &mut String, params: &mut Vec<SqlParam>) {
		if self.strict.is_empty() && self.or_group.is_empty() {
			return;
		}

		sql.push_str("\nWHERE ");

		let mut first = true;

		for predicate in &self.strict {
			if !first {
				sql.push_str("\n\tAND ");
			}

			first = false;

			predicate.render_into(sql, params);
		}
		if !self.or_group.is_empty() {
			if !first {
				sql.push_str("\n\tAND ");
			}

			sql.push('(');

			for (index, predicate) in self.or_group.iter().enumerate() {
				if index > 0 {
					sql.push_str(" OR ");
				}

				predicate.render_into(sql, params);
			}

			sql.push(')');
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn placeholders_are_numbered_in_one_pass() {
		let plan = QueryPlan {
			strict: vec![
				Predicate::new("l.status = {}", vec![SqlParam::Text("available".to_string())]),
				Predicate::new("l.price <= {}", vec![SqlParam::Float(50_000_000.0)]),
			],
			or_group: vec![Predicate::new(
				"l.location ILIKE {}",
				vec![SqlParam::Text("%lekki%".to_string())],
			)],
			ranking: None,
			order_by: OrderBy::Default,
		};
		let query = plan.render_select(10, 0);

		assert!(query.sql.contains("l.status = $1"));
		assert!(query.sql.contains("l.price <= $2"));
		assert!(query.sql.contains("(l.location ILIKE $3)"));
		assert!(query.sql.contains("LIMIT $4 OFFSET $5"));
		assert_eq!(query.params.len(), 5);
	}

	#[test]
	fn ranking_parameters_come_before_where_parameters() {
		let plan = QueryPlan {
			strict: vec![Predicate::new(
				"l.status = {}",
				vec![SqlParam::Text("available".to_string())],
			)],
			or_group: Vec::new(),
			ranking: Some(Predicate::new(
				"ts_rank(l.search_vector, to_tsquery('english', {}))",
				vec![SqlParam::Text("lekki".to_string())],
			)),
			order_by: OrderBy::Rank,
		};
		let query = plan.render_select(10, 0);

		assert!(query.sql.contains("to_tsquery('english', $1)"));
		assert!(query.sql.contains("l.status = $2"));
		assert_eq!(query.params[0], SqlParam::Text("lekki".to_string()));
	}

	#[test]
	fn count_query_excludes_ranking_and_pagination() {
		let plan = QueryPlan {
			strict: vec![Predicate::new(
				"l.status = {}",
				vec![SqlParam::Text("available".to_string())],
			)],
			or_group: Vec::new(),
			ranking: Some(Predicate::new(
				"ts_rank(l.search_vector, to_tsquery('english', {}))",
				vec![SqlParam::Text("lekki".to_string())],
			)),
			order_by: OrderBy::Rank,
		};
		let query = plan.render_count();

		assert!(query.sql.starts_with("SELECT COUNT(*)"));
		assert!(!query.sql.contains("ts_rank"));
		assert!(!query.sql.contains("LIMIT"));
		assert_eq!(query.params.len(), 1);
	}

	#[test]
	fn empty_plan_has_no_where_clause() {
		let query = QueryPlan::default().render_count();

		assert!(!query.sql.contains("WHERE"));
		assert!(query.params.is_empty());
	}
}
