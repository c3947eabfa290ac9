use sqlx::{
	Postgres,
	postgres::PgArguments,
	query::{QueryAs, QueryScalar},
};

use haven_storage::{db::Db, gallery, models::ListingRow};

use crate::{
	Result,
	search::{
		ListingsPage,
		plan::{QueryPlan, SqlParam, SqlQuery},
	},
};

/// Runs the SELECT and its matching COUNT concurrently, then attaches gallery
/// images. Either query failing fails the whole request.
pub async fn execute(db: &Db, plan: &QueryPlan, page: i64, limit: i64) -> Result<ListingsPage> {
	let offset = (page - 1) * limit;
	let select = plan.render_select(limit, offset);
	let count = plan.render_count();
	let (mut rows, total) = tokio::try_join!(
		bind_listing_query(&select).fetch_all(&db.pool),
		bind_count_query(&count).fetch_one(&db.pool),
	)?;

	gallery::attach_gallery_images(db, &mut rows).await?;

	Ok(ListingsPage {
		listings: rows,
		total,
		total_pages: total_pages(total, limit),
		current_page: page,
	})
}

fn total_pages(total: i64, limit: i64) -> i64 {
	if limit <= 0 {
		return 0;
	}

	(total + limit - 1) / limit
}

fn bind_listing_query<'q>(
	query: &'q SqlQuery,
) -> QueryAs<'q, Postgres, ListingRow, PgArguments> {
	let mut bound = sqlx::query_as::<_, ListingRow>(&query.sql);

	for param in &query.params {
		bound = bind(bound, param);
	}

	bound
}

fn bind_count_query<'q>(query: &'q SqlQuery) -> QueryScalar<'q, Postgres, i64, PgArguments> {
	let mut bound = sqlx::query_scalar::<_, i64>(&query.sql);

	for param in &query.params {
		bound = match param {
			SqlParam::Text(value) => bound.bind(value.clone()),
			SqlParam::Int(value) => bound.bind(*value),
			SqlParam::Float(value) => bound.bind(*value),
			SqlParam::Bool(value) => bound.bind(*value),
			SqlParam::Uuid(value) => bound.bind(*value),
			SqlParam::TextArray(values) => bound.bind(values.clone()),
		};
	}

	bound
}

fn bind<'q>(
	query: QueryAs<'q, Postgres, ListingRow, PgArguments>,
	param: &SqlParam,
) -> QueryAs<'q, Postgres, ListingRow, PgArguments> {
	match param {
		SqlParam::Text(value) => query.bind(value.clone()),
		SqlParam::Int(value) => query.bind(*value),
		SqlParam::Float(value) => query.bind(*value),
		SqlParam::Bool(value) => query.bind(*value),
		SqlParam::Uuid(value) => query.bind(*value),
		SqlParam::TextArray(values) => query.bind(values.clone()),
	}
}
