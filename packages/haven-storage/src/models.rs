use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// One search result row. `effective_priority` is computed in the SELECT
/// (agency priority, falling back to agent priority, falling back to zero) and
/// `rank` is present only when the query carried free text.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ListingRow {
	pub id: Uuid,
	pub title: String,
	pub description: Option<String>,
	pub price: f64,
	pub purchase_category: String,
	pub property_type: String,
	pub bedrooms: Option<i32>,
	pub bathrooms: Option<i32>,
	pub land_size: Option<f64>,
	pub zoning_type: Option<String>,
	pub title_type: Option<String>,
	pub location: Option<String>,
	pub state: Option<String>,
	pub amenities: Option<String>,
	pub status: String,
	pub is_featured: bool,
	#[serde(with = "crate::time_serde::option")]
	pub featured_expires_at: Option<OffsetDateTime>,
	pub agent_id: Option<Uuid>,
	pub agency_id: Option<Uuid>,
	pub agent_name: Option<String>,
	pub agency_name: Option<String>,
	pub effective_priority: i32,
	pub rank: Option<f32>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
	#[sqlx(skip)]
	pub gallery: Vec<GalleryImage>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct GalleryImage {
	pub id: Uuid,
	pub listing_id: Uuid,
	pub url: String,
	pub position: i32,
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn timestamps_serialize_as_rfc3339() {
		let row = ListingRow {
			id: Uuid::nil(),
			title: "3 Bedroom Flat".to_string(),
			description: None,
			price: 45_000_000.0,
			purchase_category: "Sale".to_string(),
			property_type: "Apartment".to_string(),
			bedrooms: Some(3),
			bathrooms: None,
			land_size: None,
			zoning_type: None,
			title_type: None,
			location: Some("Lekki".to_string()),
			state: Some("Lagos".to_string()),
			amenities: None,
			status: "available".to_string(),
			is_featured: false,
			featured_expires_at: None,
			agent_id: None,
			agency_id: None,
			agent_name: None,
			agency_name: None,
			effective_priority: 0,
			rank: None,
			created_at: datetime!(2026-01-15 10:30:00 UTC),
			updated_at: datetime!(2026-01-15 10:30:00 UTC),
			gallery: Vec::new(),
		};
		let json = serde_json::to_value(&row).unwrap();

		assert_eq!(json["created_at"], "2026-01-15T10:30:00Z");
		assert_eq!(json["updated_at"], "2026-01-15T10:30:00Z");
		assert!(json["featured_expires_at"].is_null());
	}
}
