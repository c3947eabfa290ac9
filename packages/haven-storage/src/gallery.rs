use std::collections::HashMap;

use uuid::Uuid;

use crate::{
	Result,
	db::Db,
	models::{GalleryImage, ListingRow},
};

/// Attaches each listing's gallery images in one round trip, preserving the
/// order of the rows as returned by the search query.
pub async fn attach_gallery_images(db: &Db, rows: &mut [ListingRow]) -> Result<()> {
	if rows.is_empty() {
		return Ok(());
	}

	let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
	let images: Vec<GalleryImage> = sqlx::query_as(
		"\
SELECT id, listing_id, url, position
FROM listing_images
WHERE listing_id = ANY($1)
ORDER BY listing_id, position",
	)
	.bind(&ids)
	.fetch_all(&db.pool)
	.await?;
	let mut by_listing: HashMap<Uuid, Vec<GalleryImage>> = HashMap::new();

	for image in images {
		by_listing.entry(image.listing_id).or_default().push(image);
	}
	for row in rows {
		row.gallery = by_listing.remove(&row.id).unwrap_or_default();
	}

	Ok(())
}
