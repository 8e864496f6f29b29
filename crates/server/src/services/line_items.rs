//! Purchase detail aggregation.
//!
//! Joins a buyer's purchase records with the part catalog into enriched
//! line items. Five stages, in order:
//!
//! 1. filter purchases by buyer email (store query)
//! 2. resolve each stored string reference into a typed part id
//! 3. inner-join against the catalog on that id
//! 4. derive `total_price = quantity x price_per_unit`
//! 5. project the fixed line-item shape
//!
//! A malformed reference fails the whole request with a 400; a reference
//! whose part no longer exists silently drops that purchase from the
//! result. Totals are derived per call and never persisted.

use std::collections::HashMap;

use sqlx::PgPool;

use compparts_core::{Email, PartId};

use crate::db::{PartRepository, PurchaseRepository};
use crate::error::{AppError, Result};
use crate::models::{LineItem, Part, PurchasedPart};

/// Aggregate one buyer's purchases into enriched line items.
///
/// # Errors
///
/// Returns `AppError::BadReference` if any purchase carries a malformed
/// part reference, or `AppError::Database` if either store query fails.
pub async fn for_buyer(pool: &PgPool, buyer: &Email) -> Result<Vec<LineItem>> {
    let purchases = PurchaseRepository::new(pool).list_by_buyer(buyer).await?;
    let part_ids = resolve_part_refs(&purchases)?;
    let parts = PartRepository::new(pool).by_ids(&part_ids).await?;

    Ok(join_line_items(purchases, &parts))
}

/// Resolve every stored part reference into a typed id.
///
/// # Errors
///
/// Returns `AppError::BadReference` on the first malformed reference; the
/// whole aggregation fails rather than skipping the bad record.
fn resolve_part_refs(purchases: &[PurchasedPart]) -> Result<Vec<PartId>> {
    purchases
        .iter()
        .map(|purchase| {
            purchase
                .part_ref
                .resolve()
                .map_err(|e| AppError::BadReference(e.reference))
        })
        .collect()
}

/// Join purchases against their parts and project line items.
///
/// Inner-join semantics: a purchase whose part id is absent from `parts`
/// produces no line item.
fn join_line_items(purchases: Vec<PurchasedPart>, parts: &[Part]) -> Vec<LineItem> {
    let by_id: HashMap<PartId, &Part> = parts.iter().map(|part| (part.id, part)).collect();

    purchases
        .into_iter()
        .filter_map(|purchase| {
            let part_id = purchase.part_ref.resolve().ok()?;
            let part = by_id.get(&part_id)?;

            Some(LineItem {
                id: purchase.id,
                part_name: part.name.clone(),
                buyer_name: purchase.buyer_name,
                buyer_email: purchase.buyer_email,
                quantity: purchase.quantity,
                unit_price: part.price_per_unit,
                total_price: part.price_per_unit.total_for(purchase.quantity),
                address: purchase.address,
                phone: purchase.phone,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use compparts_core::{PartRef, PurchaseId, UnitPrice};

    fn part(name: &str, cents: i64) -> Part {
        Part {
            id: PartId::new(Uuid::new_v4()),
            name: name.to_string(),
            brand: "ACME".to_string(),
            price_per_unit: UnitPrice::new(Decimal::new(cents, 2)).unwrap(),
            specs: serde_json::json!({}),
            available_quantity: 10,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    fn purchase(part_ref: PartRef, quantity: i32) -> PurchasedPart {
        PurchasedPart {
            id: PurchaseId::new(Uuid::new_v4()),
            buyer_email: Email::parse("buyer@example.com").unwrap(),
            buyer_name: "Buyer".to_string(),
            part_ref,
            quantity,
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_price_is_quantity_times_unit_price() {
        let gpu = part("GPU", 24_999);
        let purchases = vec![purchase(PartRef::from(gpu.id), 3)];

        let items = join_line_items(purchases, std::slice::from_ref(&gpu));

        assert_eq!(items.len(), 1);
        let item = items.first().unwrap();
        assert_eq!(item.total_price, Decimal::new(74_997, 2));
        assert_eq!(
            item.total_price,
            item.unit_price.amount() * Decimal::from(item.quantity)
        );
    }

    #[test]
    fn test_missing_part_is_dropped_not_reported() {
        let gpu = part("GPU", 24_999);
        let deleted_part_id = PartId::new(Uuid::new_v4());
        let purchases = vec![
            purchase(PartRef::from(gpu.id), 1),
            purchase(PartRef::from(deleted_part_id), 2),
        ];

        let items = join_line_items(purchases, std::slice::from_ref(&gpu));

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().part_name, "GPU");
    }

    #[test]
    fn test_malformed_reference_fails_whole_request() {
        let purchases = vec![
            purchase(PartRef::from(PartId::new(Uuid::new_v4())), 1),
            purchase(PartRef::new("definitely-not-an-id"), 1),
        ];

        let err = resolve_part_refs(&purchases).unwrap_err();
        assert!(matches!(err, AppError::BadReference(ref r) if r == "definitely-not-an-id"));
    }

    #[test]
    fn test_projection_copies_buyer_fields() {
        let ssd = part("SSD", 8_900);
        let purchases = vec![purchase(PartRef::from(ssd.id), 2)];

        let items = join_line_items(purchases, std::slice::from_ref(&ssd));

        let item = items.first().unwrap();
        assert_eq!(item.buyer_name, "Buyer");
        assert_eq!(item.buyer_email.as_str(), "buyer@example.com");
        assert_eq!(item.address, "1 Main St");
        assert_eq!(item.phone, "555-0100");
    }

    #[test]
    fn test_empty_purchases_yield_empty_result() {
        assert!(resolve_part_refs(&[]).unwrap().is_empty());
        assert!(join_line_items(Vec::new(), &[]).is_empty());
    }
}
