//! Bulk-load the catalog from a YAML file.
//!
//! Reads parts, tech news, and build guides from a YAML catalog and inserts
//! them. Tech news and build guides have no write path through the API;
//! this command is their only way into the store.

use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use compparts_core::UnitPrice;
use compparts_server::db::content::{NewBuildGuide, NewTechNewsItem};
use compparts_server::db::parts::NewPart;
use compparts_server::db::{ContentRepository, PartRepository};

use super::{CliError, connect};

/// The YAML catalog shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedCatalog {
    #[serde(default)]
    parts: Vec<SeedPart>,
    #[serde(default)]
    tech_news: Vec<SeedTechNews>,
    #[serde(default)]
    build_guides: Vec<SeedBuildGuide>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedPart {
    name: String,
    brand: String,
    price_per_unit: Decimal,
    #[serde(default = "empty_specs")]
    specs: serde_json::Value,
    #[serde(default)]
    available_quantity: i32,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedTechNews {
    title: String,
    summary: String,
    body: String,
    image_url: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedBuildGuide {
    title: String,
    description: String,
    total_budget: Decimal,
    image_url: Option<String>,
}

fn empty_specs() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Validate the catalog before touching the database.
fn validate_catalog(catalog: &SeedCatalog) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, part) in catalog.parts.iter().enumerate() {
        if part.name.trim().is_empty() {
            errors.push(format!("parts[{i}]: name is empty"));
        }
        if part.price_per_unit < Decimal::ZERO {
            errors.push(format!(
                "parts[{i}] ({}): negative price {}",
                part.name, part.price_per_unit
            ));
        }
        if part.available_quantity < 0 {
            errors.push(format!(
                "parts[{i}] ({}): negative quantity",
                part.name
            ));
        }
    }

    for (i, item) in catalog.tech_news.iter().enumerate() {
        if item.title.trim().is_empty() {
            errors.push(format!("techNews[{i}]: title is empty"));
        }
    }

    for (i, guide) in catalog.build_guides.iter().enumerate() {
        if guide.title.trim().is_empty() {
            errors.push(format!("buildGuides[{i}]: title is empty"));
        }
        if guide.total_budget < Decimal::ZERO {
            errors.push(format!(
                "buildGuides[{i}] ({}): negative budget",
                guide.title
            ));
        }
    }

    errors
}

/// Load a YAML catalog and insert its contents.
///
/// # Errors
///
/// Returns `CliError` if the file cannot be read, fails validation, or any
/// insert fails.
pub async fn run(file_path: &str) -> Result<(), CliError> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(CliError::InvalidInput(format!("file not found: {file_path}")));
    }

    info!(path = %file_path, "Loading catalog from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let catalog: SeedCatalog = serde_yaml::from_str(&content)?;

    let errors = validate_catalog(&catalog);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(CliError::InvalidInput(format!(
            "{} validation errors found",
            errors.len()
        )));
    }

    info!(
        parts = catalog.parts.len(),
        tech_news = catalog.tech_news.len(),
        build_guides = catalog.build_guides.len(),
        "Catalog validated"
    );

    let pool = connect()?;

    let part_repo = PartRepository::new(&pool);
    let mut parts_inserted = 0_u64;
    for part in catalog.parts {
        let price_per_unit = UnitPrice::new(part.price_per_unit)
            .map_err(|e| CliError::InvalidInput(e.to_string()))?;
        part_repo
            .create(&NewPart {
                name: part.name,
                brand: part.brand,
                price_per_unit,
                specs: part.specs,
                available_quantity: part.available_quantity,
                image_url: part.image_url,
            })
            .await?;
        parts_inserted += 1;
    }

    let content_repo = ContentRepository::new(&pool);

    let news: Vec<NewTechNewsItem> = catalog
        .tech_news
        .into_iter()
        .map(|item| NewTechNewsItem {
            title: item.title,
            summary: item.summary,
            body: item.body,
            image_url: item.image_url,
            published_at: item.published_at.unwrap_or_else(Utc::now),
        })
        .collect();
    let news_inserted = content_repo.insert_tech_news(&news).await?;

    let guides: Vec<NewBuildGuide> = catalog
        .build_guides
        .into_iter()
        .map(|guide| NewBuildGuide {
            title: guide.title,
            description: guide.description,
            total_budget: guide.total_budget,
            image_url: guide.image_url,
        })
        .collect();
    let guides_inserted = content_repo.insert_build_guides(&guides).await?;

    info!("Seeding complete!");
    info!("  Parts inserted: {parts_inserted}");
    info!("  Tech news inserted: {news_inserted}");
    info!("  Build guides inserted: {guides_inserted}");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_parses_from_yaml() {
        let yaml = r"
parts:
  - name: Ryzen 9 7950X
    brand: AMD
    pricePerUnit: 549.99
    availableQuantity: 12
    specs:
      socket: AM5
      cores: 16
techNews:
  - title: New GPU generation announced
    summary: Next-gen cards arrive this fall.
    body: Full details inside.
buildGuides:
  - title: Budget 1080p gaming build
    description: Solid 60fps on a budget.
    totalBudget: 750
";
        let catalog: SeedCatalog = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(catalog.parts.len(), 1);
        assert_eq!(catalog.tech_news.len(), 1);
        assert_eq!(catalog.build_guides.len(), 1);

        let part = catalog.parts.first().unwrap();
        assert_eq!(part.brand, "AMD");
        assert_eq!(part.specs["socket"], "AM5");
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn test_validation_flags_negative_price() {
        let yaml = r"
parts:
  - name: Broken part
    brand: ACME
    pricePerUnit: -5
";
        let catalog: SeedCatalog = serde_yaml::from_str(yaml).unwrap();
        let errors = validate_catalog(&catalog);
        assert_eq!(errors.len(), 1);
        assert!(errors.first().unwrap().contains("negative price"));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog: SeedCatalog = serde_yaml::from_str("{}").unwrap();
        assert!(validate_catalog(&catalog).is_empty());
    }
}
