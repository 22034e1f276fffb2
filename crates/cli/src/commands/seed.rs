//! Seed the store with a demo catalogue.
//!
//! Reads products, site settings and carousel slides from a YAML file,
//! validates all of it, then clears the products and settings collections
//! and writes the fixtures through the same services the API uses.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use showcase_api::db::{self, Collection, DocumentStore, PgDocumentStore};
use showcase_api::models::{CarouselSlide, CarouselUpdate, NewProduct, SiteSettings, Validate, ValidationError};
use showcase_api::services::{ProductService, SettingsService};
use showcase_core::AdminIdentity;

/// Fixture file used when `--file` is not given.
pub const DEFAULT_SEED_FILE: &str = "crates/cli/seed/showcase.yaml";

/// Identity recorded in logs for seeded writes.
const SEED_ACTOR: &str = "seed";

/// Contents of a fixture file.
#[derive(Debug, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub products: Vec<NewProduct>,
    #[serde(default)]
    pub site_settings: SiteSettings,
    #[serde(default)]
    pub carousel: Vec<CarouselSlide>,
}

/// A fixture entry failed validation.
#[derive(Debug, Error)]
#[error("{entry}: {source}")]
pub struct SeedError {
    entry: String,
    #[source]
    source: ValidationError,
}

/// Parse fixture YAML.
///
/// # Errors
///
/// Returns an error if the YAML does not match the fixture shape.
pub fn parse(content: &str) -> Result<SeedData, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Validate every fixture entry, collecting all failures.
#[must_use]
pub fn validate(data: &SeedData) -> Vec<SeedError> {
    let mut errors: Vec<SeedError> = data
        .products
        .iter()
        .enumerate()
        .filter_map(|(i, product)| {
            product.clone().validate().err().map(|source| SeedError {
                entry: format!("products[{i}] ({})", product.name),
                source,
            })
        })
        .collect();

    if let Err(source) = (CarouselUpdate {
        slides: data.carousel.clone(),
    })
    .validate()
    {
        errors.push(SeedError {
            entry: "carousel".to_string(),
            source,
        });
    }

    errors
}

/// Seed the database from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, any entry fails
/// validation, or a database operation fails.
pub async fn run(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    // Verify file exists
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading fixtures from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let data = parse(&content)?;

    info!(
        products = data.products.len(),
        slides = data.carousel.len(),
        "Parsed fixtures"
    );

    let errors = validate(&data);
    if !errors.is_empty() {
        error!("Fixture validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    // Connect to database
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let store: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(pool));
    seed(store, data).await?;

    info!("Database seeded successfully");
    Ok(())
}

/// Replace products and settings with `data`.
///
/// # Errors
///
/// Returns an error if a store operation fails.
pub async fn seed(store: Arc<dyn DocumentStore>, data: SeedData) -> Result<(), Box<dyn std::error::Error>> {
    let actor = AdminIdentity::verified(SEED_ACTOR);

    info!("Clearing existing data...");
    let removed = store.clear(Collection::Products).await?;
    let removed_settings = store.clear_settings().await?;
    info!(removed, removed_settings, "Cleared products and settings");

    let products = ProductService::new(store.clone());
    let count = data.products.len();
    for product in data.products {
        products.create(product, &actor).await?;
    }
    info!(count, "Inserted products");

    let settings = SettingsService::new(store);
    settings
        .put_site_settings(data.site_settings, &actor)
        .await?;
    info!("Site settings configured");

    let slides = settings
        .put_carousel(
            CarouselUpdate {
                slides: data.carousel,
            },
            &actor,
        )
        .await?;
    info!(slides = slides.len(), "Carousel slides added");

    Ok(())
}
