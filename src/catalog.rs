//! Service catalog
//!
//! The catalog is fixed configuration, not user data: the standard set is
//! compiled in, and an alternative price list can be loaded from YAML.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::money::Rupees;

/// Errors related to catalog loading or selection lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The service id and cloth type do not resolve to a catalog entry.
    #[error("No service {service:?} offering {cloth:?}")]
    InvalidSelection {
        /// The service id that was requested.
        service: String,
        /// The cloth type that was requested, if any.
        cloth: String,
    },

    /// IO error reading a catalog file.
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// One bookable service with its per-unit price and the cloth types it
/// accepts, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Service {
    /// Stable service id, e.g. `washfold`.
    pub id: String,

    /// Human-readable service name.
    pub name: String,

    /// Price per unit of cloth.
    #[serde(rename = "price")]
    pub unit_price: Rupees,

    /// Cloth types this service accepts, in display order.
    #[serde(rename = "cloths")]
    pub cloth_types: Vec<String>,
}

/// A resolved `(service, cloth)` selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    /// The catalog entry the selection resolved to.
    pub service: &'a Service,

    /// The cloth type, after the sole-entry fallback.
    pub cloth: String,
}

/// The service catalog, immutable for the process lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    /// The standard laundry price list.
    #[must_use]
    pub fn standard() -> Self {
        ServiceCatalog {
            services: vec![
                service(
                    "washfold",
                    "Wash & Fold",
                    20,
                    &[
                        "T-Shirt",
                        "Shirt",
                        "Pant",
                        "Jeans",
                        "Jacket",
                        "Saree",
                        "Blanket Single",
                    ],
                ),
                service(
                    "dryclean",
                    "Dry Cleaning",
                    40,
                    &["Shirt", "Pant", "Jacket", "Saree"],
                ),
                service("ironing", "Ironing", 10, &["Shirt", "T-Shirt", "Pant"]),
                service("stain", "Stain Removal", 500, &["Any"]),
                service("leather", "Leather & Suede Cleaning", 999, &["Bags", "Jacket"]),
                service(
                    "wedding",
                    "Wedding Dress Cleaning",
                    2800,
                    &["Lehenga", "Sharara", "Suit", "Gown", "Sherwani", "Saree"],
                ),
                service(
                    "homeclean",
                    "Home Cleaning",
                    499,
                    &["1 Hour", "2 Hours", "Full Home"],
                ),
            ],
        }
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Look up a service by id.
    #[must_use]
    pub fn find(&self, service_id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == service_id)
    }

    /// Resolve a `(service, cloth)` selection.
    ///
    /// When the cloth is omitted (or empty) and the service accepts exactly
    /// one cloth type, that sole entry is used.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidSelection` if the service id is unknown
    /// or the cloth type is not one the service accepts.
    pub fn resolve(
        &self,
        service_id: &str,
        cloth: Option<&str>,
    ) -> Result<Selection<'_>, CatalogError> {
        let invalid = || CatalogError::InvalidSelection {
            service: service_id.to_string(),
            cloth: cloth.unwrap_or_default().to_string(),
        };

        let service = self.find(service_id).ok_or_else(invalid)?;

        let cloth = match cloth.filter(|cloth| !cloth.is_empty()) {
            Some(requested) => service
                .cloth_types
                .iter()
                .find(|accepted| *accepted == requested)
                .ok_or_else(invalid)?
                .clone(),
            None => match service.cloth_types.as_slice() {
                [sole] => sole.clone(),
                _ => return Err(invalid()),
            },
        };

        Ok(Selection { service, cloth })
    }

    /// Iterate over the catalog entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

fn service(id: &str, name: &str, unit_price: u64, cloth_types: &[&str]) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        unit_price: Rupees::new(unit_price),
        cloth_types: cloth_types.iter().map(ToString::to_string).collect(),
    }
}
