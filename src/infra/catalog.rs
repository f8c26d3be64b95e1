use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;

use crate::domain::service::Service;
use crate::error::{AppError, AppResult};
use crate::services::CatalogSource;

/// Catalog exported to a local JSON file, in the shape the catalog's
/// GraphQL endpoint returns.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn load_services(&self) -> AppResult<Vec<Service>> {
        let contents = fs::read_to_string(&self.path).await.map_err(|err| {
            AppError::CatalogUnavailable(format!("{}: {err}", self.path.display()))
        })?;
        parse_catalog(&contents)
            .map_err(|err| AppError::CatalogMalformed(format!("{}: {err}", self.path.display())))
    }
}

fn parse_catalog(contents: &str) -> Result<Vec<Service>, serde_json::Error> {
    let document: CatalogDocument = serde_json::from_str(contents)?;
    Ok(document.data.services.nodes)
}

#[derive(Deserialize)]
struct CatalogDocument {
    data: CatalogData,
}

#[derive(Deserialize)]
struct CatalogData {
    services: ServiceConnection,
}

#[derive(Deserialize)]
struct ServiceConnection {
    nodes: Vec<Service>,
}
