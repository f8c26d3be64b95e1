use std::collections::HashMap;

use tracing::warn;

use crate::domain::service::Service;

/// Lookup from repository identifier to the service that owns it.
#[derive(Debug, Default)]
pub struct RepositoryIndex {
    by_repository: HashMap<String, Service>,
}

impl RepositoryIndex {
    /// Indexes every repository of every service, in catalog order. When two
    /// services claim the same repository the later one wins.
    pub fn build(services: &[Service]) -> Self {
        let mut by_repository = HashMap::new();
        for service in services {
            for repository in &service.repository_urls {
                if let Some(previous) = by_repository.insert(repository.clone(), service.clone()) {
                    warn!(
                        repository = %repository,
                        previous = %previous.service_id,
                        current = %service.service_id,
                        "repository claimed by more than one service; keeping the later one"
                    );
                }
            }
        }
        Self { by_repository }
    }

    pub fn resolve(&self, repository: &str) -> Option<&Service> {
        self.by_repository.get(repository)
    }

    pub fn len(&self) -> usize {
        self.by_repository.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_repository.is_empty()
    }
}
