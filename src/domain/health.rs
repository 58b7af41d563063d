//! Dependency health probing

use async_trait::async_trait;

use crate::domain::DomainError;

/// A backing dependency that the readiness probe can check
#[async_trait]
pub trait HealthIndicator: Send + Sync {
    /// Component name reported in the readiness response
    fn name(&self) -> &str;

    /// Round-trip the dependency. Any error marks it unhealthy.
    async fn check(&self) -> Result<(), DomainError>;
}
