//! Seam for the device location subsystem.

use async_trait::async_trait;

use platefinder_core::Coordinate;

use crate::error::LocationError;

/// Source of the user's current position.
///
/// The pipeline treats location acquisition as a single capability that
/// yields one coordinate or fails with a typed reason.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`LocationError`] when services are disabled, permission
    /// was denied, or the lookup itself failed.
    async fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// Provider backed by a known coordinate (CLI flags, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}
