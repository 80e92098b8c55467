use thiserror::Error;

/// Failure taxonomy of the guide. None of these is fatal; each one disables
/// only the features that depend on the failed capability.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GuideError {
    /// Network/backend error while loading the catalog. The previous catalog
    /// stays in place.
    #[error("catalog load failed: {0}")]
    CatalogLoad(String),
    /// Capability missing or permission denied.
    #[error("geolocation unavailable: {0}")]
    GeolocationUnavailable(String),
    #[error("speech synthesis is not supported")]
    SpeechUnsupported,
    /// Gesture-time audio failure; the gate stays locked.
    #[error("audio unlock failed: {0}")]
    AudioUnlock(String),
}

pub type Result<T, E = GuideError> = std::result::Result<T, E>;
