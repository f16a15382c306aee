// Version information for the chain explorer

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-endpoint-health-2025-11-03";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2025-11-03";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "chain-registry",
    "asset-lists",
    "ibc-channels",
    "rest-health",
    "rpc-health",
    "grpc-listing",
    "json-rpc-listing",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Chain Explorer {} ({})", VERSION_NUMBER, BUILD_DATE)
}
