//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is not set, per profile.
///
/// The text profile keeps engine lifecycle events off: the CLI already
/// prints a failed run's error once on stderr.
const DEVELOPMENT_FILTER: &str =
    "slguard_core=warn,slguard_store=warn,slguard_engine=off,slguard=warn";
const PRODUCTION_FILTER: &str =
    "slguard_core=warn,slguard_store=info,slguard_engine=info,slguard=info";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production and CI
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// This function should be called once at application startup.
/// It sets up the tracing subscriber based on the selected profile.
/// `RUST_LOG` overrides the profile's default filter.
///
/// # Profiles
///
/// - **Development**: Human-readable logs, warnings only and no engine lifecycle
///   events unless `RUST_LOG` says otherwise
/// - **Production**: JSON structured logs with info level
/// - **Test**: Capture mode for test assertions
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(DEVELOPMENT_FILTER)),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(PRODUCTION_FILTER)),
                )
                .init();
        }
        Profile::Test => {
            // Test capture is initialized separately via init_test_capture()
            tracing_subscriber::registry().init();
        }
    });
}
