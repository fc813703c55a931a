//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ConvertService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, InputStream, RealFileSystem, RealStdin};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Standard input abstraction
    pub stdin: Arc<dyn InputStream>,

    /// Outline conversion
    pub convert: ConvertService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(RealStdin))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        stdin: Arc<dyn InputStream>,
    ) -> Self {
        let settings = Arc::new(settings);
        let convert = ConvertService::new(Arc::clone(&settings), Arc::clone(&fs), Arc::clone(&stdin));

        Self {
            settings,
            fs,
            stdin,
            convert,
        }
    }
}
