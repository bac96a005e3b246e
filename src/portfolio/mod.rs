// Portfolio module.
// Generates the static project list at build time and loads it for display.

pub mod entry;
pub mod generator;
pub mod loader;
pub mod overlay;
pub mod technologies;

pub use entry::{OverlayMetadata, PortfolioEntry};
pub use generator::{
    BuildReport, DISPLAY_TOPIC, FEATURED_TOPIC, GeneratorSettings, PortfolioGenerator,
    select_display, sort_entries, write_portfolio,
};
pub use loader::{LoadedPortfolio, PortfolioSource, ProjectFilter, bundled_portfolio, load_portfolio};
pub use overlay::OverlayLocator;
pub use technologies::build_technologies;
