// Derived statistics over GitHub data.
// Language usage shares, display colors, and account totals.

pub mod languages;
pub mod palette;
pub mod totals;

pub use languages::{LanguageStat, LanguageTally, aggregate_languages};
pub use palette::{DEFAULT_COLOR, language_color};
pub use totals::GitHubStats;
