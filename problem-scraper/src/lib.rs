//! Problem-statement acquisition for the commit review pipeline.
//!
//! Pieces, leaf to root:
//!
//! 1. [`detect::detect_problem_url`] — find the first judge link in a
//!    changed solution file and classify its platform;
//! 2. [`fetch::FetchPolicy`] — fetch the problem document through an
//!    escalation ladder that works around 403-happy judge sites;
//! 3. platform parsers under [`platforms`] — normalize a document into a
//!    [`ProblemData`] record;
//! 4. [`ScraperRegistry`] — the single `fetch_problem(platform, id)`
//!    entry composing the above;
//! 5. [`readme::parse_readme_as_problem`] — offline fallback reading the
//!    solved.ac README convention when live scraping fails;
//! 6. [`format`] — render either record into the prompt-facing block.
//!
//! The crate performs no orchestration-level error recovery: fetch and
//! parse failures propagate to the caller, which decides whether to fall
//! back or proceed without problem context.

pub mod detect;
pub mod errors;
pub mod fetch;
pub mod format;
mod html;
pub mod platforms;
pub mod readme;
pub mod types;

pub use detect::detect_problem_url;
pub use errors::{FetchError, ParseError, ScrapeError, ScrapeResult};
pub use fetch::{FetchConfig, FetchPolicy};
pub use format::{FormatOptions, format_problem, format_readme_problem};
pub use platforms::ScraperRegistry;
pub use readme::parse_readme_as_problem;
pub use types::{Platform, ProblemData, ReadmeProblemInfo, TestCase};
