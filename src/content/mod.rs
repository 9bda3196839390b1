//! Content Module
//!
//! Episodes and static pages, loaded once at startup and read-only afterwards.

mod defaults;
mod episode;
mod pages;

pub use defaults::{default_about, default_episodes, default_faq};
pub use episode::{normalize_episode_id, Episode, EpisodeDirectory};
pub use pages::{try_load_about, try_load_faq, AboutContent, FaqContent, FaqItem, PageContent};
