//! Static Page Content
//!
//! About and FAQ records, loaded once from Markdown/JSON with per-page
//! fallback to built-in defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::content::defaults::{default_about, default_faq};
use crate::error::ContentError;

// == About Content ==
/// Structured about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub title: String,
    pub description: String,
    pub mission: String,
    pub who_we_are: String,
    pub what_we_cover: Vec<String>,
    pub join_community: String,
}

// == FAQ Content ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqContent {
    pub items: Vec<FaqItem>,
}

// == Page Content ==
/// About and FAQ pages held in memory for the process lifetime.
#[derive(Debug, Clone)]
pub struct PageContent {
    about: AboutContent,
    faq: FaqContent,
}

impl PageContent {
    /// Creates page content from explicit records.
    pub fn new(about: AboutContent, faq: FaqContent) -> Self {
        Self { about, faq }
    }

    /// Loads the about page from Markdown and the FAQ from JSON.
    ///
    /// Each page falls back to its built-in default independently.
    pub fn load(about_path: impl AsRef<Path>, faq_path: impl AsRef<Path>) -> Self {
        let about = try_load_about(about_path).unwrap_or_else(|e| {
            warn!("{}; using built-in about content", e);
            default_about()
        });
        let faq = try_load_faq(faq_path).unwrap_or_else(|e| {
            warn!("{}; using built-in FAQ", e);
            default_faq()
        });
        info!("Loaded about page and {} FAQ items", faq.items.len());
        Self::new(about, faq)
    }

    pub fn about(&self) -> &AboutContent {
        &self.about
    }

    pub fn faq(&self) -> &FaqContent {
        &self.faq
    }
}

impl Default for PageContent {
    fn default() -> Self {
        Self::new(default_about(), default_faq())
    }
}

/// Reads and parses the about page Markdown at `path`.
pub fn try_load_about(path: impl AsRef<Path>) -> Result<AboutContent, ContentError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_about_markdown(&text).map_err(|what| ContentError::Incomplete {
        path: path.to_path_buf(),
        what,
    })
}

/// Reads the FAQ JSON document (`{"items": [...]}`) at `path`.
pub fn try_load_faq(path: impl AsRef<Path>) -> Result<FaqContent, ContentError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// == Markdown Parsing ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Intro,
    Mission,
    WhoWeAre,
    WhatWeCover,
    Join,
    Other,
}

impl Section {
    fn from_heading(heading: &str) -> Self {
        let heading = heading.to_ascii_lowercase();
        if heading.contains("mission") {
            Section::Mission
        } else if heading.contains("who we are") {
            Section::WhoWeAre
        } else if heading.contains("what we cover") {
            Section::WhatWeCover
        } else if heading.contains("join") {
            Section::Join
        } else {
            Section::Other
        }
    }
}

#[derive(Debug)]
enum Block {
    Paragraph(String),
    Item(String),
}

fn flush(section: Section, paragraph: &mut Vec<&str>, blocks: &mut Vec<(Section, Block)>) {
    if !paragraph.is_empty() {
        blocks.push((section, Block::Paragraph(paragraph.join(" "))));
        paragraph.clear();
    }
}

/// Parses the about page layout: a `# Title`, an intro paragraph, and `##`
/// sections for mission, who we are, what we cover (bullets) and joining.
///
/// Returns the name of the first missing part on failure.
fn parse_about_markdown(text: &str) -> Result<AboutContent, &'static str> {
    let mut title = None;
    let mut section = Section::Preamble;
    let mut blocks: Vec<(Section, Block)> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim) {
        if let Some(heading) = line.strip_prefix("## ") {
            flush(section, &mut paragraph, &mut blocks);
            section = Section::from_heading(heading.trim());
        } else if let Some(heading) = line.strip_prefix("# ") {
            flush(section, &mut paragraph, &mut blocks);
            if title.is_none() {
                title = Some(heading.trim().to_string());
                section = Section::Intro;
            }
        } else if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            flush(section, &mut paragraph, &mut blocks);
            blocks.push((section, Block::Item(item.trim().to_string())));
        } else if line.is_empty() {
            flush(section, &mut paragraph, &mut blocks);
        } else {
            paragraph.push(line);
        }
    }
    flush(section, &mut paragraph, &mut blocks);

    let paragraphs = |wanted: Section| -> String {
        blocks
            .iter()
            .filter_map(|(s, block)| match block {
                Block::Paragraph(text) if *s == wanted => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };
    let non_empty = |value: String, what: &'static str| {
        if value.is_empty() {
            Err(what)
        } else {
            Ok(value)
        }
    };

    let title = title.filter(|t| !t.is_empty()).ok_or("a title")?;
    let description = blocks
        .iter()
        .find_map(|(s, block)| match block {
            Block::Paragraph(text) if *s == Section::Intro => Some(text.clone()),
            _ => None,
        })
        .ok_or("a description")?;
    let what_we_cover: Vec<String> = blocks
        .iter()
        .filter_map(|(s, block)| match block {
            Block::Item(text) if *s == Section::WhatWeCover => Some(text.clone()),
            _ => None,
        })
        .collect();
    if what_we_cover.is_empty() {
        return Err("a \"What We Cover\" list");
    }

    Ok(AboutContent {
        title,
        description,
        mission: non_empty(paragraphs(Section::Mission), "a mission section")?,
        who_we_are: non_empty(paragraphs(Section::WhoWeAre), "a \"Who We Are\" section")?,
        what_we_cover,
        join_community: non_empty(paragraphs(Section::Join), "a community section")?,
    })
}
