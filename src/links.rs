//! Link collection from HTML pages

use crate::error::{Result, ScrapeError};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;
use url::Url;

/// Tag/attribute pairs holding page links
pub const PAGE_LINK_SOURCES: &[(&str, &str)] = &[
    ("a", "href"),
    ("link", "href"),
    ("source", "src"),
    ("div", "src"),
    ("div", "data-src"),
    ("div", "data-url"),
    ("div", "href"),
];

/// Tag/attribute pairs holding image links
pub const IMG_LINK_SOURCES: &[(&str, &str)] = &[("img", "src"), ("img", "data-src")];

/// Tag/attribute pairs holding script links
pub const SCRIPT_LINK_SOURCES: &[(&str, &str)] = &[("script", "src")];

/// Extensions that move a page or script link into the image links
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".svg", ".bmp", ".tiff", ".pdf", ".eps", ".gif", ".jfif", ".webp",
    ".heif", ".avif", ".bat", ".bpg",
];

/// Link category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Union of every category
    #[default]
    All,
    Page,
    Img,
    Script,
}

/// Collects and categorizes the links of one page
#[derive(Debug, Clone)]
pub struct LinkScraper {
    html: String,
    page_url: Url,
    site_root: Url,
    page_links: Vec<String>,
    img_links: Vec<String>,
    script_links: Vec<String>,
}

impl LinkScraper {
    /// Prepare a scraper for `html` fetched from `page_url`.
    ///
    /// Nothing is collected until [`LinkScraper::scrape_page`] runs.
    pub fn new(html: &str, page_url: &str) -> Result<Self> {
        let invalid = |reason: String| ScrapeError::InvalidUrl {
            url: page_url.to_string(),
            reason,
        };

        let page_url = Url::parse(page_url).map_err(|e| invalid(e.to_string()))?;
        if page_url.cannot_be_a_base() || page_url.host_str().is_none() {
            return Err(invalid("URL has no host".into()));
        }

        let mut site_root = page_url.clone();
        site_root.set_path("/");
        site_root.set_query(None);
        site_root.set_fragment(None);

        Ok(Self {
            html: html.to_string(),
            page_url,
            site_root,
            page_links: Vec::new(),
            img_links: Vec::new(),
            script_links: Vec::new(),
        })
    }

    #[must_use]
    pub const fn page_url(&self) -> &Url {
        &self.page_url
    }

    #[must_use]
    pub fn page_links(&self) -> &[String] {
        &self.page_links
    }

    #[must_use]
    pub fn img_links(&self) -> &[String] {
        &self.img_links
    }

    #[must_use]
    pub fn script_links(&self) -> &[String] {
        &self.script_links
    }

    /// Collect every link category from the page
    pub fn scrape_page(&mut self) {
        let document = Html::parse_document(&self.html);

        self.page_links = self.process_links(find_all(&document, PAGE_LINK_SOURCES));
        self.img_links = self.process_links(find_all(&document, IMG_LINK_SOURCES));
        self.script_links = self.process_links(find_all(&document, SCRIPT_LINK_SOURCES));
        self.merge_image_links_from_non_img_tags();

        debug!(
            page = self.page_links.len(),
            img = self.img_links.len(),
            script = self.script_links.len(),
            url = %self.page_url,
            "scraped page links"
        );
    }

    /// Links of the given category, sorted.
    ///
    /// `same_site_only` drops links whose host differs from the page's
    /// (ignoring a `www.` prefix). Links in `excluded` are dropped as well,
    /// which also allows combining categories, e.g. `All` minus the script
    /// links.
    #[must_use]
    pub fn get_links(
        &self,
        link_type: LinkType,
        same_site_only: bool,
        excluded: &[String],
    ) -> Vec<String> {
        let links: BTreeSet<&String> = match link_type {
            LinkType::All => self
                .page_links
                .iter()
                .chain(&self.img_links)
                .chain(&self.script_links)
                .collect(),
            LinkType::Page => self.page_links.iter().collect(),
            LinkType::Img => self.img_links.iter().collect(),
            LinkType::Script => self.script_links.iter().collect(),
        };

        links
            .into_iter()
            .filter(|link| !same_site_only || self.is_same_site(link))
            .filter(|link| !excluded.contains(link))
            .cloned()
            .collect()
    }

    fn is_same_site(&self, link: &str) -> bool {
        let page_host = self.page_url.host_str().map(strip_www);
        Url::parse(link)
            .ok()
            .is_some_and(|url| url.host_str().map(strip_www) == page_host)
    }

    /// Normalize, deduplicate and sort
    fn process_links(&self, links: Vec<&str>) -> Vec<String> {
        links
            .into_iter()
            .filter_map(|link| self.format_link(link))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Clean quoting artifacts and resolve relative links against the
    /// page's scheme and host
    fn format_link(&self, link: &str) -> Option<String> {
        let cleaned: String = link
            .trim_matches([' ', '\n', '\t', '\r'])
            .chars()
            .filter(|c| !matches!(*c, '"' | '\\' | '\''))
            .collect();
        if cleaned.contains(['@', ' ']) {
            return None;
        }

        let resolved = match Url::parse(&cleaned) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => self.site_root.join(&cleaned).ok()?,
            Err(_) => return None,
        };

        Some(resolved.as_str().trim_matches('/').to_string())
    }

    fn merge_image_links_from_non_img_tags(&mut self) {
        let mut img_links: BTreeSet<String> = self.img_links.drain(..).collect();
        img_links.extend(
            self.script_links
                .iter()
                .chain(&self.page_links)
                .filter(|link| IMAGE_EXTENSIONS.iter().any(|ext| link.contains(ext)))
                .cloned(),
        );
        self.img_links = img_links.into_iter().collect();
    }
}

/// Attribute values for each tag/attribute pair, skipping fragment links
fn find_all<'a>(document: &'a Html, sources: &[(&str, &str)]) -> Vec<&'a str> {
    let mut links = Vec::new();
    for (tag, attribute) in sources {
        let Ok(selector) = Selector::parse(tag) else {
            continue;
        };
        links.extend(
            document
                .select(&selector)
                .filter_map(|element| element.value().attr(attribute))
                .filter(|value| !value.contains('#')),
        );
    }
    links
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
