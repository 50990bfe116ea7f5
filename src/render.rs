/// Markup for result and favorite rows
///
/// Everything here is a pure function of its inputs. The strings are
/// inserted into the page as raw HTML, so every piece of user-controlled
/// text goes through `escape_html` first.

use crate::check_data::{DomainRecord, ErrorRecord};
use crate::domain::pluralize;
use crate::links::LinkBuilder;
use crate::storage::FavoriteEntry;

pub const EMPTY_INDEXED: &str = "No indexed domains found yet";
pub const EMPTY_NOT_INDEXED: &str = "No unindexed domains found yet";
pub const EMPTY_FAVORITES: &str = "No favorite domains yet";

const ICON_SEARCH: &str = r#"<svg viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><circle cx="11" cy="11" r="7" stroke="currentColor" stroke-width="2"/><path d="M16 16L20 20" stroke="currentColor" stroke-width="2" stroke-linecap="round"/></svg>"#;
const ICON_ARCHIVE: &str = r#"<svg viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><circle cx="12" cy="12" r="10" stroke="currentColor" stroke-width="2"/><path d="M12 6V12L16 14" stroke="currentColor" stroke-width="2" stroke-linecap="round"/></svg>"#;
const ICON_BACKLINKS: &str = r#"<svg viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="M13 10V3L4 14h7v7l9-11h-7z" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;
const ICON_REMOVE: &str = r#"<svg viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="M18 6L6 18M6 6L18 18" stroke="currentColor" stroke-width="2" stroke-linecap="round"/></svg>"#;
const STAR_PATH: &str = "M12 2L15.09 8.26L22 9.27L17 14.14L18.18 21.02L12 17.77L5.82 21.02L7 14.14L2 9.27L8.91 8.26L12 2Z";

/// Escape text for use in element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Class, title and icon fill of the favorite toggle
pub struct StarState {
    pub class: &'static str,
    pub title: &'static str,
    pub fill: &'static str,
}

pub fn star_state(is_favorite: bool) -> StarState {
    if is_favorite {
        StarState {
            class: "action-btn favorite active",
            title: "Remove from favorites",
            fill: "currentColor",
        }
    } else {
        StarState {
            class: "action-btn favorite",
            title: "Add to favorites",
            fill: "none",
        }
    }
}

pub fn empty_state(message: &str) -> String {
    format!(r#"<div class="empty-state">{}</div>"#, escape_html(message))
}

/// Row renderer with injected link builder
pub struct Renderer<'a> {
    links: &'a dyn LinkBuilder,
}

impl<'a> Renderer<'a> {
    pub fn new(links: &'a dyn LinkBuilder) -> Self {
        Renderer { links }
    }

    /// A row in the indexed results list
    pub fn domain_item(
        &self,
        domain: &str,
        result_count: u32,
        ordinal: usize,
        is_favorite: bool,
    ) -> String {
        let star = star_state(is_favorite);
        let badge = if result_count > 0 {
            count_badge(result_count)
        } else {
            String::new()
        };
        let toggle = format!(
            r#"<button type="button" class="{class}" data-domain="{domain}" data-count="{count}" title="{title}"><svg viewBox="0 0 24 24" fill="{fill}" xmlns="http://www.w3.org/2000/svg"><path d="{path}" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg></button>"#,
            class = star.class,
            domain = escape_html(domain),
            count = result_count,
            title = star.title,
            fill = star.fill,
            path = STAR_PATH,
        );

        format!(
            r#"<div class="domain-item" data-domain="{domain}" data-count="{count}"><span class="domain-number">{ordinal}</span><div class="domain-info"><span class="domain-name">{domain}</span>{badge}</div><div class="domain-actions">{lookups}{toggle}</div></div>"#,
            domain = escape_html(domain),
            count = result_count,
            ordinal = ordinal,
            badge = badge,
            lookups = self.lookup_links(domain),
            toggle = toggle,
        )
    }

    /// A row in the favorites panel; the badge is kept even for zero counts
    pub fn favorite_item(&self, entry: &FavoriteEntry, ordinal: usize) -> String {
        let remove = format!(
            r#"<button type="button" class="action-btn remove" data-domain="{}" title="Remove from favorites">{}</button>"#,
            escape_html(&entry.domain),
            ICON_REMOVE,
        );

        format!(
            r#"<div class="domain-item" data-domain="{domain}"><span class="domain-number">{ordinal}</span><div class="domain-info"><span class="domain-name">{domain}</span>{badge}</div><div class="domain-actions">{lookups}{remove}</div></div>"#,
            domain = escape_html(&entry.domain),
            ordinal = ordinal,
            badge = count_badge(entry.count),
            lookups = self.lookup_links(&entry.domain),
            remove = remove,
        )
    }

    pub fn not_indexed_item(&self, domain: &str, ordinal: usize) -> String {
        format!(
            r#"<div class="domain-item"><span class="domain-number">{}</span><div class="domain-info"><span class="domain-name">{}</span></div></div>"#,
            ordinal,
            escape_html(domain),
        )
    }

    pub fn error_item(&self, record: &ErrorRecord) -> String {
        format!(
            r#"<div class="domain-item"><span class="domain-name">{}</span><span class="error-message">{}</span></div>"#,
            escape_html(&record.domain),
            escape_html(&record.error),
        )
    }

    /// Indexed list; `is_favorite` is consulted once per row
    pub fn indexed_list(
        &self,
        records: &[DomainRecord],
        is_favorite: impl Fn(&str) -> bool,
    ) -> String {
        if records.is_empty() {
            return empty_state(EMPTY_INDEXED);
        }
        records
            .iter()
            .enumerate()
            .map(|(i, r)| self.domain_item(&r.domain, r.result_count, i + 1, is_favorite(&r.domain)))
            .collect()
    }

    pub fn not_indexed_list(&self, domains: &[String]) -> String {
        if domains.is_empty() {
            return empty_state(EMPTY_NOT_INDEXED);
        }
        domains
            .iter()
            .enumerate()
            .map(|(i, d)| self.not_indexed_item(d, i + 1))
            .collect()
    }

    /// Error rows; an empty list renders nothing because the panel is hidden
    pub fn error_list(&self, errors: &[ErrorRecord]) -> String {
        errors.iter().map(|e| self.error_item(e)).collect()
    }

    pub fn favorites_list(&self, entries: &[FavoriteEntry]) -> String {
        if entries.is_empty() {
            return empty_state(EMPTY_FAVORITES);
        }
        entries
            .iter()
            .enumerate()
            .map(|(i, e)| self.favorite_item(e, i + 1))
            .collect()
    }

    fn lookup_links(&self, domain: &str) -> String {
        [
            ("google", "Search site: on Google", self.links.search(domain), ICON_SEARCH),
            ("wayback", "Check Wayback Machine", self.links.archive(domain), ICON_ARCHIVE),
            ("ahrefs", "Check Ahrefs Backlinks", self.links.backlinks(domain), ICON_BACKLINKS),
        ]
        .iter()
        .map(|(class, title, href, icon)| {
            format!(
                r#"<a class="action-btn {}" href="{}" target="_blank" rel="noopener noreferrer" title="{}">{}</a>"#,
                class,
                escape_html(href),
                title,
                icon,
            )
        })
        .collect()
    }
}

fn count_badge(count: u32) -> String {
    format!(
        r#"<span class="domain-count">{}</span>"#,
        pluralize(count as usize, "result")
    )
}
