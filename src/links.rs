/// External lookup URLs for a domain

use crate::domain::strip_scheme;

/// Builds the per-domain lookup links shown next to each result
pub trait LinkBuilder {
    fn search(&self, domain: &str) -> String;
    fn archive(&self, domain: &str) -> String;
    fn backlinks(&self, domain: &str) -> String;
}

/// Google `site:` search, Wayback Machine and Ahrefs backlink checker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExternalLinks;

impl LinkBuilder for ExternalLinks {
    fn search(&self, domain: &str) -> String {
        format!(
            "https://www.google.com/search?q=site:{}",
            encode_uri_component(domain)
        )
    }

    fn archive(&self, domain: &str) -> String {
        format!("https://web.archive.org/web/*/http://www.{}", strip_scheme(domain))
    }

    fn backlinks(&self, domain: &str) -> String {
        format!(
            "https://ahrefs.com/backlink-checker/?input={}&mode=subdomains",
            encode_uri_component(&strip_scheme(domain))
        )
    }
}

/// Percent-encode like JavaScript's `encodeURIComponent`
///
/// `urlencoding` leaves only `A-Z a-z 0-9 - _ . ~` alone; browsers also keep
/// `! * ' ( )` literal, so those are put back.
pub fn encode_uri_component(input: &str) -> String {
    urlencoding::encode(input)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}
