use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"https?://[^\s)"]+"#).expect("link pattern compiles"))
}

/// Every http(s) link in a game body, first-seen order, duplicates dropped.
/// A link stops at whitespace, `)` or `"`, so markdown and HTML wrappers are cut off.
pub fn extract_unique_links(text: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    link_re()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|link| seen.insert(*link))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_and_html_wrappers_are_cut() {
        let body = r#"Play it [here](https://ldjam.com/x) or <a href="http://itch.io/y">itch</a>."#;
        assert_eq!(extract_unique_links(body), vec!["https://ldjam.com/x", "http://itch.io/y"]);
    }

    #[test]
    fn duplicates_keep_first_position() {
        let body = "https://a.io/1 https://b.io/2\nhttps://a.io/1";
        assert_eq!(extract_unique_links(body), vec!["https://a.io/1", "https://b.io/2"]);
    }

    #[test]
    fn bare_scheme_and_other_protocols_are_ignored() {
        assert!(extract_unique_links("ftp://files.io/a and https:// alone").is_empty());
        assert!(extract_unique_links("").is_empty());
    }

    #[test]
    fn trailing_punctuation_other_than_paren_stays() {
        assert_eq!(extract_unique_links("see https://a.io/x."), vec!["https://a.io/x."]);
    }
}
