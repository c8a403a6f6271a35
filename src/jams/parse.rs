use std::collections::HashSet;

use anyhow::{anyhow, Result};
use scraper::{Html, Selector};
use url::Url;

/// Absolute URLs of every `h3 > a` link under `/jam/`, first-seen order,
/// duplicates dropped. Links are resolved against the listing page's origin.
pub fn jam_urls(html: &str, page: &Url) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse("h3 > a").map_err(|e| anyhow!("invalid selector: {e:?}"))?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for a in doc.select(&sel) {
        let Some(href) = a.value().attr("href") else { continue };
        if !href.starts_with("/jam/") { continue; }
        let Ok(abs) = page.join(href) else { continue };
        let abs = abs.to_string();
        if seen.insert(abs.clone()) { out.push(abs); }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn itch() -> Url { Url::parse("https://itch.io/jams/past").unwrap() }

    #[test]
    fn collects_jam_links_in_order() {
        let html = r#"
        <div class="jam"><h3><a href="/jam/gmtk-2024">GMTK 2024</a></h3></div>
        <div class="jam"><h3><a href="/jam/ludum-dare-55">LD 55</a></h3></div>
        "#;
        let got = jam_urls(html, &itch()).unwrap();
        assert_eq!(got, vec![
            "https://itch.io/jam/gmtk-2024".to_string(),
            "https://itch.io/jam/ludum-dare-55".to_string(),
        ]);
    }

    #[test]
    fn skips_non_jam_and_nested_links() {
        let html = r#"
        <h3><a href="/games/tag-jam">games</a></h3>
        <h3><a href="https://itch.io/jam/absolute">abs</a></h3>
        <h3><span><a href="/jam/nested">nested</a></span></h3>
        <h3><a>no href</a></h3>
        <h2><a href="/jam/not-h3">h2</a></h2>
        "#;
        assert!(jam_urls(html, &itch()).unwrap().is_empty());
    }

    #[test]
    fn duplicates_keep_first_position() {
        let html = r#"
        <h3><a href="/jam/b">b</a></h3>
        <h3><a href="/jam/a">a</a></h3>
        <h3><a href="/jam/b">b again</a></h3>
        "#;
        let got = jam_urls(html, &itch()).unwrap();
        assert_eq!(got, vec!["https://itch.io/jam/b".to_string(), "https://itch.io/jam/a".to_string()]);
    }

    #[test]
    fn empty_page_lists_nothing() {
        assert!(jam_urls("<html></html>", &itch()).unwrap().is_empty());
    }
}
