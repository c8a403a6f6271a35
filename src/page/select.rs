use anyhow::{anyhow, Result};
use scraper::{Html, Selector};

/// Text content of every element matched by each selector, selector order
/// first, then document order, joined with newlines.
pub fn select_text(html: &str, selectors: &[&str]) -> Result<String> {
    let doc = Html::parse_document(html);
    let mut out: Vec<String> = Vec::new();
    for sel_str in selectors {
        let sel = Selector::parse(sel_str).map_err(|e| anyhow!("invalid selector {sel_str:?}: {e:?}"))?;
        for node in doc.select(&sel) {
            out.push(node.text().collect::<String>());
        }
    }
    Ok(out.join("\n"))
}
