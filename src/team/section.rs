// Team section location: header search + end-marker boundary.
//
// Headers and markers are ASCII, so searching an ASCII-lowercased copy keeps
// byte offsets valid for slicing the original text.

pub const TEAM_HEADERS: [&str; 3] = ["team", "made by", "credits"];

pub const SECTION_END_MARKERS: [&str; 10] = [
    "\n\n",
    "------------",
    "***",
    "---",
    "download",
    "soundtrack",
    "fonts:",
    "features:",
    "known bugs:",
    "controls",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderMatch {
    pub header: &'static str,
    pub start: usize,
}

impl HeaderMatch {
    /// Byte offset just past the header token.
    pub fn end(&self) -> usize { self.start + self.header.len() }
}

/// Earliest header occurrence; ties go to the header declared first.
pub fn locate_header(text: &str) -> Option<HeaderMatch> {
    let lower = text.to_ascii_lowercase();
    let mut best: Option<HeaderMatch> = None;
    for header in TEAM_HEADERS {
        let Some(start) = lower.find(header) else { continue };
        if best.is_none_or(|b| start < b.start) {
            best = Some(HeaderMatch { header, start });
        }
    }
    best
}

/// Index of the nearest end marker in `rest`, or `rest.len()` if none appears.
pub fn section_end(rest: &str) -> usize {
    let lower = rest.to_ascii_lowercase();
    SECTION_END_MARKERS
        .iter()
        .map(|m| lower.find(m).unwrap_or(rest.len()))
        .min()
        .unwrap_or(rest.len())
}

/// Trimmed team section, if a header exists and the bounded slice is non-empty.
pub fn find_section(text: &str) -> Option<&str> {
    let hit = locate_header(text)?;
    let rest = &text[hit.end()..];
    let section = rest[..section_end(rest)].trim();
    if section.is_empty() { None } else { Some(section) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_means_no_section() {
        assert_eq!(locate_header("a cozy puzzle game about frogs"), None);
        assert_eq!(find_section("a cozy puzzle game about frogs"), None);
    }

    #[test]
    fn header_search_ignores_case() {
        let hit = locate_header("Intro\nCREDITS\nbob - art").unwrap();
        assert_eq!(hit.header, "credits");
        assert_eq!(hit.start, 6);
    }

    #[test]
    fn earliest_header_wins_and_sets_offset() {
        // "team" is declared first but "credits" appears earlier in the text.
        let text = "credits:\nann - art\n\nthe team thanks you";
        let hit = locate_header(text).unwrap();
        assert_eq!(hit, HeaderMatch { header: "credits", start: 0 });
        assert_eq!(find_section(text), Some(":\nann - art"));
    }

    #[test]
    fn header_matches_inside_words() {
        let hit = locate_header("available on steam").unwrap();
        assert_eq!(hit.header, "team");
        assert_eq!(hit.start, 14);
    }

    #[test]
    fn nearest_marker_bounds_the_section() {
        assert_eq!(section_end("a\nb\n\nc --- d"), 3);
        assert_eq!(section_end("a --- b\n\nc"), 2);
        assert_eq!(section_end("no markers here"), 15);
    }

    #[test]
    fn download_truncates_mid_line() {
        let text = "made by: zoe - code Download the soundtrack";
        assert_eq!(find_section(text), Some(": zoe - code"));
    }

    #[test]
    fn markers_ignore_case() {
        assert_eq!(section_end("bob - art\nControls: wasd"), 10);
    }

    #[test]
    fn empty_bounded_slice_is_none() {
        assert_eq!(find_section("team\n\nann - art"), None);
        assert_eq!(find_section("credits   ---"), None);
    }

    #[test]
    fn header_at_end_of_text() {
        assert_eq!(find_section("thanks to the team"), None);
    }
}
