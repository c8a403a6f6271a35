use std::sync::OnceLock;

use regex::Regex;

use super::types::TeamMember;

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-–—:@]+").expect("separator pattern compiles"))
}

/// Lines made only of `-`, `=` or `*` (rules, underlines).
pub fn is_decorative(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| matches!(c, '-' | '=' | '*'))
}

pub fn is_url_line(line: &str) -> bool {
    let head: String = line.chars().take(8).collect::<String>().to_ascii_lowercase();
    head.starts_with("http://") || head.starts_with("https://")
}

/// Parse one trimmed credit line into a member; `None` when nothing usable remains.
pub fn parse_line(line: &str) -> Option<TeamMember> {
    let parts: Vec<&str> = separator_re()
        .split(line)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [] => None,
        [single] => match single.rfind(',') {
            Some(idx) => {
                let name = single[..idx].trim();
                if name.is_empty() { return None; }
                Some(TeamMember::new(name, single[idx + 1..].trim()))
            }
            None => Some(TeamMember::new(*single, "")),
        },
        [name, roles @ ..] => Some(TeamMember::new(*name, roles.join(", "))),
    }
}

/// Fold a team section into members, attaching bare URLs to a preceding
/// name-only entry.
pub fn parse_team_lines(section: &str) -> Vec<TeamMember> {
    let mut members: Vec<TeamMember> = Vec::new();
    for line in section.lines().map(str::trim) {
        if line.is_empty() || is_decorative(line) { continue; }

        if is_url_line(line) {
            if let Some(last) = members.last_mut() {
                if last.roles.is_empty() {
                    last.url = Some(line.to_string());
                    continue;
                }
            }
        }

        if let Some(member) = parse_line(line) { members.push(member); }
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_dash_roles() {
        let m = parse_line("rené habermann - direction, game design").unwrap();
        assert_eq!(m, TeamMember::new("rené habermann", "direction, game design"));
    }

    #[test]
    fn every_separator_kind_splits() {
        assert_eq!(parse_line("ann: art").unwrap().roles, "art");
        assert_eq!(parse_line("ann @ art").unwrap().roles, "art");
        assert_eq!(parse_line("ann – art").unwrap().roles, "art");
        assert_eq!(parse_line("ann — art").unwrap().roles, "art");
        assert_eq!(parse_line("ann -- art").unwrap().roles, "art");
    }

    #[test]
    fn extra_parts_join_into_roles() {
        let m = parse_line("bob - code - music").unwrap();
        assert_eq!(m, TeamMember::new("bob", "code, music"));
    }

    #[test]
    fn hyphenated_names_are_split() {
        let m = parse_line("jean-luc - sound").unwrap();
        assert_eq!(m, TeamMember::new("jean", "luc, sound"));
    }

    #[test]
    fn last_comma_separates_roles_on_single_part() {
        let m = parse_line("ste, coding").unwrap();
        assert_eq!(m, TeamMember::new("ste", "coding"));
        let m = parse_line("ann, bob, art").unwrap();
        assert_eq!(m, TeamMember::new("ann, bob", "art"));
    }

    #[test]
    fn bare_name_has_no_roles() {
        assert_eq!(parse_line("shux").unwrap(), TeamMember::new("shux", ""));
    }

    #[test]
    fn separator_only_line_is_skipped() {
        assert_eq!(parse_line(":"), None);
        assert_eq!(parse_line("- @ -"), None);
        assert_eq!(parse_line(", art"), None);
    }

    #[test]
    fn decorative_lines() {
        assert!(is_decorative("==="));
        assert!(is_decorative("***"));
        assert!(is_decorative("-=*-"));
        assert!(!is_decorative(""));
        assert!(!is_decorative("-- ann --"));
    }

    #[test]
    fn url_detection_is_prefix_and_case_insensitive() {
        assert!(is_url_line("https://example.com"));
        assert!(is_url_line("HTTP://EXAMPLE.COM"));
        assert!(!is_url_line("site: https://example.com"));
        assert!(!is_url_line("ftp://example.com"));
    }

    #[test]
    fn url_attaches_to_name_only_member() {
        let got = parse_team_lines("Shux\nhttps://example.com");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "Shux");
        assert_eq!(got[0].roles, "");
        assert_eq!(got[0].url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn url_after_member_with_roles_becomes_member() {
        let got = parse_team_lines("ann - art\nhttps://ann.itch.io");
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].url, None);
        assert_eq!(got[1], TeamMember::new("https", "//ann.itch.io"));
    }

    #[test]
    fn leading_url_becomes_member() {
        let got = parse_team_lines("https://x.io");
        assert_eq!(got, vec![TeamMember::new("https", "//x.io")]);
    }

    #[test]
    fn decorative_lines_do_not_break_fold() {
        let got = parse_team_lines("ann - art\n===\n***\nbob\nhttps://bob.dev\n  \ncid - code");
        assert_eq!(got.len(), 3);
        assert_eq!(got[0].name, "ann");
        assert_eq!(got[1].name, "bob");
        assert_eq!(got[1].url.as_deref(), Some("https://bob.dev"));
        assert_eq!(got[2], TeamMember::new("cid", "code"));
    }

    #[test]
    fn duplicates_are_preserved_in_order() {
        let got = parse_team_lines("ann - art\nann - art");
        assert_eq!(got, vec![TeamMember::new("ann", "art"), TeamMember::new("ann", "art")]);
    }
}
