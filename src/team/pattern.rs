// Whole-text fallback scan for bios without a recognizable team section.
//
// Every line starting with a run of words yields a member, so ordinary prose
// lines come back as noise. Callers get best-effort output, not a filter.

use std::sync::OnceLock;

use regex::Regex;

use super::types::TeamMember;

const MEMBER_LINE: &str = r"(?i)(?:^|\n)\s*([a-zà-öø-ÿ][a-zà-öø-ÿ'-]+(?:[^\S\n]+[a-zà-öø-ÿ][a-zà-öø-ÿ'-]+)*)[^\S\n]*[-–—:@]*[^\S\n]*([^\n]+)";

fn member_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MEMBER_LINE).expect("member line pattern compiles"))
}

pub fn scan_members(text: &str) -> Vec<TeamMember> {
    member_line_re()
        .captures_iter(text)
        .map(|caps| TeamMember::new(caps[1].trim(), caps[2].trim()))
        .collect()
}
