use std::collections::HashSet;

use crate::document::RouterConfig;

/// Normalize a document's sections.
///
/// Blank placeholder lines are dropped and repeated command lines inside a
/// section are collapsed onto their first occurrence. Comment lines are
/// kept as written, since header blocks legitimately repeat separators.
/// Section keys and the relative order of surviving lines are untouched,
/// and running the shortener twice gives the same result as running it once.
pub fn command_shortener(doc: &RouterConfig) -> RouterConfig {
    doc.clone().map_sections(|_, lines| shorten_lines(lines))
}

fn shorten_lines(lines: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| is_comment(line) || seen.insert(normalize_command(line)))
        .collect()
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Canonical text of a command: continuations joined, whitespace runs
/// collapsed. Text inside double quotes is kept verbatim, `\"` does not
/// close a quoted value.
pub fn normalize_command(line: &str) -> String {
    let joined = line.replace("\\\r\n", " ").replace("\\\n", " ");
    let mut out = String::with_capacity(joined.len());
    let mut quoted = false;
    let mut escaped = false;
    let mut gap = false;
    for ch in joined.trim().chars() {
        if quoted {
            out.push(ch);
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => quoted = false,
                _ => {}
            }
            continue;
        }
        if ch.is_whitespace() {
            gap = true;
            continue;
        }
        if gap {
            out.push(' ');
            gap = false;
        }
        if ch == '"' {
            quoted = true;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{command_shortener, normalize_command};
    use crate::document::RouterConfig;

    #[test]
    fn continuation_lines_normalize_to_one_command() {
        assert_eq!(
            normalize_command("add name=a \\\n    ranges=10.0.0.2-10.0.0.254"),
            "add name=a ranges=10.0.0.2-10.0.0.254"
        );
    }

    #[test]
    fn quoted_whitespace_is_significant() {
        assert_eq!(
            normalize_command("add  name=\"john  doe\"   profile=p"),
            "add name=\"john  doe\" profile=p"
        );
        assert_eq!(
            normalize_command(r#"add comment="say \"hi  there\""   x=1"#),
            r#"add comment="say \"hi  there\"" x=1"#
        );
    }

    #[test]
    fn keeps_repeated_comments() {
        let doc = RouterConfig::from_sections([("", ["# ----", "# title", "# ----"])]);
        let short = command_shortener(&doc);
        assert_eq!(short.get("").map(<[String]>::len), Some(3));
    }

    #[test]
    fn keeps_sections_emptied_by_blank_removal() {
        let doc = RouterConfig::from_sections([("/ip route", ["", "   "])]);
        let short = command_shortener(&doc);
        assert_eq!(short.get("/ip route"), Some(&[][..]));
    }
}
