//! Container line parsing: `:::name info {attrs}` and `:::`.

use super::DirectiveArgs;

/// A parsed container line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContainerLine {
    /// Container opening: `:::name info {attrs}` or `:::name[info]{attrs}`
    Start {
        name: String,
        args: DirectiveArgs,
        colon_count: usize,
    },
    /// Container closing: `:::`
    End { colon_count: usize },
}

/// Parse a whole line as a container marker.
///
/// Returns `None` if the line is not a container marker. Markers indented
/// four or more columns are indented code.
pub(crate) fn parse_container_line(line: &str) -> Option<ContainerLine> {
    if indent_columns(line) >= 4 {
        return None;
    }
    let trimmed = line.trim();

    if !trimmed.starts_with(":::") {
        return None;
    }

    let colon_count = trimmed.chars().take_while(|&c| c == ':').count();
    let after_colons = trimmed[colon_count..].trim_start();

    if after_colons.is_empty() {
        return Some(ContainerLine::End { colon_count });
    }

    // Name ends at [, { or whitespace
    let name_end = after_colons
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(after_colons.len());

    let name = &after_colons[..name_end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let after_name = &after_colons[name_end..];
    let (content, rest) = match parse_brackets(after_name) {
        Some((content, consumed)) => (content.trim(), &after_name[consumed..]),
        None => split_trailing_braces(after_name),
    };

    let attrs_str = match parse_braces(rest.trim_start()) {
        Some((attrs, _)) => attrs,
        None => "",
    };

    Some(ContainerLine::Start {
        name: name.to_owned(),
        args: DirectiveArgs::parse(content, attrs_str),
        colon_count,
    })
}

/// Leading indentation width, with tabs advancing to the next multiple of four.
fn indent_columns(line: &str) -> usize {
    let mut columns = 0;
    for c in line.chars() {
        match c {
            ' ' => columns += 1,
            '\t' => columns += 4 - columns % 4,
            _ => break,
        }
    }
    columns
}

/// Valid names contain only alphanumeric characters, hyphens, and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Split free-form info text from a trailing `{attrs}` block.
///
/// Returns (trimmed info, remainder starting at the brace block or empty).
fn split_trailing_braces(s: &str) -> (&str, &str) {
    let trimmed = s.trim_end();
    if trimmed.ends_with('}')
        && let Some(open) = trimmed.rfind('{')
    {
        return (trimmed[..open].trim(), &trimmed[open..]);
    }
    (trimmed.trim(), "")
}

/// Parse content from brackets: `[content]`
///
/// Returns (content, `bytes_consumed`).
fn parse_brackets(s: &str) -> Option<(&str, usize)> {
    delimited(s, '[', ']')
}

/// Parse attributes from braces: `{#id .class key="value"}`
///
/// Returns (`attrs_str` without braces, `bytes_consumed`).
fn parse_braces(s: &str) -> Option<(&str, usize)> {
    delimited(s, '{', '}')
}

fn delimited(s: &str, open: char, close: char) -> Option<(&str, usize)> {
    if !s.starts_with(open) {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((&s[1..i], i + 1));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn start(line: &str) -> (String, DirectiveArgs, usize) {
        match parse_container_line(line) {
            Some(ContainerLine::Start {
                name,
                args,
                colon_count,
            }) => (name, args, colon_count),
            other => panic!("expected container start, got {other:?}"),
        }
    }

    #[test]
    fn test_container_end() {
        assert_eq!(
            parse_container_line(":::"),
            Some(ContainerLine::End { colon_count: 3 })
        );
        assert_eq!(
            parse_container_line("  ::::  "),
            Some(ContainerLine::End { colon_count: 4 })
        );
    }

    #[test]
    fn test_name_without_info() {
        let (name, args, colons) = start(":::tip");
        assert_eq!(name, "tip");
        assert_eq!(args.content, "");
        assert_eq!(colons, 3);
    }

    #[test]
    fn test_info_after_space() {
        let (name, args, _) = start("::: warning   Be careful  ");
        assert_eq!(name, "warning");
        assert_eq!(args.content, "Be careful");
    }

    #[test]
    fn test_bracket_info() {
        let (name, args, _) = start(":::details[Click me]{#more .wide}");
        assert_eq!(name, "details");
        assert_eq!(args.content, "Click me");
        assert_eq!(args.id.as_deref(), Some("more"));
        assert_eq!(args.classes, vec!["wide"]);
    }

    #[test]
    fn test_trailing_attrs_after_info() {
        let (name, args, _) = start(":::code-group-item config.toml {.active}");
        assert_eq!(name, "code-group-item");
        assert_eq!(args.content, "config.toml");
        assert_eq!(args.classes, vec!["active"]);
    }

    #[test]
    fn test_indented_code_is_not_a_marker() {
        assert_eq!(parse_container_line("    ::: tip"), None);
        assert_eq!(parse_container_line("\t:::"), None);
        assert_eq!(parse_container_line("  \t:::"), None);
        let (name, _, _) = start("   ::: tip");
        assert_eq!(name, "tip");
    }

    #[test]
    fn test_not_a_container() {
        assert_eq!(parse_container_line("text ::: tip"), None);
        assert_eq!(parse_container_line("::tip"), None);
        assert_eq!(parse_container_line(":::!bad"), None);
    }
}
