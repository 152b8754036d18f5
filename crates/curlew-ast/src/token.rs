//! Directive classification.
//!
//! A trimmed directive body is matched against the directive forms in
//! priority order; the first form that matches wins.

const LOOP_OPEN: &str = "#loop";
const LOOP_CLOSE: &str = "/loop";
const IF_OPEN: &str = "#if";
const IF_CLOSE: &str = "/if";
const ALIAS_KEYWORD: &str = "as";

/// What a single `{{ ... }}` directive means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Directive<'a> {
    LoopOpen {
        target: &'a str,
        alias: &'a str,
        path: Vec<String>,
    },
    LoopClose,
    IfOpen {
        path: Vec<String>,
    },
    IfClose,
    Comment(&'a str),
    Accessor {
        expression: &'a str,
        path: Vec<String>,
    },
    Variable(&'a str),
    /// `/name` where `name` is not a block type.
    UnknownClose(&'a str),
}

/// Why a body could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Invalid {
    Empty,
    Malformed(&'static str),
}

pub(crate) fn classify(body: &str) -> Result<Directive<'_>, Invalid> {
    if body.is_empty() {
        return Err(Invalid::Empty);
    }

    if let Some(args) = keyword_arguments(body, LOOP_OPEN) {
        return match parse_loop(args) {
            Ok(directive) => Ok(directive),
            Err(_) if is_comment(body) => Ok(Directive::Comment(body)),
            Err(reason) => Err(Invalid::Malformed(reason)),
        };
    }
    if body == LOOP_CLOSE {
        return Ok(Directive::LoopClose);
    }
    if let Some(args) = keyword_arguments(body, IF_OPEN) {
        return match parse_if(args) {
            Ok(directive) => Ok(directive),
            Err(_) if is_comment(body) => Ok(Directive::Comment(body)),
            Err(reason) => Err(Invalid::Malformed(reason)),
        };
    }
    if body == IF_CLOSE {
        return Ok(Directive::IfClose);
    }
    if is_comment(body) {
        return Ok(Directive::Comment(body));
    }
    if body.starts_with('/') {
        return Ok(Directive::UnknownClose(body));
    }
    if body.contains('.') {
        return Ok(Directive::Accessor {
            expression: body,
            path: split_path(body),
        });
    }
    Ok(Directive::Variable(body))
}

/// The trimmed text after `keyword`, when `body` is the keyword alone or the
/// keyword followed by whitespace.
fn keyword_arguments<'a>(body: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = body.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn parse_loop(args: &str) -> Result<Directive<'_>, &'static str> {
    let (target, alias) = split_alias(args).ok_or("expected `#loop <path> as <alias>`")?;
    if !is_identifier(alias) {
        return Err("loop alias must be an identifier");
    }
    let path = parse_path(target).ok_or("invalid loop path")?;
    Ok(Directive::LoopOpen {
        target,
        alias,
        path,
    })
}

fn parse_if(args: &str) -> Result<Directive<'_>, &'static str> {
    if args.is_empty() {
        return Err("missing condition path");
    }
    let path = parse_path(args).ok_or("invalid condition path")?;
    Ok(Directive::IfOpen { path })
}

/// Split `<path> as <alias>` at the last standalone `as`.
fn split_alias(args: &str) -> Option<(&str, &str)> {
    let (head, alias) = args.rsplit_once(char::is_whitespace)?;
    let target = head.trim_end().strip_suffix(ALIAS_KEYWORD)?;
    if !target.ends_with(char::is_whitespace) {
        return None;
    }
    let target = target.trim();
    (!target.is_empty()).then_some((target, alias))
}

fn parse_path(text: &str) -> Option<Vec<String>> {
    let segments = split_path(text);
    if segments.iter().all(|segment| is_path_segment(segment)) {
        Some(segments)
    } else {
        None
    }
}

pub(crate) fn split_path(text: &str) -> Vec<String> {
    text.split('.').map(|s| s.trim().to_string()).collect()
}

fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '-'))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn is_comment(body: &str) -> bool {
    body.starts_with('#') && body.ends_with('#')
}
