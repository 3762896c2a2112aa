//! Parser for the path expression language.
//!
//! Parsing happens in two stages. A small state machine first splits the
//! input into raw segments, deciding for each one whether it follows a `//`
//! run. Each segment is then parsed into a [`Step`] with `nom` combinators.

use crate::ast::{LocationPath, NodeTest, Predicate, Step};
use crate::error::PathError;
use nom::{
    IResult, Parser,
    bytes::complete::take_till,
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, opt, recognize, rest},
    sequence::{pair, preceded, separated_pair},
};
use std::str::FromStr;

// --- Main Public Parser ---

/// Parses a path expression such as `//ul/li[1]` or `/div/span[@class='a']`.
///
/// The whole expression is validated before anything is returned, so a
/// caller never sees a partially parsed path.
pub fn parse_path(input: &str) -> Result<LocationPath, PathError> {
    let steps = tokenize(input)
        .into_iter()
        .map(|segment| parse_step(segment.text, segment.recursive))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LocationPath::new(steps))
}

impl FromStr for LocationPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}

// --- Tokenizer ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawSegment<'a> {
    text: &'a str,
    recursive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing consumed yet. A single leading `/` is only the absolute anchor.
    Start,
    AfterSlash,
    /// Two or more consecutive slashes: the next segment is a descendant step.
    AfterDoubleSlash,
    InSegment {
        start: usize,
        recursive: bool,
    },
    /// Inside `[...]`, where `/` does not split and a quoted value may hold `]`.
    InPredicate {
        start: usize,
        recursive: bool,
        quote: Option<char>,
    },
}

fn tokenize(input: &str) -> Vec<RawSegment<'_>> {
    let mut segments = Vec::new();
    let mut state = State::Start;

    for (i, c) in input.char_indices() {
        state = match (state, c) {
            (State::Start, '/') => State::AfterSlash,
            (State::AfterSlash | State::AfterDoubleSlash, '/') => State::AfterDoubleSlash,
            (State::Start | State::AfterSlash, _) => open_segment(i, c, false),
            (State::AfterDoubleSlash, _) => open_segment(i, c, true),

            (State::InSegment { start, recursive }, '/') => {
                segments.push(RawSegment {
                    text: &input[start..i],
                    recursive,
                });
                State::AfterSlash
            }
            (State::InSegment { start, recursive }, '[') => State::InPredicate {
                start,
                recursive,
                quote: None,
            },
            (s @ State::InSegment { .. }, _) => s,

            (
                State::InPredicate {
                    start,
                    recursive,
                    quote: None,
                },
                ']',
            ) => State::InSegment { start, recursive },
            (
                State::InPredicate {
                    start,
                    recursive,
                    quote: None,
                },
                '\'' | '"',
            ) if input[..i].ends_with('=') => State::InPredicate {
                start,
                recursive,
                quote: Some(c),
            },
            (
                State::InPredicate {
                    start,
                    recursive,
                    quote: Some(q),
                },
                _,
            ) if c == q => State::InPredicate {
                start,
                recursive,
                quote: None,
            },
            (s @ State::InPredicate { .. }, _) => s,
        };
    }

    // Trailing slashes leave the machine in a slash state and add nothing.
    match state {
        State::InSegment { start, recursive } | State::InPredicate { start, recursive, .. } => {
            segments.push(RawSegment {
                text: &input[start..],
                recursive,
            });
        }
        State::Start | State::AfterSlash | State::AfterDoubleSlash => {}
    }
    segments
}

fn open_segment(start: usize, c: char, recursive: bool) -> State {
    if c == '[' {
        State::InPredicate {
            start,
            recursive,
            quote: None,
        }
    } else {
        State::InSegment { start, recursive }
    }
}

// --- Segment Parsers ---

/// Splits `tag[body` into the tag and everything after the first `[`.
fn segment_parts(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    pair(take_till(|c: char| c == '['), opt(preceded(char('['), rest))).parse(input)
}

/// `@key=value`, with the value still carrying its quotes.
fn attribute_predicate(input: &str) -> IResult<&str, (&str, &str)> {
    preceded(
        char('@'),
        separated_pair(take_till(|c: char| c == '='), char('='), rest),
    )
    .parse(input)
}

fn index_literal(input: &str) -> IResult<&str, &str> {
    all_consuming(recognize(pair(opt(one_of("+-")), digit1))).parse(input)
}

fn parse_step(segment: &str, recursive: bool) -> Result<Step, PathError> {
    let (_, (tag, body)) =
        segment_parts(segment).map_err(|e| PathError::malformed(segment, &e.to_string()))?;

    if tag.is_empty() {
        return Err(PathError::MissingTag(segment.to_string()));
    }

    let node_test = if tag == "*" {
        NodeTest::Wildcard
    } else {
        NodeTest::Name(tag.to_string())
    };

    let predicate = match body {
        None => None,
        Some(body) => {
            let inner = body
                .strip_suffix(']')
                .ok_or_else(|| PathError::malformed(segment, "unclosed '['"))?;
            Some(parse_predicate(segment, inner)?)
        }
    };

    Ok(Step {
        node_test,
        recursive,
        predicate,
    })
}

fn parse_predicate(segment: &str, inner: &str) -> Result<Predicate, PathError> {
    if inner.starts_with('@') {
        let (_, (key, raw_value)) = attribute_predicate(inner)
            .map_err(|_| PathError::malformed(segment, "attribute predicate requires '='"))?;
        if key.is_empty() {
            return Err(PathError::malformed(segment, "empty attribute name"));
        }
        return Ok(Predicate::Attribute {
            key: key.to_string(),
            value: unquote(raw_value).to_string(),
        });
    }

    let unsupported = || PathError::UnsupportedPredicate(inner.to_string());
    let (_, literal) = index_literal(inner).map_err(|_| unsupported())?;
    literal
        .parse::<i64>()
        .map(Predicate::Index)
        .map_err(|_| unsupported())
}

/// Strips one pair of matching quotes; anything else is taken verbatim.
fn unquote(raw: &str) -> &str {
    for quote in ['\'', '"'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(key: &str, value: &str) -> Predicate {
        Predicate::Attribute {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_parse_simple_path() {
        let path = parse_path("/div/span").unwrap();
        assert_eq!(
            path.steps,
            vec![
                Step::child(NodeTest::name("div")),
                Step::child(NodeTest::name("span")),
            ]
        );
    }

    #[test]
    fn test_parse_relative_path_matches_absolute() {
        assert_eq!(parse_path("div/span").unwrap(), parse_path("/div/span").unwrap());
    }

    #[test]
    fn test_parse_descendant() {
        let path = parse_path("//ul/li").unwrap();
        assert_eq!(
            path.steps,
            vec![
                Step::descendant(NodeTest::name("ul")),
                Step::child(NodeTest::name("li")),
            ]
        );

        let path = parse_path("/html//a").unwrap();
        assert!(!path.steps[0].recursive);
        assert!(path.steps[1].recursive);
    }

    #[test]
    fn test_parse_empty_paths() {
        for input in ["", "/", "//", "///"] {
            let path = parse_path(input).unwrap();
            assert!(path.is_empty(), "expected no steps for {:?}", input);
        }
    }

    #[test]
    fn test_parse_slash_runs_collapse() {
        assert_eq!(parse_path("a///b").unwrap(), parse_path("a//b").unwrap());
        assert_eq!(parse_path("////b").unwrap(), parse_path("//b").unwrap());
    }

    #[test]
    fn test_parse_trailing_slash_is_noop() {
        assert_eq!(parse_path("a/").unwrap(), parse_path("a").unwrap());
        assert_eq!(parse_path("/a/b//").unwrap(), parse_path("/a/b").unwrap());
    }

    #[test]
    fn test_parse_wildcard() {
        let path = parse_path("/div/*").unwrap();
        assert_eq!(path.steps[1].node_test, NodeTest::Wildcard);
    }

    #[test]
    fn test_parse_attribute_predicate_quote_styles() {
        for input in [
            "//span[@class='a']",
            "//span[@class=\"a\"]",
            "//span[@class=a]",
        ] {
            let path = parse_path(input).unwrap();
            assert_eq!(path.steps[0].predicate, Some(attr("class", "a")), "{}", input);
        }
    }

    #[test]
    fn test_parse_attribute_predicate_keeps_mismatched_quotes() {
        let path = parse_path("a[@x='b\"]").unwrap();
        assert_eq!(path.steps[0].predicate, Some(attr("x", "'b\"")));

        let path = parse_path("a[@x=']").unwrap();
        assert_eq!(path.steps[0].predicate, Some(attr("x", "'")));
    }

    #[test]
    fn test_parse_attribute_value_may_contain_equals_and_slash() {
        let path = parse_path("//a[@href='/x?a=b']/img").unwrap();
        assert_eq!(path.steps.len(), 2);
        assert_eq!(path.steps[0].predicate, Some(attr("href", "/x?a=b")));
        assert_eq!(path.steps[1], Step::child(NodeTest::name("img")));
    }

    #[test]
    fn test_parse_quoted_value_may_contain_bracket() {
        let path = parse_path("a[@title='x]y']/b").unwrap();
        assert_eq!(path.steps.len(), 2);
        assert_eq!(path.steps[0].predicate, Some(attr("title", "x]y")));
    }

    #[test]
    fn test_parse_empty_attribute_value() {
        let path = parse_path("a[@x='']").unwrap();
        assert_eq!(path.steps[0].predicate, Some(attr("x", "")));
    }

    #[test]
    fn test_parse_numeric_predicate() {
        let path = parse_path("//ul/li[1]").unwrap();
        assert_eq!(path.steps[1].predicate, Some(Predicate::Index(1)));
        assert_eq!(path.steps[1].index(), Some(1));

        let path = parse_path("li[+2]").unwrap();
        assert_eq!(path.steps[0].index(), Some(2));

        let path = parse_path("li[-1]").unwrap();
        assert_eq!(path.steps[0].index(), Some(-1));
    }

    #[test]
    fn test_parse_unclosed_bracket() {
        let err = parse_path("tag[").unwrap_err();
        assert!(matches!(err, PathError::MalformedPredicate { .. }), "{:?}", err);

        let err = parse_path("/div/tag[@a='b'").unwrap_err();
        assert!(matches!(err, PathError::MalformedPredicate { .. }), "{:?}", err);
    }

    #[test]
    fn test_parse_attribute_without_equals() {
        let err = parse_path("tag[@x]").unwrap_err();
        assert_eq!(
            err,
            PathError::MalformedPredicate {
                segment: "tag[@x]".to_string(),
                reason: "attribute predicate requires '='".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_attribute_without_name() {
        let err = parse_path("tag[@=x]").unwrap_err();
        assert!(matches!(err, PathError::MalformedPredicate { .. }), "{:?}", err);
    }

    #[test]
    fn test_parse_unsupported_predicates() {
        for (input, content) in [
            ("tag[foo]", "foo"),
            ("tag[]", ""),
            ("tag[1.5]", "1.5"),
            ("tag[ 1]", " 1"),
            ("tag[position()=1]", "position()=1"),
            ("tag[1][2]", "1][2"),
            ("tag[99999999999999999999]", "99999999999999999999"),
        ] {
            assert_eq!(
                parse_path(input).unwrap_err(),
                PathError::UnsupportedPredicate(content.to_string()),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_parse_text_after_bracket_is_malformed() {
        let err = parse_path("tag[1]x").unwrap_err();
        assert!(matches!(err, PathError::MalformedPredicate { .. }), "{:?}", err);
    }

    #[test]
    fn test_parse_missing_tag() {
        assert_eq!(
            parse_path("/[1]").unwrap_err(),
            PathError::MissingTag("[1]".to_string())
        );
        assert_eq!(
            parse_path("a//[@x=y]").unwrap_err(),
            PathError::MissingTag("[@x=y]".to_string())
        );
    }

    #[test]
    fn test_parse_error_anywhere_fails_whole_path() {
        assert!(parse_path("/div/span/tag[foo]/p").is_err());
    }

    #[test]
    fn test_from_str_round_trips_canonical_form() {
        let path: LocationPath = "div//span[@class=a]/*[2]".parse().unwrap();
        assert_eq!(path.to_string(), "/div//span[@class='a']/*[2]");
        assert_eq!(path.to_string().parse::<LocationPath>().unwrap(), path);
    }
}
