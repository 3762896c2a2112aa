//! Argument handling and the query-and-print loop behind the `xp` binary.

use crate::VERSION;
use crate::error::XpError;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use xp_path::{LocationPath, parse_path};
use xp_source::{HtmlDocument, RenderMode, RenderNode, XmlDocument, render};

/// Print the nodes of an XML or HTML document that match a path expression.
///
/// Paths support `/tag`, `//tag`, `*`, `tag[@key='value']` and `tag[N]`.
#[derive(Parser, Debug)]
#[command(name = "xp", long_about = None)]
pub struct Args {
    /// Path expression, e.g. `//ul/li[1]`
    #[arg(required_unless_present = "version")]
    pub path: Option<String>,

    /// Read the document from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// How each matched node is printed
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markup)]
    pub format: OutputFormat,

    /// Which parser reads the document
    #[arg(short, long, value_enum, default_value_t = DocumentKind::Auto)]
    pub parser: DocumentKind,

    /// Shorthand for `--parser html`
    #[arg(long, default_value_t = false, conflicts_with = "parser")]
    pub html: bool,

    /// Print the parsed path to stderr before running the query
    #[arg(long, default_value_t = false)]
    pub explain: bool,

    /// Print version information and exit
    #[arg(short = 'v', visible_short_alias = 'V', long, default_value_t = false)]
    pub version: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The source markup of each match, one per line
    Markup,
    /// The text content of each match, one per line
    Text,
    /// A JSON array describing every match
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    /// HTML when the input opens with `<!DOCTYPE html` or `<html`, XML otherwise
    Auto,
    /// Strict XML; malformed input is an error
    Xml,
    /// Forgiving HTML; unclosed tags are repaired
    Html,
}

impl DocumentKind {
    /// Resolves `Auto` by looking at the start of the document.
    pub fn detect(self, text: &str) -> DocumentKind {
        match self {
            DocumentKind::Auto => {
                let head = text.trim_start_matches('\u{feff}').trim_start().as_bytes();
                let opens_with = |prefix: &str| {
                    head.get(..prefix.len())
                        .is_some_and(|start| start.eq_ignore_ascii_case(prefix.as_bytes()))
                };
                if opens_with("<!doctype html") || opens_with("<html") {
                    DocumentKind::Html
                } else {
                    DocumentKind::Xml
                }
            }
            kind => kind,
        }
    }
}

#[derive(Serialize)]
struct MatchRecord<'a> {
    tag: Option<&'a str>,
    attributes: BTreeMap<&'a str, &'a str>,
    text: String,
    markup: Cow<'a, str>,
}

impl<'a> MatchRecord<'a> {
    fn new<N: RenderNode<'a>>(node: &N) -> Self {
        Self {
            tag: node.tag(),
            attributes: node.attributes().collect(),
            text: render(node, RenderMode::Text),
            markup: node.markup(),
        }
    }
}

/// Runs one invocation of the tool.
///
/// The path is parsed before any input is read, so an invalid expression
/// fails without consuming stdin.
pub fn run<R, W, E>(args: &Args, mut stdin: R, out: &mut W, err: &mut E) -> Result<(), XpError>
where
    R: Read,
    W: Write,
    E: Write,
{
    if args.version {
        writeln!(out, "xp version {}", VERSION)?;
        return Ok(());
    }

    let raw_path = args.path.as_deref().ok_or(XpError::MissingPath)?;
    let path = parse_path(raw_path)?;
    if args.explain {
        writeln!(err, "{}", path)?;
    }

    let text = match &args.input {
        Some(file) => {
            debug!("Reading document from {}", file.display());
            fs::read_to_string(file)?
        }
        None => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            buf
        }
    };

    let requested = if args.html { DocumentKind::Html } else { args.parser };
    match requested.detect(&text) {
        DocumentKind::Html => {
            debug!("Reading input as HTML");
            let doc = HtmlDocument::parse(&text);
            print_matches(&path, doc.root_node(), args.format, out)
        }
        _ => {
            debug!("Reading input as XML");
            let doc = XmlDocument::parse(&text)?;
            print_matches(&path, doc.root_node(), args.format, out)
        }
    }
}

fn print_matches<'a, N, W>(
    path: &LocationPath,
    root: N,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), XpError>
where
    N: RenderNode<'a> + 'a,
    W: Write,
{
    let matches = path.select(root);
    info!("{} match(es) for '{}'", matches.len(), path);

    match format {
        OutputFormat::Markup => write_lines(out, &matches, RenderMode::Markup)?,
        OutputFormat::Text => write_lines(out, &matches, RenderMode::Text)?,
        OutputFormat::Json => {
            let records: Vec<_> = matches.iter().map(MatchRecord::new).collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_lines<'a, N: RenderNode<'a>, W: Write>(
    out: &mut W,
    nodes: &[N],
    mode: RenderMode,
) -> Result<(), XpError> {
    for node in nodes {
        writeln!(out, "{}", render(node, mode))?;
    }
    Ok(())
}
