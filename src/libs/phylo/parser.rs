use super::error::TreeError;
use super::node::NodeId;
use super::tree::Tree;
use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while},
    character::complete::{char, digit1, multispace0},
    combinator::{cut, map, map_res, opt, recognize},
    error::{context, ContextError, ErrorKind, FromExternalError, ParseError},
    multi::{many1, separated_list1},
    sequence::{delimited, preceded},
    IResult, Offset, Parser,
};
use std::collections::BTreeMap;

// ================================================================================================
// Error Handling Structures
// ================================================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DetailedErrorKind {
    Context(&'static str),
    Nom(ErrorKind),
}

/// nom error type that accumulates context, so a failed parse can be
/// reported with the innermost construct that was being read.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailedError<'a> {
    pub errors: Vec<(&'a str, DetailedErrorKind)>,
}

impl<'a> ParseError<&'a str> for DetailedError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        DetailedError {
            errors: vec![(input, DetailedErrorKind::Nom(kind))],
        }
    }

    fn append(input: &'a str, kind: ErrorKind, mut other: Self) -> Self {
        other.errors.push((input, DetailedErrorKind::Nom(kind)));
        other
    }
}

impl<'a> ContextError<&'a str> for DetailedError<'a> {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.errors.push((input, DetailedErrorKind::Context(ctx)));
        other
    }
}

impl<'a, E> FromExternalError<&'a str, E> for DetailedError<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _e: E) -> Self {
        DetailedError {
            errors: vec![(input, DetailedErrorKind::Nom(kind))],
        }
    }
}

// ================================================================================================
// Intermediate Structure
// ================================================================================================

/// What a `[...]` block after a label or length turned out to be.
#[derive(Debug, PartialEq)]
enum Comment {
    /// `[&&NHX:k=v:...]` or `[k=v k2=v2]`
    Properties(BTreeMap<String, String>),
    /// A bare number, as written by tools that put support in brackets: `:0.8[65]`
    Support(f64),
    /// Anything else, ignored
    Other,
}

/// Recursive node built while parsing, flattened into the arena afterwards.
#[derive(Debug, Default)]
struct ParsedNode {
    name: Option<String>,
    length: Option<f64>,
    support: Option<f64>,
    properties: Option<BTreeMap<String, String>>,
    children: Vec<ParsedNode>,
}

impl ParsedNode {
    fn absorb(&mut self, comment: Comment) {
        match comment {
            Comment::Properties(props) => {
                self.properties
                    .get_or_insert_with(BTreeMap::new)
                    .extend(props);
            }
            Comment::Support(value) => self.support = Some(value),
            Comment::Other => {}
        }
    }

    /// Move this node and its descendants into `tree`, returning the new ID.
    /// Parents get smaller IDs than their children.
    fn into_tree(self, tree: &mut Tree) -> NodeId {
        let id = tree.add_node();
        if let Some(node) = tree.get_node_mut(id) {
            node.name = self.name;
            node.length = self.length;
            node.support = self.support;
            node.properties = self.properties;
        }
        for child in self.children {
            let child_id = child.into_tree(tree);
            // Both IDs are fresh, so linking cannot fail
            let linked = tree.add_child(id, child_id);
            debug_assert!(linked.is_ok(), "failed to link fresh node {}", child_id);
        }
        id
    }
}

// ================================================================================================
// Parsers
// ================================================================================================

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

// Unquoted labels stop at Newick structural characters.
// Quoted labels use doubled quotes as escapes: 'O''Brien' -> O'Brien
fn parse_label(input: &str) -> IResult<&str, String, DetailedError<'_>> {
    let unquoted = map(
        take_while(|c: char| !"():;,[]".contains(c)),
        |s: &str| s.trim().to_string(),
    );

    let single_quoted = delimited(
        char('\''),
        map(is_not("'"), |s: &str| s.replace("''", "'")),
        char('\''),
    );

    let double_quoted = delimited(
        char('"'),
        map(is_not("\""), |s: &str| s.replace("\"\"", "\"")),
        char('"'),
    );

    context("label", alt((single_quoted, double_quoted, unquoted))).parse(input)
}

fn parse_number(input: &str) -> IResult<&str, f64, DetailedError<'_>> {
    map_res(
        recognize((
            opt(char('-')),
            digit1,
            opt((char('.'), digit1)),
            opt((
                alt((char('e'), char('E'))),
                opt(alt((char('+'), char('-')))),
                digit1,
            )),
        )),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

fn parse_length(input: &str) -> IResult<&str, f64, DetailedError<'_>> {
    // `cut` after ':' reports "expected float" instead of backtracking
    context("length", preceded(ws(char(':')), cut(parse_number))).parse(input)
}

fn classify_comment(content: &str) -> Comment {
    let content = content.trim();

    if let Ok(value) = content.parse::<f64>() {
        return Comment::Support(value);
    }

    let mut props = BTreeMap::new();
    if let Some(nhx) = content.strip_prefix("&&NHX") {
        for part in nhx.split(':') {
            if let Some((k, v)) = part.split_once('=') {
                props.insert(k.to_string(), v.to_string());
            } else if !part.is_empty() {
                props.insert(part.to_string(), String::new());
            }
        }
    } else {
        for part in content.split_whitespace() {
            if let Some((k, v)) = part.split_once('=') {
                props.insert(k.to_string(), v.to_string());
            }
        }
    }

    if props.is_empty() {
        Comment::Other
    } else {
        Comment::Properties(props)
    }
}

fn parse_comment(input: &str) -> IResult<&str, Option<Comment>, DetailedError<'_>> {
    let comment_content = delimited(ws(char('[')), is_not("]"), char(']'));

    context(
        "comment",
        map(opt(comment_content), |content: Option<&str>| {
            content.map(classify_comment)
        }),
    )
    .parse(input)
}

// (child1, child2, ...)Label:Length[Comment]
fn parse_subtree(input: &str) -> IResult<&str, ParsedNode, DetailedError<'_>> {
    let (input, children) = context(
        "children",
        opt(delimited(
            ws(char('(')),
            separated_list1(ws(char(',')), parse_subtree),
            ws(char(')')),
        )),
    )
    .parse(input)?;

    let (input, label) = opt(parse_label).parse(input)?;

    // Comments may come before or after the length
    let (input, comment1) = parse_comment(input)?;
    let (input, length) = opt(parse_length).parse(input)?;
    let (input, comment2) = parse_comment(input)?;

    let mut node = ParsedNode {
        children: children.unwrap_or_default(),
        name: label.filter(|l| !l.is_empty()),
        length,
        ..Default::default()
    };
    for comment in [comment1, comment2].into_iter().flatten() {
        node.absorb(comment);
    }

    Ok((input, node))
}

// ================================================================================================
// Entry Points
// ================================================================================================

/// Parses a single Newick tree string terminated by ';'.
pub fn parse_newick(input: &str) -> Result<Tree, TreeError> {
    let mut parser = (ws(parse_subtree), ws(char(';')));

    match parser.parse(input) {
        Ok((_, (root_node, _))) => Ok(build_tree(root_node)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(make_tree_error(input, e)),
        Err(nom::Err::Incomplete(_)) => Err(incomplete()),
    }
}

/// Parses every tree in a string. Top-level `[...]` blocks between trees
/// (file headers, Nexus leftovers) are skipped.
pub fn parse_newick_multi(input: &str) -> Result<Vec<Tree>, TreeError> {
    let valid_tree = map((ws(parse_subtree), ws(char(';'))), |(root, _)| Some(root));
    let garbage = map(
        ws(delimited(char('['), take_while(|c| c != ']'), char(']'))),
        |_| None,
    );

    let mut parser = many1(alt((valid_tree, garbage)));

    match parser.parse(input) {
        Ok((_, roots)) => Ok(roots.into_iter().flatten().map(build_tree).collect()),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(make_tree_error(input, e)),
        Err(nom::Err::Incomplete(_)) => Err(incomplete()),
    }
}

fn build_tree(root_node: ParsedNode) -> Tree {
    let mut tree = Tree::new();
    let root_id = root_node.into_tree(&mut tree);
    tree.set_root(root_id);
    tree
}

fn incomplete() -> TreeError {
    TreeError::ParseError {
        message: "Incomplete input".to_string(),
        line: 0,
        column: 0,
        snippet: String::new(),
    }
}

fn make_tree_error(input: &str, e: DetailedError) -> TreeError {
    let remaining = e.errors.first().map(|(rest, _)| *rest).unwrap_or(input);
    let offset = input.offset(remaining);

    let prefix = &input[..offset];
    let line = prefix.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = prefix.rfind('\n').map(|p| p + 1).unwrap_or(0);
    let column = offset - last_newline + 1;

    let mut message = String::new();
    for (_, kind) in e.errors.iter().rev() {
        match kind {
            DetailedErrorKind::Context(ctx) => {
                message.push_str(&format!("while parsing {}:\n", ctx));
            }
            DetailedErrorKind::Nom(k) => {
                message.push_str(&format!("  error: {:?}\n", k));
            }
        }
    }

    TreeError::ParseError {
        message,
        line,
        column,
        snippet: remaining.chars().take(50).collect(),
    }
}

impl Tree {
    /// Parse a Newick string into a Tree.
    ///
    /// # Example
    /// ```
    /// use domtree::libs::phylo::Tree;
    ///
    /// let tree = Tree::from_newick("((X_1,Y_1),(X_2,Y_2));").unwrap();
    /// assert_eq!(tree.len(), 7);
    ///
    /// assert!(Tree::from_newick("(A,B:oops);").is_err());
    /// ```
    pub fn from_newick(input: &str) -> Result<Self, TreeError> {
        parse_newick(input)
    }

    pub fn from_newick_multi(input: &str) -> Result<Vec<Self>, TreeError> {
        parse_newick_multi(input)
    }
}
