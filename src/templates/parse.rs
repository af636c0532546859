//! Template parser: turns source text into a tree of [`Node`]s.

use std::mem;

use super::error::TemplateError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Text(String),
    /// `{{ path }}`
    Value(String),
    /// `{{#each path}} body {{/each}}`
    Each { path: String, body: Vec<Node> },
    /// `{{#if path}} then {{else}} otherwise {{/if}}`
    If {
        path: String,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Each,
    If,
}

impl BlockKind {
    fn keyword(self) -> &'static str {
        match self {
            BlockKind::Each => "each",
            BlockKind::If => "if",
        }
    }
}

/// An open block waiting for its closing tag.
struct Frame {
    kind: BlockKind,
    path: String,
    offset: usize,
    /// Nodes of the enclosing scope, restored when the block closes.
    parent: Vec<Node>,
    /// The `then` branch once `{{else}}` has been seen.
    then: Option<Vec<Node>>,
}

pub(crate) fn parse(name: &str, source: &str) -> Result<Vec<Node>, TemplateError> {
    let error = |offset: usize, message: String| TemplateError::Parse {
        name: name.to_string(),
        offset,
        message,
    };

    let mut stack: Vec<Frame> = Vec::new();
    let mut current: Vec<Node> = Vec::new();
    let mut rest = source;
    let mut pos = 0;

    while let Some(start) = rest.find("{{") {
        push_text(&mut current, &rest[..start]);
        let open = pos + start;

        let inner = &rest[start + 2..];
        let end = inner
            .find("}}")
            .ok_or_else(|| error(open, "unclosed tag".into()))?;
        let tag = inner[..end].trim();

        if let Some(directive) = tag.strip_prefix('#') {
            let (keyword, path) = directive
                .split_once(char::is_whitespace)
                .map(|(k, p)| (k, p.trim()))
                .unwrap_or((directive, ""));
            let kind = match keyword {
                "each" => BlockKind::Each,
                "if" => BlockKind::If,
                other => return Err(error(open, format!("unknown block #{}", other))),
            };
            if !is_valid_path(path) {
                return Err(error(open, format!("invalid path {:?} in #{}", path, keyword)));
            }
            stack.push(Frame {
                kind,
                path: path.to_string(),
                offset: open,
                parent: mem::take(&mut current),
                then: None,
            });
        } else if let Some(keyword) = tag.strip_prefix('/') {
            let frame = stack
                .pop()
                .ok_or_else(|| error(open, format!("unexpected {{{{/{}}}}}", keyword)))?;
            if frame.kind.keyword() != keyword {
                return Err(error(
                    open,
                    format!(
                        "{{{{/{}}}}} closes {{{{#{}}}}} opened at byte {}",
                        keyword,
                        frame.kind.keyword(),
                        frame.offset
                    ),
                ));
            }
            let body = mem::replace(&mut current, frame.parent);
            let node = match frame.kind {
                BlockKind::Each => Node::Each {
                    path: frame.path,
                    body,
                },
                BlockKind::If => match frame.then {
                    Some(then) => Node::If {
                        path: frame.path,
                        then,
                        otherwise: body,
                    },
                    None => Node::If {
                        path: frame.path,
                        then: body,
                        otherwise: Vec::new(),
                    },
                },
            };
            current.push(node);
        } else if tag == "else" {
            match stack.last_mut() {
                Some(frame) if frame.kind == BlockKind::If && frame.then.is_none() => {
                    frame.then = Some(mem::take(&mut current));
                }
                _ => return Err(error(open, "{{else}} outside of {{#if}}".into())),
            }
        } else if is_valid_path(tag) {
            current.push(Node::Value(tag.to_string()));
        } else {
            return Err(error(open, format!("invalid tag {:?}", tag)));
        }

        let consumed = start + 2 + end + 2;
        rest = &rest[consumed..];
        pos += consumed;
    }
    push_text(&mut current, rest);

    if let Some(frame) = stack.pop() {
        return Err(error(
            frame.offset,
            format!("{{{{#{}}}}} is never closed", frame.kind.keyword()),
        ));
    }
    Ok(current)
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if !text.is_empty() {
        nodes.push(Node::Text(text.to_string()));
    }
}

/// Dotted identifier path, e.g. `book.title`.
fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && path.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
