use serde_json::Value;

use super::error::TemplateError;
use super::parse::Node;

/// Evaluate `nodes` against `data`, appending markup to `out`.
pub(crate) fn render(
    template: &str,
    nodes: &[Node],
    data: &Value,
    out: &mut String,
) -> Result<(), TemplateError> {
    let mut scopes = vec![data];
    render_nodes(template, nodes, &mut scopes, out)
}

fn render_nodes<'a>(
    template: &str,
    nodes: &[Node],
    scopes: &mut Vec<&'a Value>,
    out: &mut String,
) -> Result<(), TemplateError> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Value(path) => {
                let value = lookup(scopes, path).ok_or_else(|| TemplateError::MissingValue {
                    template: template.to_string(),
                    path: path.clone(),
                })?;
                write_value(out, value);
            }
            Node::Each { path, body } => {
                if let Some(Value::Array(items)) = lookup(scopes, path) {
                    for item in items {
                        scopes.push(item);
                        let result = render_nodes(template, body, scopes, out);
                        scopes.pop();
                        result?;
                    }
                }
            }
            Node::If {
                path,
                then,
                otherwise,
            } => {
                let branch = if lookup(scopes, path).is_some_and(is_truthy) {
                    then
                } else {
                    otherwise
                };
                render_nodes(template, branch, scopes, out)?;
            }
        }
    }
    Ok(())
}

/// Resolve a dotted path, innermost scope first. `this` is the innermost scope.
fn lookup<'a>(scopes: &[&'a Value], path: &str) -> Option<&'a Value> {
    if path == "this" {
        return scopes.last().copied();
    }
    scopes.iter().rev().find_map(|scope| {
        path.split('.')
            .try_fold(*scope, |value, segment| value.get(segment))
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => escape_into(out, s),
        other => escape_into(out, &other.to_string()),
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
