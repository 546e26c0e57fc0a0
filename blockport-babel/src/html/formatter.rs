//! Tag formatting (content -> `<tag attr="value">content</tag>`)

use serde_json::{Number, Value};

/// An attribute value, written as a double-quoted literal
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(Number),
}

impl AttrValue {
    /// Attribute value for a JSON scalar; `null`, booleans and containers have none
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(AttrValue::Text(text.clone())),
            Value::Number(number) => Some(AttrValue::Number(number.clone())),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Number(Number::from(value))
    }
}

/// Wrap `content` in `tag`, writing `attrs` in the given order
///
/// `content` is inserted as-is; callers escape text before wrapping it.
pub fn wrap_in_html(tag: &str, attrs: Option<&[(&str, AttrValue)]>, content: &str) -> String {
    let mut html = String::with_capacity(content.len() + tag.len() * 2 + 5);
    html.push('<');
    html.push_str(tag);
    for (name, value) in attrs.unwrap_or_default() {
        html.push(' ');
        html.push_str(name);
        html.push_str("=\"");
        match value {
            AttrValue::Text(text) => {
                html.push_str(&html_escape::encode_double_quoted_attribute(text))
            }
            AttrValue::Number(number) => html.push_str(&number.to_string()),
        }
        html.push('"');
    }
    html.push('>');
    html.push_str(content);
    html.push_str("</");
    html.push_str(tag);
    html.push('>');
    html
}

/// Escape span text for an HTML text context
pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}
