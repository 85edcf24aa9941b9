//! KeyValues (VDF) text reader.
//!
//! Only what `steamcmd +app_info_print` emits is supported: quoted or bare
//! tokens, nested `{ }` sections, `//` line comments and backslash escapes.

use crate::error::{Result, VentsError};

/// A value in a KeyValues tree.
#[derive(Debug, Clone, PartialEq)]
pub enum KvValue {
    String(String),
    Section(Vec<(String, KvValue)>),
}

impl KvValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KvValue::String(s) => Some(s.as_str()),
            KvValue::Section(_) => None,
        }
    }

    /// Look up a child by key. A repeated key resolves to its last occurrence.
    pub fn get(&self, key: &str) -> Option<&KvValue> {
        match self {
            KvValue::Section(entries) => entries
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            KvValue::String(_) => None,
        }
    }

    /// Follow a path of keys from this value.
    pub fn get_path(&self, path: &[&str]) -> Option<&KvValue> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Text(String),
}

/// Parse KeyValues text into a root section.
pub fn parse_keyvalues(source: &str) -> Result<KvValue> {
    let tokens = tokenize(source)?;
    let mut pos = 0;
    let root = parse_section(&tokens, &mut pos, false)?;
    Ok(KvValue::Section(root))
}

fn parse_section(
    tokens: &[Token],
    pos: &mut usize,
    nested: bool,
) -> Result<Vec<(String, KvValue)>> {
    let mut entries = Vec::new();

    loop {
        let key = match tokens.get(*pos) {
            None if nested => return Err(parse_error("Unclosed section: missing }")),
            None => return Ok(entries),
            Some(Token::Close) if nested => {
                *pos += 1;
                return Ok(entries);
            }
            Some(Token::Close) => return Err(parse_error("Unexpected } without matching {")),
            Some(Token::Open) => return Err(parse_error("Expected a key before {")),
            Some(Token::Text(key)) => key.clone(),
        };
        *pos += 1;

        let value = match tokens.get(*pos) {
            Some(Token::Text(value)) => {
                *pos += 1;
                KvValue::String(value.clone())
            }
            Some(Token::Open) => {
                *pos += 1;
                KvValue::Section(parse_section(tokens, pos, true)?)
            }
            Some(Token::Close) | None => {
                return Err(parse_error(&format!("Key \"{}\" has no value", key)));
            }
        };

        entries.push((key, value));
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '{' => {
                chars.next();
                tokens.push(Token::Open);
            }
            '}' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '"' => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => text.push(unescape(escaped)),
                            None => return Err(parse_error("Unterminated string")),
                        },
                        Some(other) => text.push(other),
                        None => return Err(parse_error("Unterminated string")),
                    }
                }
                tokens.push(Token::Text(text));
            }
            '/' if source_has_comment(&chars) => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            _ => {
                let mut text = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || matches!(next, '{' | '}' | '"') {
                        break;
                    }
                    text.push(next);
                    chars.next();
                }
                tokens.push(Token::Text(text));
            }
        }
    }

    Ok(tokens)
}

/// Map the character after a backslash to what it stands for.
/// `\\`, `\"`, `\'` and `\?` (and anything unknown) stand for themselves.
fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'v' => '\x0b',
        'b' => '\x08',
        'f' => '\x0c',
        'a' => '\x07',
        other => other,
    }
}

/// Check for `//` at the cursor without consuming anything else.
fn source_has_comment(chars: &std::iter::Peekable<std::str::Chars<'_>>) -> bool {
    let mut ahead = chars.clone();
    ahead.next();
    ahead.peek() == Some(&'/')
}

fn parse_error(message: &str) -> VentsError {
    VentsError::Parse {
        message: message.to_string(),
        help: Some("Expected KeyValues text such as \"key\" { \"child\" \"value\" }".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_sections() {
        let source = r#"
"730"
{
    "common"
    {
        "name"      "Counter-Strike 2"
        "timeline_marker_updated"   "1712345678"
    }
}
"#;

        let root = parse_keyvalues(source).unwrap();

        assert_eq!(
            root.get_path(&["730", "common", "timeline_marker_updated"])
                .and_then(|v| v.as_str()),
            Some("1712345678")
        );
        assert_eq!(
            root.get_path(&["730", "common", "name"]).and_then(|v| v.as_str()),
            Some("Counter-Strike 2")
        );
    }

    #[test]
    fn test_escapes_and_comments() {
        let source = "// header\n\"a\" \"say \\\"hi\\\"\" // trailing\n\"b\" bare\n";

        let root = parse_keyvalues(source).unwrap();

        assert_eq!(root.get("a").and_then(|v| v.as_str()), Some("say \"hi\""));
        assert_eq!(root.get("b").and_then(|v| v.as_str()), Some("bare"));
    }

    #[test]
    fn test_all_escape_sequences() {
        let source = r#""k" "a\nb\tc\rd\ve\bf\fg\ah\\i\"j\'k\?l""#;

        let root = parse_keyvalues(source).unwrap();

        assert_eq!(
            root.get("k").and_then(|v| v.as_str()),
            Some("a\nb\tc\rd\x0be\x08f\x0cg\x07h\\i\"j'k?l")
        );
    }

    #[test]
    fn test_escaped_backslash_before_closing_quote() {
        let root = parse_keyvalues(r#""path" "C:\\Steam\\" "next" "1""#).unwrap();

        assert_eq!(root.get("path").and_then(|v| v.as_str()), Some("C:\\Steam\\"));
        assert_eq!(root.get("next").and_then(|v| v.as_str()), Some("1"));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(parse_keyvalues("\"k\" \"open").is_err());
        assert!(parse_keyvalues("\"k\" \"trailing\\").is_err());
    }

    #[test]
    fn test_repeated_key_uses_last() {
        let root = parse_keyvalues("\"k\" \"1\"\n\"k\" \"2\"\n").unwrap();
        assert_eq!(root.get("k").and_then(|v| v.as_str()), Some("2"));
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(parse_keyvalues("\"a\" { \"b\" \"c\"").is_err());
        assert!(parse_keyvalues("\"a\" \"b\" }").is_err());
    }

    #[test]
    fn test_dangling_key() {
        assert!(parse_keyvalues("\"a\" { \"b\" }").is_err());
        assert!(parse_keyvalues("\"a\"").is_err());
    }

    #[test]
    fn test_missing_path() {
        let root = parse_keyvalues("\"a\" { \"b\" \"c\" }").unwrap();
        assert!(root.get_path(&["a", "x"]).is_none());
        assert!(root.get_path(&["a", "b", "c"]).is_none());
    }
}
