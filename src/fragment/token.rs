//! Path-token grammar for build fragments
//!
//! A token is a root-variable reference (`$(VAR)` or `${VAR}`) followed by
//! `/` and a body of word characters and separators. The kind is decided by
//! what terminates the body.

use regex::Regex;
use serde::Serialize;

/// The five kinds of path references recognised in fragment text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// `*.c`
    CSource,
    /// `*.h`
    Header,
    /// `*.s`
    AssemblySource,
    /// Path with no suffix, terminated by whitespace, `|` or end of text
    Directory,
    /// Nested fragment, `*.mk`
    Fragment,
}

impl TokenKind {
    /// Extraction order. Content kinds first, nested fragments last.
    pub const ALL: [TokenKind; 5] = [
        TokenKind::CSource,
        TokenKind::Header,
        TokenKind::AssemblySource,
        TokenKind::Directory,
        TokenKind::Fragment,
    ];

    /// Kinds that contribute entries directly to the resolved list
    pub const CONTENT: [TokenKind; 4] = [
        TokenKind::CSource,
        TokenKind::Header,
        TokenKind::AssemblySource,
        TokenKind::Directory,
    ];

    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            TokenKind::CSource => Some(".c"),
            TokenKind::Header => Some(".h"),
            TokenKind::AssemblySource => Some(".s"),
            TokenKind::Fragment => Some(".mk"),
            TokenKind::Directory => None,
        }
    }

    fn pattern(&self, variable: &str) -> String {
        let var = regex::escape(variable);
        let head = format!(r"\$(?:\({var}\)|\{{{var}\}})/[/\w]*");
        match self.suffix() {
            Some(suffix) => format!(r"({head}{})\b", regex::escape(suffix)),
            None => format!(r"({head})(?:[\s|]|\z)"),
        }
    }
}

/// A raw, unresolved path reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathToken {
    pub kind: TokenKind,
    pub raw: String,
}

/// Compiled matchers for one root variable name
#[derive(Debug, Clone)]
pub struct TokenGrammar {
    matchers: Vec<(TokenKind, Regex)>,
}

impl TokenGrammar {
    pub fn new(variable: &str) -> Result<Self, regex::Error> {
        let matchers = TokenKind::ALL
            .iter()
            .map(|kind| Ok((*kind, Regex::new(&kind.pattern(variable))?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { matchers })
    }

    /// Extracts every token from `text`, grouped by kind in [`TokenKind::ALL`]
    /// order and by position within a kind.
    pub fn classify_and_extract(&self, text: &str) -> Vec<PathToken> {
        let mut tokens = Vec::new();
        for (kind, re) in &self.matchers {
            for caps in re.captures_iter(text) {
                if let Some(m) = caps.get(1) {
                    tokens.push(PathToken {
                        kind: *kind,
                        raw: m.as_str().to_string(),
                    });
                }
            }
        }
        tokens
    }
}
