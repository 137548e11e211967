//! # Config Lexer
//!
//! Line-oriented tokenizer for the configuration dialect.
//!
//! The lexer is a two-state machine ([`LexState`]). [`lex_line`] is the whole
//! transition function: it takes the state before a physical line and the line
//! itself, and returns the state after the line plus at most one [`Token`].
//!
//! Recognised syntax:
//! * `/* ... */` block comments, possibly spanning lines (not nested).
//! * `// ...` line comments, running to the end of the line.
//! * `[name]` section headers.
//! * anything else that is not blank is a statement, interpreted by the store.

const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";
const LINE_COMMENT: &str = "//";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexState {
    #[default]
    Normal,
    InBlockComment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    SectionHeader(String),
    Statement(String),
}

/// Runs one physical line through the state machine.
pub fn lex_line(state: LexState, line: &str) -> (LexState, Option<Token>) {
    let (state, content) = strip_block_comments(state, line);

    let content = match content.find(LINE_COMMENT) {
        Some(idx) => &content[..idx],
        None => content.as_str(),
    };

    (state, classify(content.trim()))
}

/// Removes every block comment span from `line`.
///
/// Content between an opener and its terminator is dropped, content outside
/// is concatenated. An opener without terminator switches to
/// [`LexState::InBlockComment`] and drops the rest of the line.
fn strip_block_comments(mut state: LexState, line: &str) -> (LexState, String) {
    let mut content = String::with_capacity(line.len());
    let mut rest = line;

    loop {
        match state {
            LexState::InBlockComment => match rest.find(BLOCK_CLOSE) {
                Some(idx) => {
                    rest = &rest[idx + BLOCK_CLOSE.len()..];
                    state = LexState::Normal;
                }
                None => return (state, content),
            },
            LexState::Normal => match rest.find(BLOCK_OPEN) {
                Some(idx) => {
                    content.push_str(&rest[..idx]);
                    rest = &rest[idx + BLOCK_OPEN.len()..];
                    state = LexState::InBlockComment;
                }
                None => {
                    content.push_str(rest);
                    return (state, content);
                }
            },
        }
    }
}

fn classify(content: &str) -> Option<Token> {
    if content.is_empty() {
        return None;
    }

    match content.strip_prefix('[') {
        Some(header) => {
            let name = match header.find(']') {
                Some(end) => &header[..end],
                None => header,
            };
            Some(Token::SectionHeader(name.to_string()))
        }
        None => Some(Token::Statement(content.to_string())),
    }
}

/// Iterator over the tokens of a whole text, paired with their 1-based line number.
///
/// An unterminated block comment at the end of the text is not an error;
/// the lines it covers simply produce no tokens.
pub struct Lexer<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    state: LexState,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            state: LexState::Normal,
        }
    }

    pub fn state(&self) -> LexState {
        self.state
    }
}

impl Iterator for Lexer<'_> {
    type Item = (usize, Token);

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, line) in self.lines.by_ref() {
            let (state, token) = lex_line(self.state, line);
            self.state = state;
            if let Some(token) = token {
                return Some((idx + 1, token));
            }
        }
        None
    }
}

pub fn tokenize(text: &str) -> Vec<(usize, Token)> {
    Lexer::new(text).collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
