use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind};

const OPERATOR_CHARS: &[u8] = b"=<>!+-*/%";

/// Lenient SQL tokenizer producing a flat stream of `Token`s.
///
/// Scope / Intent:
/// - Designed for cursor-aware completion on text the user is still typing.
/// - Every byte of the input is covered by exactly one token, so joining the
///   token slices in order reproduces the input.
/// - Unterminated strings, comments and backtick identifiers run to the end of
///   the input instead of failing.
///
/// Rules, in priority order at each position: whitespace run, `--` comment,
/// `/* */` comment, quoted string, backtick identifier, number, `.` and `,`,
/// parentheses, operator run, word (keyword or identifier), anything else as a
/// single `Unknown` character.
///
/// Complexity: O(n) time, O(t) space where `t` is number of tokens.
pub fn tokenize(sql: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = sql.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        let start = i;
        let c = bytes[i];

        if c.is_ascii_whitespace() {
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            out.push(slice_token(sql, TokenKind::Whitespace, start, i));
            continue;
        }

        if sql[i..].starts_with("--") {
            i = sql[i..].find('\n').map_or(len, |nl| i + nl);
            out.push(slice_token(sql, TokenKind::Comment, start, i));
            continue;
        }

        if sql[i..].starts_with("/*") {
            i = sql[i + 2..].find("*/").map_or(len, |close| i + 2 + close + 2);
            out.push(slice_token(sql, TokenKind::Comment, start, i));
            continue;
        }

        if c == b'\'' || c == b'"' {
            i += 1;
            while i < len {
                match bytes[i] {
                    b'\\' => i = (i + 2).min(len),
                    q if q == c => {
                        i += 1;
                        break;
                    }
                    _ => i += 1,
                }
            }
            out.push(slice_token(sql, TokenKind::String, start, i));
            continue;
        }

        if c == b'`' {
            let (end, value) = backtick_identifier(sql, start);
            i = end;
            out.push(Token::new(TokenKind::Identifier, value, start, i));
            continue;
        }

        if c.is_ascii_digit() {
            while i < len && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            out.push(slice_token(sql, TokenKind::Number, start, i));
            continue;
        }

        let single = match c {
            b'.' => Some(TokenKind::Dot),
            b',' => Some(TokenKind::Comma),
            b'(' => Some(TokenKind::ParenOpen),
            b')' => Some(TokenKind::ParenClose),
            _ => None,
        };
        if let Some(kind) = single {
            i += 1;
            out.push(slice_token(sql, kind, start, i));
            continue;
        }

        if OPERATOR_CHARS.contains(&c) {
            i += 1;
            // A comment opener ends the run so `a=--x` keeps its comment.
            while i < len
                && OPERATOR_CHARS.contains(&bytes[i])
                && !sql[i..].starts_with("--")
                && !sql[i..].starts_with("/*")
            {
                i += 1;
            }
            out.push(slice_token(sql, TokenKind::Operator, start, i));
            continue;
        }

        if c.is_ascii_alphabetic() || c == b'_' {
            while i < len && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            let text = &sql[start..i];
            let kind = Keyword::from_upper(&text.to_ascii_uppercase())
                .map(TokenKind::Keyword)
                .unwrap_or(TokenKind::Identifier);
            out.push(slice_token(sql, kind, start, i));
            continue;
        }

        // Anything else is one (possibly multi-byte) character.
        i += sql[i..].chars().next().map_or(1, char::len_utf8);
        out.push(slice_token(sql, TokenKind::Unknown, start, i));
    }

    out
}

fn slice_token(sql: &str, kind: TokenKind, start: usize, end: usize) -> Token {
    Token::new(kind, &sql[start..end], start, end)
}

/// Scans a backtick identifier starting at `start` (the opening backtick).
///
/// Returns the exclusive end offset and the inner text with doubled
/// backticks collapsed.
fn backtick_identifier(sql: &str, start: usize) -> (usize, String) {
    let bytes = sql.as_bytes();
    let mut value = String::new();
    let mut i = start + 1;
    let mut run = i;

    while i < bytes.len() {
        if bytes[i] == b'`' {
            value.push_str(&sql[run..i]);
            if bytes.get(i + 1) == Some(&b'`') {
                value.push('`');
                i += 2;
                run = i;
                continue;
            }
            return (i + 1, value);
        }
        i += 1;
    }

    value.push_str(&sql[run..]);
    (bytes.len(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::keyword::Keyword;
    use crate::sql::token_kind::TokenKind;
    use rstest::rstest;

    fn kinds(sql: &str) -> Vec<TokenKind> {
        tokenize(sql)
            .into_iter()
            .filter(|t| !t.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    #[rstest]
    #[case("SELECT a, b FROM t")]
    #[case("select * from `my``table` where x = 'it''s' -- trailing")]
    #[case("SELECT 'unterminated")]
    #[case("SELECT /* never closed")]
    #[case("SELECT `open")]
    #[case("SELECT \"a\\\"b\" FROM t WHERE n >= 1.5.2 AND é = ?")]
    #[case("")]
    #[case("   \n\t ")]
    fn slices_reconstruct_the_input(#[case] sql: &str) {
        let rebuilt: String = tokenize(sql)
            .iter()
            .map(|t| &sql[t.start..t.end])
            .collect();
        assert_eq!(rebuilt, sql);
    }

    #[test]
    fn basic_select_sequence() {
        assert_eq!(
            kinds("SELECT a, b FROM t"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Keyword(Keyword::From),
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn preserves_case_for_identifiers_and_keywords() {
        let toks = tokenize("From MyTable");
        assert!(toks[0].is_keyword(Keyword::From));
        assert_eq!(toks[0].value, "From");
        assert_eq!(toks[2].ident(), Some("MyTable"));
    }

    #[test]
    fn whitespace_runs_are_single_tokens() {
        let toks = tokenize("a \n\t b");
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[1].kind, TokenKind::Whitespace);
        assert_eq!(toks[1].value, " \n\t ");
    }

    #[test]
    fn line_comment_stops_at_newline() {
        let toks = tokenize("-- note\nSELECT");
        assert_eq!(toks[0].kind, TokenKind::Comment);
        assert_eq!(toks[0].value, "-- note");
        assert!(toks[2].is_keyword(Keyword::Select));
    }

    #[test]
    fn block_comment_and_unterminated_block() {
        let toks = tokenize("/* a */x");
        assert_eq!(toks[0].value, "/* a */");
        assert_eq!(toks[1].ident(), Some("x"));

        let toks = tokenize("x /* open");
        assert_eq!(toks.last().map(|t| t.kind), Some(TokenKind::Comment));
        assert_eq!(toks.last().map(|t| t.end), Some(9));
    }

    #[rstest]
    #[case("'abc'", "'abc'")]
    #[case("\"abc\"", "\"abc\"")]
    #[case("'it\\'s'", "'it\\'s'")]
    #[case("'open", "'open")]
    #[case("'trailing\\", "'trailing\\")]
    fn string_literals(#[case] sql: &str, #[case] value: &str) {
        let toks = tokenize(sql);
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::String);
        assert_eq!(toks[0].value, value);
    }

    #[rstest]
    #[case("`order`", "order", 7)]
    #[case("`a``b`", "a`b", 6)]
    #[case("`open", "open", 5)]
    fn backtick_identifiers(#[case] sql: &str, #[case] value: &str, #[case] end: usize) {
        let toks = tokenize(sql);
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Identifier);
        assert_eq!(toks[0].value, value);
        assert_eq!((toks[0].start, toks[0].end), (0, end));
    }

    #[test]
    fn numbers_accept_interior_dots() {
        let toks = tokenize("1.2.3 42");
        assert_eq!(toks[0].kind, TokenKind::Number);
        assert_eq!(toks[0].value, "1.2.3");
        assert_eq!(toks[2].value, "42");
    }

    #[test]
    fn operator_runs() {
        let toks = tokenize("a<>=b + -c");
        assert_eq!(toks[1].kind, TokenKind::Operator);
        assert_eq!(toks[1].value, "<>=");
        assert_eq!(toks[4].value, "+");
        assert_eq!(toks[6].value, "-");
    }

    #[test]
    fn operator_run_yields_to_comment() {
        let toks = tokenize("a=--x");
        assert_eq!(toks[1].value, "=");
        assert_eq!(toks[2].kind, TokenKind::Comment);
    }

    #[test]
    fn punctuation_tokens() {
        assert_eq!(
            kinds("(a.b,c)"),
            vec![
                TokenKind::ParenOpen,
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::ParenClose,
            ]
        );
    }

    #[test]
    fn unknown_characters_keep_utf8_boundaries() {
        let toks = tokenize("t;é");
        assert_eq!(toks[1].kind, TokenKind::Unknown);
        assert_eq!(toks[1].value, ";");
        assert_eq!(toks[2].kind, TokenKind::Unknown);
        assert_eq!(toks[2].value, "é");
        assert_eq!(toks[2].end, "t;é".len());
    }

    #[test]
    fn words_starting_with_digits_split() {
        assert_eq!(kinds("1abc"), vec![TokenKind::Number, TokenKind::Identifier]);
    }
}
