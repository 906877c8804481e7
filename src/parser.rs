// ABOUTME: Whitespace-word tokeniser turning program words into the token stream

use crate::builtins;
use crate::error::EvalError;
use crate::token::Token;
use crate::value::Value;

/// Classifies a sequence of whitespace-separated words into tokens.
///
/// Classification order per word: open list continuation, `[]`, `[`-opener,
/// `--` comment (discards the rest of the words), `:`-variable reference,
/// the `do`/`end` sentinels, the `true`/`false`/`nil` literals, procedure
/// table membership, signed integer, float, and finally the bare word
/// itself. List literals are flat lists of words; nested brackets are not
/// recognised inside them.
pub fn parse<'a, I>(words: I) -> Result<Vec<Token>, EvalError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut code = Vec::new();
    let mut buf: Option<Vec<Value>> = None;

    for word in words {
        if buf.is_some() {
            if let Some(stripped) = word.strip_suffix(']') {
                let mut items = buf.take().unwrap_or_default();
                if !stripped.is_empty() {
                    items.push(Value::Str(stripped.to_string()));
                }
                code.push(Token::Literal(Value::list(items)));
            } else if let Some(items) = buf.as_mut() {
                items.push(Value::Str(word.to_string()));
            }
            continue;
        }

        if word == "[]" {
            code.push(Token::Literal(Value::list(Vec::new())));
            continue;
        }

        if let Some(rest) = word.strip_prefix('[') {
            if let Some(inner) = rest.strip_suffix(']') {
                code.push(Token::Literal(Value::list(vec![Value::Str(
                    inner.to_string(),
                )])));
            } else {
                let mut items = Vec::new();
                if !rest.is_empty() {
                    items.push(Value::Str(rest.to_string()));
                }
                buf = Some(items);
            }
            continue;
        }

        if word.starts_with("--") {
            break;
        }

        if let Some(name) = word.strip_prefix(':') {
            code.push(Token::Var(name.to_lowercase()));
            continue;
        }

        let lowered = word.to_lowercase();
        match lowered.as_str() {
            "do" => {
                code.push(Token::Do);
                continue;
            }
            "end" => {
                code.push(Token::End);
                continue;
            }
            "true" => {
                code.push(Token::Literal(Value::Bool(true)));
                continue;
            }
            "false" => {
                code.push(Token::Literal(Value::Bool(false)));
                continue;
            }
            "nil" => {
                code.push(Token::Literal(Value::Nil));
                continue;
            }
            _ => {}
        }

        if let Some(proc) = builtins::lookup(&lowered) {
            code.push(Token::Literal(Value::Proc(proc)));
        } else if let Ok(n) = word.parse::<i64>() {
            code.push(Token::Literal(Value::Int(n)));
        } else if let Ok(x) = word.parse::<f64>() {
            code.push(Token::Literal(Value::Float(x)));
        } else if word.len() >= 2 && word.starts_with('"') && word.ends_with('"') {
            code.push(Token::Word(word[1..word.len() - 1].to_string()));
        } else {
            code.push(Token::Word(word.to_string()));
        }
    }

    if buf.is_some() {
        return Err(EvalError::syntax("Unclosed list at end of line."));
    }
    Ok(code)
}

/// Tokenises one line of source. Lines are independent; callers concatenate
/// the resulting tokens into a single program.
pub fn parse_line(line: &str) -> Result<Vec<Token>, EvalError> {
    parse(line.split_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        let tokens = parse_line("42 -17 3.5 -0.25").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal(Value::Int(42)),
                Token::Literal(Value::Int(-17)),
                Token::Literal(Value::Float(3.5)),
                Token::Literal(Value::Float(-0.25)),
            ]
        );
    }

    #[test]
    fn test_parse_named_literals() {
        let tokens = parse_line("true FALSE nil").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal(Value::Bool(true)),
                Token::Literal(Value::Bool(false)),
                Token::Literal(Value::Nil),
            ]
        );
    }

    #[test]
    fn test_parse_variable_references_lowercase() {
        let tokens = parse_line(":Counter").unwrap();
        assert_eq!(tokens, vec![Token::Var("counter".to_string())]);
    }

    #[test]
    fn test_parse_sentinels() {
        let tokens = parse_line("do END").unwrap();
        assert_eq!(tokens, vec![Token::Do, Token::End]);
    }

    #[test]
    fn test_parse_procedure_handles() {
        let tokens = parse_line("add").unwrap();
        match &tokens[0] {
            Token::Literal(Value::Proc(p)) => {
                assert_eq!(p.name, "add");
                assert_eq!(p.arity, 2);
            }
            other => panic!("expected procedure handle, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_words_pass_through() {
        let tokens = parse_line("frobnicate").unwrap();
        assert_eq!(tokens, vec![Token::Word("frobnicate".to_string())]);
    }

    #[test]
    fn test_quoted_words_lose_their_quotes() {
        let tokens = parse_line("\"boom\"").unwrap();
        assert_eq!(tokens, vec![Token::Word("boom".to_string())]);
    }

    #[test]
    fn test_parse_spaced_list_literal() {
        let tokens = parse_line("[ print :i ]").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Literal(Value::list(vec![
                Value::Str("print".to_string()),
                Value::Str(":i".to_string()),
            ]))]
        );
    }

    #[test]
    fn test_parse_attached_list_literal() {
        let tokens = parse_line("[a b c]").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Literal(Value::list(vec![
                Value::Str("a".to_string()),
                Value::Str("b".to_string()),
                Value::Str("c".to_string()),
            ]))]
        );
    }

    #[test]
    fn test_parse_single_word_list() {
        let tokens = parse_line("[10]").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Literal(Value::list(vec![Value::Str(
                "10".to_string()
            )]))]
        );
    }

    #[test]
    fn test_parse_empty_list() {
        let tokens = parse_line("[]").unwrap();
        assert_eq!(tokens, vec![Token::Literal(Value::list(Vec::new()))]);
    }

    #[test]
    fn test_comment_discards_rest_of_line() {
        let tokens = parse_line("1 -- 2 3").unwrap();
        assert_eq!(tokens, vec![Token::Literal(Value::Int(1))]);
    }

    #[test]
    fn test_unclosed_list_is_an_error() {
        assert!(matches!(
            parse_line("[ 1 2"),
            Err(EvalError::Syntax(_))
        ));
    }
}
