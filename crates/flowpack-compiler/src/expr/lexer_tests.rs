use super::lexer::{TokenKind, lex, token_text, unescape};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn operators_prefer_longest_match() {
    assert_eq!(
        kinds("a<=b && c<<1 || !d != e"),
        [
            TokenKind::Ident,
            TokenKind::LessEq,
            TokenKind::Ident,
            TokenKind::AmpAmp,
            TokenKind::Ident,
            TokenKind::ShiftLeft,
            TokenKind::Number,
            TokenKind::PipePipe,
            TokenKind::Bang,
            TokenKind::Ident,
            TokenKind::BangEq,
            TokenKind::Ident,
        ]
    );
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("true trueish null undefined $index _x1"),
        [
            TokenKind::True,
            TokenKind::Ident,
            TokenKind::Null,
            TokenKind::Undefined,
            TokenKind::Ident,
            TokenKind::Ident,
        ]
    );
}

#[test]
fn numbers() {
    let source = "12 1.5 2e3 0x1F";
    let tokens = lex(source);
    let texts: Vec<&str> = tokens.iter().map(|t| token_text(source, t)).collect();

    assert_eq!(texts, ["12", "1.5", "2e3", "0x1F"]);
    assert_eq!(tokens[3].kind, TokenKind::HexNumber);
}

#[test]
fn garbage_is_coalesced() {
    let tokens = lex("a @# b");

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind, TokenKind::Garbage);
    assert_eq!(tokens[1].span, 2..4);
}

#[test]
fn trailing_garbage() {
    let tokens = lex("x @");

    assert_eq!(tokens[1].kind, TokenKind::Garbage);
    assert_eq!(tokens[1].span, 2..3);
}

#[test]
fn strings_with_either_quote() {
    let source = r#""a\"b" 'c\'d'"#;
    let tokens = lex(source);

    assert_eq!(tokens.len(), 2);
    assert_eq!(unescape(token_text(source, &tokens[0])), "a\"b");
    assert_eq!(unescape(token_text(source, &tokens[1])), "c'd");
}

#[test]
fn escapes() {
    assert_eq!(unescape(r#""x\n\tA""#), "x\n\tA");
    assert_eq!(unescape(r#""\q""#), "q");
}
