use chumsky::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A bare word: the longest run of characters that is not whitespace and
    /// contains no `(`, `)`, `,` or `"`. Operators like `+` and `==` are
    /// ordinary words.
    Word(String),
    /// A decimal integer. A digit run that ends inside an identifier
    /// (`123abc`) is a word, not a number.
    Number(f64),
    /// A double-quoted string. No escape sequences; the value excludes the
    /// quotes.
    Text(String),
    LParen,
    RParen,
    Comma,
}

pub fn lexer<'a>()
-> impl Parser<'a, &'a str, Vec<(Token, SimpleSpan)>, extra::Err<Simple<'a, char>>> {
    let string = just('"')
        .ignore_then(none_of('"').repeated().collect::<String>())
        .then_ignore(just('"'))
        .map(Token::Text);

    let word_char = any().filter(|c: &char| c.is_alphanumeric() || *c == '_');

    let number = text::digits(10)
        .to_slice()
        .then_ignore(word_char.not())
        .map(|s: &str| Token::Number(s.parse().unwrap()));

    let word = any()
        .filter(|c: &char| !c.is_whitespace() && !matches!(c, '(' | ')' | ',' | '"'))
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| Token::Word(s.to_string()));

    let delimiter = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just(',').to(Token::Comma),
    ));

    let token = choice((string, number, word, delimiter))
        .map_with(|tok, e| (tok, e.span()))
        .padded();

    token.repeated().collect().padded().then_ignore(end())
}
