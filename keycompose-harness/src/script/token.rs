use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    #[token("\n")]
    Newline,

    // Directives
    #[token("@focus")]
    Focus,

    #[token("@blur")]
    Blur,

    // Context ids
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    Number(Option<u64>),

    // Key with optional +/- prefix and modifiers, e.g. `+shift+KeyA`
    #[regex(r"[+-]?[A-Za-z][A-Za-z0-9+]*", |lex| lex.slice().to_string())]
    Chord(String),
}
