use itertools::{Itertools, PeekingNext};

use crate::grammar::Symbol;
use super::{LoadErrorType, Result};

pub fn lex_terminal(field: &mut impl PeekingNext<Item = char>) -> Result<Symbol> {
    field.next(); // Consume open quote
    let literal = field.peeking_take_while(|&c| c != '\'').collect();

    // Check if there is a close quote and consume it if there is
    if field.next() != Some('\'') {
        return Err(LoadErrorType::UnmatchedQuote);
    }

    Ok(Symbol::Terminal(literal))
}

pub fn lex_nonterminal(field: &mut impl Iterator<Item = char>) -> Result<Symbol> {
    Ok(Symbol::Nonterminal(field.take_while(|c| !c.is_whitespace()).collect()))
}

// Lexes a right-hand-side field into its whitespace-separated symbols
pub fn lex_rhs(field: &str) -> Result<Vec<Symbol>> {
    let mut symbols = Vec::new();

    let mut field_chars = field.chars().peekable();

    while let Some(c) = field_chars.peek() {
        if *c == '\'' {
            symbols.push(lex_terminal(&mut field_chars)?);
        } else if !c.is_whitespace() {
            symbols.push(lex_nonterminal(&mut field_chars)?);
        } else {
            field_chars.next();
        }
    }

    return Ok(symbols);
}
