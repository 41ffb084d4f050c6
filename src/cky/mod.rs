/*
    This module implements the CKY chart parser
*/

mod chart;
mod index;
mod tree;

use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;

use crate::grammar::*;
use crate::error_handling::*;
pub use chart::{Backpointer, Chart};
use index::SymbolIndex;
pub use tree::{ParseTree, TreeNode};

#[derive(Debug, PartialEq)]
pub enum ParseErrorType {
    // A symbol name that never appeared in the grammar
    UnknownSymbol(String),
    // A raw symbol index outside the dense range
    IndexOutOfRange(usize),
    // The requested cell has no derivation
    NoParse {
        start: usize,
        end: usize,
        symbol: String
    },
}

impl ErrorType for ParseErrorType {}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorType::UnknownSymbol(symbol) => write!(f, "Could not find symbol `{}` in the grammar", symbol),
            ParseErrorType::IndexOutOfRange(index) => write!(f, "Symbol index {} is out of range", index),
            ParseErrorType::NoParse { start, end, symbol } => write!(f, "No parse for `{}` over tokens {}..{}", symbol, start, end),
        }
    }
}

pub type ParseError = Error<ParseErrorType>;

pub type Result<T> = std::result::Result<T, ParseErrorType>;
pub type ParseResult<T> = std::result::Result<T, ParseError>;

// The engine itself is stateless across sentences: it holds the symbol index
// and pre-indexed rule tables, and every build call returns a fresh chart
#[derive(Debug)]
pub struct CkyParser {
    index: SymbolIndex,
    // word -> (parent, weight)
    lexical: HashMap<String, Vec<(usize, f64)>>,
    // child -> (parent, weight)
    unary: Vec<Vec<(usize, f64)>>,
    // left child -> (right child, parent, weight)
    binary: Vec<Vec<(usize, usize, f64)>>,
    location: Location,
}

impl CkyParser {
    pub fn new(grammar: &Grammar, file: PathBuf) -> ParseResult<Self> {
        let location = Location::whole_file(file);
        let locate = |error| ParseError { location: location.clone(), error };

        let index = SymbolIndex::new(grammar.symbols());
        let mut lexical: HashMap<String, Vec<(usize, f64)>> = HashMap::new();
        let mut unary = vec![Vec::new(); index.len()];
        let mut binary = vec![Vec::new(); index.len()];

        // Iterating symbols in declared order keeps every candidate list in
        // declared order, which fixes the tie-break among equal weights
        for (parent, name) in grammar.symbols().iter().enumerate() {
            for (expansion, weight) in grammar.rules_for(name) {
                match &expansion[..] {
                    [Symbol::Terminal(word)] => {
                        lexical.entry(word.clone()).or_default().push((parent, *weight));
                    }
                    [Symbol::Nonterminal(child)] => {
                        let child = index.index_of(child).map_err(locate)?;
                        unary[child].push((parent, *weight));
                    }
                    [Symbol::Nonterminal(left), Symbol::Nonterminal(right)] => {
                        let left = index.index_of(left).map_err(locate)?;
                        let right = index.index_of(right).map_err(locate)?;
                        binary[left].push((right, parent, *weight));
                    }
                    // Other shapes are rejected by the load-time verifier
                    _ => {}
                }
            }
        }

        Ok(CkyParser { index, lexical, unary, binary, location })
    }

    // Fills a fresh chart bottom-up. Spans are processed in order of
    // increasing length, so every binary lookup reads sub-spans that are
    // already final.
    pub fn build(&self, tokens: &[String]) -> Chart {
        let mut chart = Chart::new(tokens.to_vec(), self.index.len());
        let n = chart.len();

        for position in 0..n {
            self.apply_lexical(&mut chart, tokens, position);
            self.close_unary(&mut chart, position);
        }

        for end in 2..=n {
            for start in (0..=end - 2).rev() {
                self.apply_binary(&mut chart, start, end);
            }
        }

        return chart;
    }

    fn apply_lexical(&self, chart: &mut Chart, tokens: &[String], position: usize) {
        if let Some(candidates) = self.lexical.get(&tokens[position]) {
            for &(parent, weight) in candidates {
                if weight > chart.score(position, position + 1, parent) {
                    chart.set(position, position + 1, parent, weight, Backpointer::Lexical);
                }
            }
        }
    }

    // Propagates unary rules at one length-1 span until no cell improves, so
    // indirect chains like A -> B -> C are derived whatever the declaration
    // order. A chain visits each symbol at most once, so len() passes always
    // reach the fixpoint; the cap also stops a unary cycle whose weight
    // product exceeds one from looping forever.
    fn close_unary(&self, chart: &mut Chart, position: usize) {
        for _ in 0..self.index.len() {
            let mut improved = false;

            for child in 0..self.index.len() {
                let base = chart.score(position, position + 1, child);
                if base <= 0.0 {
                    continue;
                }
                for &(parent, weight) in &self.unary[child] {
                    let candidate = weight * base;
                    if candidate > chart.score(position, position + 1, parent) {
                        chart.set(position, position + 1, parent, candidate, Backpointer::Unary(child));
                        improved = true;
                    }
                }
            }

            if !improved {
                break;
            }
        }
    }

    fn apply_binary(&self, chart: &mut Chart, start: usize, end: usize) {
        for split in start + 1..end {
            for left in 0..self.index.len() {
                let left_score = chart.score(start, split, left);
                if left_score <= 0.0 {
                    continue;
                }
                for &(right, parent, weight) in &self.binary[left] {
                    let right_score = chart.score(split, end, right);
                    if right_score <= 0.0 {
                        continue;
                    }
                    // Strictly-greater comparison keeps the first maximum
                    // found, a deterministic tie-break under the fixed
                    // iteration order
                    let candidate = weight * left_score * right_score;
                    if candidate > chart.score(start, end, parent) {
                        chart.set(start, end, parent, candidate, Backpointer::Split { split, left, right });
                    }
                }
            }
        }
    }

    // Replays backpointers into the best parse tree for a cell
    pub fn extract_tree(&self, chart: &Chart, start: usize, end: usize, symbol: usize) -> ParseResult<ParseTree> {
        let name = self.symbol_of(symbol)?.to_string();

        let back = if start < end && end <= chart.len() {
            chart.backpointer(start, end, symbol)
        } else {
            None
        };
        let back = back.ok_or_else(|| ParseError {
            location: self.location.clone(),
            error: ParseErrorType::NoParse {
                start,
                end,
                symbol: name.clone()
            }
        })?;

        let node = match *back {
            Backpointer::Lexical => TreeNode::Leaf(chart.token(start).to_string()),
            Backpointer::Unary(child) => TreeNode::Unary(
                Box::new(self.extract_tree(chart, start, end, child)?)
            ),
            Backpointer::Split { split, left, right } => TreeNode::Branch(
                Box::new(self.extract_tree(chart, start, split, left)?),
                Box::new(self.extract_tree(chart, split, end, right)?)
            ),
        };

        Ok(ParseTree { symbol: name, node })
    }

    // Best full-span parse rooted at the given start symbol
    pub fn extract(&self, chart: &Chart, start_symbol: &str) -> ParseResult<ParseTree> {
        let root = self.index_of(start_symbol)?;
        return self.extract_tree(chart, 0, chart.len(), root);
    }

    pub fn index_of(&self, symbol: &str) -> ParseResult<usize> {
        self.located(self.index.index_of(symbol))
    }

    pub fn symbol_of(&self, index: usize) -> ParseResult<&str> {
        self.located(self.index.symbol_of(index))
    }

    // Symbol names in index order, for callers walking the raw chart
    pub fn symbol_names(&self) -> &[String] {
        self.index.names()
    }

    fn located<T>(&self, result: Result<T>) -> ParseResult<T> {
        result.map_err(|error| ParseError {
            location: self.location.clone(),
            error
        })
    }
}
