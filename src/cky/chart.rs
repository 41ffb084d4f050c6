// How the best weight in a cell was derived
#[derive(Debug, PartialEq, Clone)]
pub enum Backpointer {
    // Directly from a lexical rule over the spanned token
    Lexical,
    // From a unary rule over the given child symbol at the same span
    Unary(usize),
    // From a binary rule split at the given point
    Split {
        split: usize,
        left: usize,
        right: usize
    },
}

// The triangular score/backpointer table produced by one build call. A score
// of 0.0 with no backpointer means the cell has no known derivation.
#[derive(Debug)]
pub struct Chart {
    tokens: Vec<String>,
    num_symbols: usize,
    scores: Vec<f64>,
    back: Vec<Option<Backpointer>>,
}

impl Chart {
    pub(super) fn new(tokens: Vec<String>, num_symbols: usize) -> Self {
        let cells = (tokens.len() + 1) * (tokens.len() + 1) * num_symbols;

        Chart {
            tokens,
            num_symbols,
            scores: vec![0.0; cells],
            back: vec![None; cells],
        }
    }

    // The number of tokens the chart spans
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn num_symbols(&self) -> usize {
        self.num_symbols
    }

    pub fn token(&self, position: usize) -> &str {
        &self.tokens[position]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    // Best known weight for the symbol over [start, end), 0.0 if none
    pub fn score(&self, start: usize, end: usize, symbol: usize) -> f64 {
        self.scores[self.cell(start, end, symbol)]
    }

    pub fn backpointer(&self, start: usize, end: usize, symbol: usize) -> Option<&Backpointer> {
        self.back[self.cell(start, end, symbol)].as_ref()
    }

    pub(super) fn set(&mut self, start: usize, end: usize, symbol: usize, score: f64, back: Backpointer) {
        let cell = self.cell(start, end, symbol);
        self.scores[cell] = score;
        self.back[cell] = Some(back);
    }

    fn cell(&self, start: usize, end: usize, symbol: usize) -> usize {
        (start * (self.tokens.len() + 1) + end) * self.num_symbols + symbol
    }
}
