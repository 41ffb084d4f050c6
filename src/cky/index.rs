use std::collections::HashMap;

use super::ParseErrorType::{IndexOutOfRange, UnknownSymbol};
use super::Result;

// Bijection between symbol names and dense indices in [0, len)
#[derive(Debug)]
pub struct SymbolIndex {
    by_name: HashMap<String, usize>,
    names: Vec<String>,
}

impl SymbolIndex {
    // Assigns consecutive indices in the order the symbols are given, so the
    // mapping is reproducible across reloads of the same grammar
    pub fn new(symbols: &[String]) -> Self {
        let mut by_name = HashMap::with_capacity(symbols.len());
        for (index, name) in symbols.iter().enumerate() {
            by_name.insert(name.clone(), index);
        }

        SymbolIndex {
            by_name,
            names: symbols.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn index_of(&self, symbol: &str) -> Result<usize> {
        self.by_name
            .get(symbol)
            .copied()
            .ok_or_else(|| UnknownSymbol(symbol.to_string()))
    }

    pub fn symbol_of(&self, index: usize) -> Result<&str> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or(IndexOutOfRange(index))
    }
}
