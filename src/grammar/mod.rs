/*
    This module stores weighted grammars in Chomsky normal form
*/

use std::collections::HashMap;

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

// One right-hand side: a single terminal, a single nonterminal (unary rule),
// or a nonterminal pair
pub type Expansion = Vec<Symbol>;

#[derive(Debug, PartialEq)]
pub struct Grammar {
    pub start_symbol: String,
    // Rules per left-hand symbol, kept in declaration order so parse results
    // are reproducible across runs
    rules: HashMap<String, Vec<(Expansion, f64)>>,
    // Symbol names in order of first appearance, the contract for dense
    // index assignment
    order: Vec<String>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar {
            start_symbol: String::new(),
            rules: HashMap::new(),
            order: Vec::new(),
        }
    }

    // Registers the left symbol and every right-hand nonterminal, then stores
    // the rule. Redeclaring a (left, expansion) pair overwrites the weight.
    pub fn add_rule(&mut self, left: String, expansion: Expansion, weight: f64) {
        self.register(&left);
        for symbol in &expansion {
            if let Symbol::Nonterminal(name) = symbol {
                self.register(name);
            }
        }

        let expansions = self.rules.entry(left).or_default();
        match expansions.iter_mut().find(|(e, _)| *e == expansion) {
            Some(slot) => slot.1 = weight,
            None => expansions.push((expansion, weight)),
        }
    }

    // Symbol names in first-appearance order
    pub fn symbols(&self) -> &[String] {
        &self.order
    }

    // The declared rules for a symbol, empty if it has none
    pub fn rules_for(&self, symbol: &str) -> &[(Expansion, f64)] {
        self.rules.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    fn register(&mut self, name: &str) {
        if !self.order.iter().any(|s| s == name) {
            self.order.push(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    #[test]
    fn symbols_in_first_appearance_order() {
        let mut grammar = Grammar::new();
        grammar.add_rule("S".to_string(), vec![s_nonterminal("NP"), s_nonterminal("VP")], 1.0);
        grammar.add_rule("NP".to_string(), vec![s_terminal("time")], 0.3);
        grammar.add_rule("VP".to_string(), vec![s_nonterminal("V"), s_nonterminal("NP")], 0.5);

        assert_eq!(grammar.symbols(), &["S", "NP", "VP", "V"]);
    }

    #[test]
    fn rules_for_unknown_symbol_is_empty() {
        let mut grammar = Grammar::new();
        grammar.add_rule("S".to_string(), vec![s_terminal("hello")], 1.0);

        assert!(grammar.rules_for("NP").is_empty());
    }

    #[test]
    fn redeclared_rule_overwrites_weight() {
        let mut grammar = Grammar::new();
        grammar.add_rule("NP".to_string(), vec![s_terminal("time")], 0.3);
        grammar.add_rule("NP".to_string(), vec![s_terminal("arrow")], 0.2);
        grammar.add_rule("NP".to_string(), vec![s_terminal("time")], 0.7);

        assert_eq!(grammar.rules_for("NP"), &[
            (vec![s_terminal("time")], 0.7),
            (vec![s_terminal("arrow")], 0.2)
        ]);
    }
}
