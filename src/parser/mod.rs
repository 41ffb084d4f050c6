/*
    This module parses weighted rule files
*/

mod lexer;
mod verifier;

use std::fs::File;
use std::io::BufRead;
use std::fmt::Display;
use std::path::PathBuf;

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use verifier::verify_rules;

#[derive(Debug)]
pub enum LoadErrorType {
    // A line does not split into exactly left, right-hand side, and weight
    FieldCount(usize),
    // The left field is empty or a quoted literal
    MissingLeftSymbol,
    // There is an unclosed quote in a right-hand side
    UnmatchedQuote,
    // The weight field is not a non-negative finite number
    InvalidWeight(String),
    // A right-hand side with a length outside {1, 2}
    BadArity(usize),
    // A two-symbol right-hand side containing a terminal literal
    MixedPair,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for LoadErrorType {}

impl PartialEq for LoadErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let LoadErrorType::FileError(a) = self {
            if let LoadErrorType::FileError(b) = other {
                return a.kind() == b.kind();
            }
        }
        return std::mem::discriminant(self) == std::mem::discriminant(other);
    }
}

impl Display for LoadErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadErrorType::FieldCount(n) => write!(f, "Expected `left, right-hand side, weight` but found {} fields", n),
            LoadErrorType::MissingLeftSymbol => write!(f, "Rule must start with a nonterminal symbol"),
            LoadErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            LoadErrorType::InvalidWeight(text) => write!(f, "Weight `{}` is not a non-negative number", text),
            LoadErrorType::BadArity(n) => write!(f, "Right-hand side has {} symbols, expected 1 or 2", n),
            LoadErrorType::MixedPair => write!(f, "A two-symbol right-hand side may not contain a terminal literal"),
            LoadErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type LoadError = Error<LoadErrorType>;
pub type LoadErrors = Errors<LoadErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> LoadError {
    LoadError {
        location: Location::whole_file(file),
        error: LoadErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, LoadErrorType>;
pub type LineResult<T> = std::result::Result<T, LoadError>;
pub type FileResult<T> = std::result::Result<T, LoadErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    left: String,
    expansion: Expansion,
    weight: f64,
    location: Location
}

fn parse_weight(field: &str) -> Result<f64> {
    let text = field.trim();
    match text.parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight >= 0.0 => Ok(weight),
        _ => Err(LoadErrorType::InvalidWeight(text.to_string()))
    }
}

fn parse_fields(fields: &[&str]) -> Result<(String, Expansion, f64)> {
    let left = fields[0].trim();
    if left.is_empty() || left.starts_with('\'') {
        return Err(LoadErrorType::MissingLeftSymbol);
    }

    let expansion = lexer::lex_rhs(fields[1])?;
    let weight = parse_weight(fields[2])?;

    return Ok((left.to_string(), expansion, weight));
}

fn parse_line(line: &str) -> Result<(String, Expansion, f64)> {
    let fields = line.split(',').collect_vec();
    if fields.len() != 3 {
        return Err(LoadErrorType::FieldCount(fields.len()));
    }

    return parse_fields(&fields);
}

fn parse_rule_line(line: &str, location: Location) -> LineResult<Rule> {
    parse_line(line)
        .map(|(left, expansion, weight)| Rule { left, expansion, weight, location: location.clone() })
        .map_err(|error| LoadError { location, error })
}

// Returns an iterator over the rule lines of a file, with the io errors
// wrapped in LoadError and enumerated. The first blank line terminates the
// rule section, so everything after it is never read.
fn file_rule_lines<'a>(file: File, path: &'a PathBuf) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.clone())))
        .enumerate()
        .map(|(num, line)| (num + 1, line))
        .take_while(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
}

fn grammar_from_rules(rules: Vec<Rule>) -> FileResult<Grammar> {
    verify_rules(&rules)?;

    let mut grammar = Grammar::new();
    if let Some(first) = rules.first() {
        grammar.start_symbol = first.left.clone();
    }
    for rule in rules {
        grammar.add_rule(rule.left, rule.expansion, rule.weight);
    }

    return Ok(grammar);
}

pub fn parse_file(path: &PathBuf) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.clone())])?;
    let lines = file_rule_lines(file, path);

    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_rule_line(&line, Location {
            file: path.clone(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition(LineResult::is_ok);
    if errors.len() > 0 {
        return Err(errors.into_iter().map(LineResult::unwrap_err).collect_vec());
    }
    let rules_unwrapped = rules.into_iter().map(LineResult::unwrap).collect_vec();

    return grammar_from_rules(rules_unwrapped);
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
    fn parse_normal_lines() {
        assert_eq!(parse_line("S, NP VP, 1.0").unwrap(), (
            "S".to_string(),
            vec![s_nonterminal("NP"), s_nonterminal("VP")],
            1.0
        ));
        assert_eq!(parse_line("NP, 'time', 0.3").unwrap(), (
            "NP".to_string(),
            vec![s_terminal("time")],
            0.3
        ));
        assert_eq!(parse_line("NP, N, 0.8").unwrap(), (
            "NP".to_string(),
            vec![s_nonterminal("N")],
            0.8
        ));
    }

    #[test]
    fn parse_malformed_lines() {
        // Wrong field counts
        assert_eq!(parse_line("NP VP, 0.5"), Err(LoadErrorType::FieldCount(2)));
        assert_eq!(parse_line("S, NP, VP, 1.0"), Err(LoadErrorType::FieldCount(4)));

        // Missing or quoted left symbol
        assert_eq!(parse_line(", NP VP, 1.0"), Err(LoadErrorType::MissingLeftSymbol));
        assert_eq!(parse_line("'time', NP, 1.0"), Err(LoadErrorType::MissingLeftSymbol));

        // Unclosed quote in the right-hand side
        assert_eq!(parse_line("VP, 'flies, 0.4"), Err(LoadErrorType::UnmatchedQuote));

        // Unusable weights
        assert_eq!(parse_line("NP, 'time', fast"), Err(LoadErrorType::InvalidWeight("fast".to_string())));
        assert_eq!(parse_line("NP, 'time', -0.3"), Err(LoadErrorType::InvalidWeight("-0.3".to_string())));
        assert_eq!(parse_line("NP, 'time', inf"), Err(LoadErrorType::InvalidWeight("inf".to_string())));
    }

    #[test]
    fn parse_normal_file() {
        let example_path = PathBuf::from("example_data/english.rules");
        let example_parsed = parse_file(&example_path).unwrap();

        let mut answer = Grammar::new();
        answer.start_symbol = "S".to_string();
        answer.add_rule("S".to_string(), vec![s_nonterminal("NP"), s_nonterminal("VP")], 1.0);
        answer.add_rule("NP".to_string(), vec![s_terminal("time")], 0.2);
        answer.add_rule("NP".to_string(), vec![s_nonterminal("DT"), s_nonterminal("NN")], 0.5);
        answer.add_rule("VP".to_string(), vec![s_terminal("flies")], 0.3);
        answer.add_rule("VP".to_string(), vec![s_nonterminal("VB"), s_nonterminal("PP")], 0.6);
        answer.add_rule("PP".to_string(), vec![s_nonterminal("IN"), s_nonterminal("NP")], 1.0);
        answer.add_rule("VB".to_string(), vec![s_terminal("flies")], 0.7);
        answer.add_rule("IN".to_string(), vec![s_terminal("like")], 1.0);
        answer.add_rule("DT".to_string(), vec![s_terminal("an")], 1.0);
        answer.add_rule("NN".to_string(), vec![s_terminal("arrow")], 1.0);

        assert_eq!(example_parsed, answer);
    }

    #[test]
    fn parse_malformed_file() {
        let example_path = PathBuf::from("example_data/malformed.rules");
        let example_parsed = parse_file(&example_path).unwrap_err();

        assert_eq!(example_parsed, vec![
            LoadError {
                location: Location {
                    file: example_path.clone(),
                    line: 2
                },
                error: LoadErrorType::FieldCount(2)
            },
            LoadError {
                location: Location {
                    file: example_path.clone(),
                    line: 3
                },
                error: LoadErrorType::UnmatchedQuote
            },
            LoadError {
                location: Location {
                    file: example_path,
                    line: 4
                },
                error: LoadErrorType::InvalidWeight("fast".to_string())
            }
        ]);
    }

    #[test]
    fn blank_line_terminates_file() {
        // The lines after the blank one would all be errors if they were read
        let example_path = PathBuf::from("example_data/terminated.rules");
        let example_parsed = parse_file(&example_path).unwrap();

        let mut answer = Grammar::new();
        answer.start_symbol = "S".to_string();
        answer.add_rule("S".to_string(), vec![s_nonterminal("NP"), s_nonterminal("VP")], 1.0);
        answer.add_rule("NP".to_string(), vec![s_terminal("time")], 0.3);
        answer.add_rule("VP".to_string(), vec![s_terminal("flies")], 0.4);

        assert_eq!(example_parsed, answer);
    }
}
