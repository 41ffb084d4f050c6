use crate::grammar::Symbol;
use super::LoadErrorType::{BadArity, MixedPair};
use super::{FileResult, LoadError, LoadErrors, Rule};

// Checks that a right-hand side fits Chomsky normal form: a single symbol, or
// a pair of nonterminals
fn check_expansion(rule: &Rule) -> Option<LoadError> {
    let error = match rule.expansion.len() {
        1 => return None,
        2 if rule.expansion.iter().any(|s| matches!(s, Symbol::Terminal(_))) => MixedPair,
        2 => return None,
        n => BadArity(n),
    };

    Some(LoadError {
        location: rule.location.clone(),
        error
    })
}

pub fn verify_rules(rules: &[Rule]) -> FileResult<()> {
    let errors: LoadErrors = rules.iter().filter_map(check_expansion).collect();

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}
