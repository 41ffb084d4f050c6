use std::fmt::Display;

// A node in a reconstructed parse: the symbol plus either the spanned token
// or the derived subtrees
#[derive(Debug, PartialEq)]
pub struct ParseTree {
    pub symbol: String,
    pub node: TreeNode,
}

#[derive(Debug, PartialEq)]
pub enum TreeNode {
    Leaf(String),
    Unary(Box<ParseTree>),
    Branch(Box<ParseTree>, Box<ParseTree>),
}

impl ParseTree {
    // The spanned tokens, left to right
    pub fn leaves(&self) -> Vec<&str> {
        match &self.node {
            TreeNode::Leaf(token) => vec![token.as_str()],
            TreeNode::Unary(child) => child.leaves(),
            TreeNode::Branch(left, right) => {
                let mut leaves = left.leaves();
                leaves.extend(right.leaves());
                leaves
            }
        }
    }
}

impl Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node {
            TreeNode::Leaf(token) => write!(f, "{}({})", self.symbol, token),
            TreeNode::Unary(child) => write!(f, "{}({})", self.symbol, child),
            TreeNode::Branch(left, right) => write!(f, "{}({}, {})", self.symbol, left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: &str, token: &str) -> ParseTree {
        ParseTree {
            symbol: symbol.to_string(),
            node: TreeNode::Leaf(token.to_string())
        }
    }

    fn example_tree() -> ParseTree {
        ParseTree {
            symbol: "S".to_string(),
            node: TreeNode::Branch(
                Box::new(leaf("NP", "time")),
                Box::new(ParseTree {
                    symbol: "VP".to_string(),
                    node: TreeNode::Unary(Box::new(leaf("VB", "flies")))
                })
            )
        }
    }

    #[test]
    fn leaves_read_left_to_right() {
        assert_eq!(example_tree().leaves(), vec!["time", "flies"]);
    }

    #[test]
    fn display_is_bracketed() {
        assert_eq!(example_tree().to_string(), "S(NP(time), VP(VB(flies)))");
    }
}
