/*
    This module renders parse trees and charts as LaTeX markup
*/

use itertools::Itertools;

use crate::cky::{Backpointer, Chart, CkyParser, ParseTree, TreeNode};

// Qtree markup for a parse tree
pub fn latex_tree(tree: &ParseTree) -> String {
    match &tree.node {
        TreeNode::Leaf(token) => format!("[.{} {} ]", tree.symbol, token),
        TreeNode::Unary(child) => format!("[.{} {} ]", tree.symbol, latex_tree(child)),
        TreeNode::Branch(left, right) => format!("[.{} {} {} ]", tree.symbol, latex_tree(left), latex_tree(right)),
    }
}

// One cell's entries: how each present symbol was derived
fn describe_cell(parser: &CkyParser, chart: &Chart, start: usize, end: usize) -> Vec<String> {
    let names = parser.symbol_names();

    (0..chart.num_symbols())
        .filter_map(|symbol| chart.backpointer(start, end, symbol).map(|back| (symbol, back)))
        .map(|(symbol, back)| match *back {
            Backpointer::Lexical => format!("{}: {}", names[symbol], chart.token(start)),
            Backpointer::Unary(child) => format!("{}: {}", names[symbol], names[child]),
            Backpointer::Split { split, left, right } => {
                format!("{}: {},{},{}", names[symbol], split, names[left], names[right])
            }
        })
        .collect()
}

fn format_cell(entries: Vec<String>) -> String {
    match &entries[..] {
        [] => "•".to_string(),
        [single] => single.clone(),
        _ => format!(
            "\\begin{{tabular}}[c]{{@{{}}l@{{}}}}{}\\end{{tabular}}",
            entries.iter().join("\\\\ ")
        ),
    }
}

// Tabular rendering of every non-empty cell per (row, column)
pub fn latex_chart(parser: &CkyParser, chart: &Chart) -> String {
    let n = chart.len();

    let mut output = format!("\\begin{{tabular}}{{|{}}}\n", "c|".repeat(n));
    output += &(0..n)
        .map(|i| format!("\\multicolumn{{1}}{{c}}{{{}}}", chart.token(i)))
        .join(" & ");
    output += " \\\\\n";

    for row in 0..n {
        let cells = (row + 1..=n)
            .map(|col| format_cell(describe_cell(parser, chart, row, col)))
            .join(" & ");
        if row == 0 {
            output += &format!("\\hline\n{} \\\\\n\\hline\n", cells);
        } else {
            output += &format!(
                "\\multicolumn{{{}}}{{c|}}{{}} & {} \\\\\n\\cline{{{}-{}}}\n",
                row, cells, row + 1, n
            );
        }
    }

    output += "\\end{tabular}\n";
    return output;
}
