mod cli;
mod cky;
mod error_handling;
mod grammar;
mod parser;
mod render;

use clap::Parser;

fn main() {
    let args = cli::Cli::parse();

    let grammar = match parser::parse_file(&args.file) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            std::process::exit(1);
        }
    };

    let engine = match cky::CkyParser::new(&grammar, args.file.clone()) {
        Ok(engine) => engine,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    let chart = engine.build(&args.sentence);
    let start = args.start.as_ref().unwrap_or(&grammar.start_symbol);

    match engine.extract(&chart, start) {
        Ok(tree) => {
            if args.latex {
                println!("{}", render::latex_tree(&tree));
            } else {
                println!("{}", tree);
            }
        }
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(2);
        }
    }

    if args.table {
        println!("{}", render::latex_chart(&engine, &chart));
    }
}
