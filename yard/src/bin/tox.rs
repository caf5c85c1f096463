use tracing_subscriber::EnvFilter;

mod repl {
    use yard::ShuntingParser;

    pub fn evalexpr(parser: &ShuntingParser<f64>, input: &str) {
        match parser.to_rpn(input) {
            Err(e) => println!("Parse error: {}", e),
            Ok(expr) => match expr.eval() {
                Err(e) => println!("Eval error: {}", e),
                Ok(Some(result)) => println!("{} = {}", expr, result),
                Ok(None) => (),
            },
        };
    }
}

fn main() {
    let filter = EnvFilter::try_from_env("TOX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let parser = match yard::calc::math_parser() {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("Bad calculator setup: {}", e);
            std::process::exit(1);
        }
    };

    if std::env::args().len() > 1 {
        let input = std::env::args().skip(1).collect::<Vec<String>>().join(" ");
        repl::evalexpr(&parser, &input);
        return;
    }

    let mut rl = match rustyline::DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Can't start the line editor: {}", e);
            std::process::exit(1);
        }
    };
    let histpath = dirs::home_dir().map(|h| h.join(".tox_history"));
    if let Some(path) = &histpath {
        if rl.load_history(path).is_err() {
            println!("No history yet");
        }
    }
    while let Ok(input) = rl.readline(">> ") {
        let _ = rl.add_history_entry(input.as_str());
        repl::evalexpr(&parser, &input);
    }
    if let Some(path) = &histpath {
        if let Err(e) = rl.save_history(path) {
            eprintln!("Can't save history: {}", e);
        }
    }
}
