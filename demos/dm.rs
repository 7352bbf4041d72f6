use linearg::{CliOption, CommandLineParser, Param};
use std::cell::Cell;

fn main() {
    let help = Cell::new(false);
    let mut parser = CommandLineParser::new("dm")
        .usage("{ params... | [-h | --help] }")
        .header("Header text")
        .option(CliOption::new("h", "help", "Displays usage info").callback(|_| help.set(true)))
        .param(Param::new("params").callback(|argument| println!("Got argument: {argument}")))
        .footer("Footer text")
        .build();

    let command_input: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

    if let Err(error) = parser.try_usage(0, &tokens) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }

    if help.get() {
        parser.print_help();
        std::process::exit(1);
    }
}
