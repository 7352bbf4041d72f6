use linearg::{CliOption, CommandLineParser, Param};
use std::cell::{Cell, RefCell};

fn main() {
    let all = Cell::new(false);
    let almost_all = Cell::new(false);
    let escape = Cell::new(false);
    let one_per_line = Cell::new(false);
    let help = Cell::new(false);
    let width: Cell<u32> = Cell::new(0);
    let file: RefCell<Option<String>> = RefCell::new(None);
    let set_flag = |flag: &str| match flag {
        "a" | "all" => all.set(true),
        "A" | "almost-all" => almost_all.set(true),
        "b" | "escape" => escape.set(true),
        "l" => one_per_line.set(true),
        _ => unreachable!("unregistered flag '{flag}'"),
    };

    let mut parser = CommandLineParser::new("ls")
        .usage("[-Aablh | --width=WIDTH | -w WIDTH | --help]... [FILE]")
        .header(
            "List information about the FILEs (the current directory by default).\n\
             Sort entries alphabetically if none of -cftuvSUX nor --sort is specified.",
        )
        .option(CliOption::new("a", "all", "do not ignore entries starting with .").callback(set_flag))
        .option(CliOption::new("A", "almost-all", "do not list implied . and ..").callback(set_flag))
        .option(
            CliOption::new("b", "escape", "print C-style escapes for nongraphic characters")
                .callback(set_flag),
        )
        .option(CliOption::short("l", "list one file per line").callback(set_flag))
        .option(CliOption::new("w", "width", "set output width to COLS.  0 means no limit"))
        .option(CliOption::new("h", "help", "display this help and exit").callback(|_| help.set(true)))
        .param(Param::new("WIDTH").callback(|w| width.set(w.parse().unwrap_or(0))))
        .param(Param::new("FILE").callback(|f| {
            file.replace(Some(f.to_string()));
        }))
        .footer(
            "Exit status:\n\
             0  if OK,\n\
             1  if minor problems (e.g., cannot access subdirectory),\n\
             2  if serious trouble (e.g., cannot access command-line argument).",
        )
        .build();

    if let Err(error) = parser.parse_tokens(
        std::env::args()
            .skip(1)
            .collect::<Vec<String>>()
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .as_slice(),
    ) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }

    if help.get() {
        parser.print_help();
        return;
    }

    drop(parser);
    println!(
        "ls {}{}{}{}--width={} {}",
        if all.get() { "-a " } else { "" },
        if almost_all.get() { "-A " } else { "" },
        if escape.get() { "-b " } else { "" },
        if one_per_line.get() { "-l " } else { "" },
        width.get(),
        file.into_inner().unwrap_or_default(),
    );
}
