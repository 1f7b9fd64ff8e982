#![cfg(feature = "cli")]

use ansi_term::Colour;
use prefix_store::{PrefixStore, PrefixStoreError};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const HISTORY_FILE: &str = "/tmp/prefix-store-history.txt";

fn print_usage() {
    println!("commands:");
    println!("  add <addr> <extra_bits> <flags>   insert a prefix");
    println!("  <addr>                             longest-prefix-match lookup");
    println!("  dump                               print the current trees");
    println!("  help                               show this message");
}

fn handle_add(store: &mut PrefixStore, parts: &[&str]) {
    let [addr, extra_bits, flags] = parts else {
        println!("{}", Colour::Yellow.paint("usage: add <addr> <extra_bits> <flags>"));
        return;
    };
    // extra_bits is parsed from text here, so a literal "-1" is a real
    // possibility the library's unsigned entry point can't see — parse as
    // signed first and surface it as the dedicated error (spec.md §7).
    let Ok(extra_bits) = extra_bits.parse::<i64>() else {
        println!("{}", Colour::Yellow.paint("extra_bits must be an integer"));
        return;
    };
    let Ok(flags) = flags.parse::<u32>() else {
        println!("{}", Colour::Yellow.paint("flags must be a non-negative integer"));
        return;
    };
    let extra_bits = match u32::try_from(extra_bits) {
        Ok(extra_bits) => extra_bits,
        Err(_) => {
            let err = PrefixStoreError::NegativeExtraBits(extra_bits);
            println!("{}", Colour::Red.paint(err.to_string()));
            return;
        }
    };
    match store.add(*addr, extra_bits, flags) {
        Ok(()) => println!("inserted {addr} (extra_bits={extra_bits}, flags={flags:#x})"),
        Err(err) => println!("{}", Colour::Red.paint(err.to_string())),
    }
}

fn handle_lookup(store: &PrefixStore, addr: &str) {
    match store.get_net(addr) {
        Ok(result) => println!("{result}"),
        Err(err) => println!("{}", Colour::Red.paint(err.to_string())),
    }
}

fn main() -> rustyline::Result<()> {
    let mut store = PrefixStore::new();
    let mut rl = DefaultEditor::new()?;
    if rl.load_history(HISTORY_FILE).is_err() {
        println!("No previous history.");
    }
    print_usage();

    loop {
        match rl.readline("(prefix-store)> ") {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let parts: Vec<&str> = line.split_whitespace().collect();
                match parts.as_slice() {
                    [] => continue,
                    ["help"] => print_usage(),
                    ["dump"] => print!("{}", store.dump()),
                    ["add", rest @ ..] => handle_add(&mut store, rest),
                    [addr] => handle_lookup(&store, addr),
                    _ => println!("{}", Colour::Yellow.paint("unrecognised command, try 'help'")),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }
    rl.save_history(HISTORY_FILE)?;
    Ok(())
}
