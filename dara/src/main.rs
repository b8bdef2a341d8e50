use std::env;
use std::io;

fn main() {
    let user = env::var("USER").unwrap_or_else(|_| "there".to_string());
    println!("Hello {}, welcome to the dara repl!", user);
    println!("Type in commands below to evaluate your code.");

    let stdin = io::stdin();
    let stdout = io::stdout();
    // I/O failures on the repl streams are host faults and fatal
    dara::repl::run(stdin.lock(), stdout.lock()).expect("repl I/O failed");
}
