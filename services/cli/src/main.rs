use triage_cli::run;

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err.user_message());
        std::process::exit(1);
    }
}
