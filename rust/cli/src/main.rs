use std::io;

fn main() {
    oddsmaker_cli::logging::init_logging();
    let code = oddsmaker_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
