use colored::Colorize;
use outbox_schema::cli::CommandLineInterface;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "outbox_schema=debug",
        _ => "outbox_schema=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let command_line_interface = CommandLineInterface::load();
    init_tracing(command_line_interface.verbose);
    match command_line_interface.run() {
        Ok(0) => {}
        Ok(failures) => {
            eprintln!("{}", format!("{failures} document(s) failed schema inference").red());
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            std::process::exit(2);
        }
    }
}
