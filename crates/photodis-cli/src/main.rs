use photodis_cli::cli;

fn main() {
    cli::init_tracing();
    std::process::exit(cli::run_from_env());
}
