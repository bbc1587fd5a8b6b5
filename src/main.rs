use std::process::ExitCode;

fn main() -> ExitCode {
    riffle::runtime::run()
}
