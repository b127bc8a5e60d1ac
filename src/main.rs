use glue_vis::runner::{self, NativeHost};
use glue_vis::{cli, logging};

fn main() {
    if let Err(e) = logging::init_logger() {
        eprintln!("{e}");
    }

    let code = match cli::parse(std::env::args_os()) {
        Ok(invocation) => runner::run(&invocation, &mut NativeHost),
        Err(err) => cli::report(&err),
    };
    std::process::exit(code);
}
