use clap::Parser;
use tollwise::app::cli::CliArgs;
use tollwise::app::pipeline;

fn main() {
    env_logger::init();

    log::debug!("cwd: {:?}", std::env::current_dir());
    let args = CliArgs::parse();
    match pipeline::run_pipeline(&args) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
