use tributary::{cli, ui};

fn main() {
    if let Err(err) = cli::run() {
        ui::error(format!("{err:#}"));
        std::process::exit(1);
    }
}
