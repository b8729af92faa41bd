use anyhow::Result;
use salmon_core::attacks;
use salmon_core::uci::UciHandler;

fn main() -> Result<()> {
    env_logger::init();
    attacks::init();

    let mut uci = UciHandler::new();
    uci.run()
}
