use std::path::Path;

use stockpile_infra::DEFAULT_STORE_PATH;

fn main() -> anyhow::Result<()> {
    stockpile_observability::init();

    stockpile_cli::run_demo(Path::new(DEFAULT_STORE_PATH))
}
