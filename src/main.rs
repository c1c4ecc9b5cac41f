use std::process;

use blog_store::logging::init_logging;
use blog_store::{Config, Store};
use tracing::{error, info};

fn run() -> blog_store::Result<()> {
    let config = Config::from_env()?;
    let store = Store::open(&config)?;

    info!(
        users = store.users().count()?,
        posts = store.posts().count()?,
        "database ready"
    );
    Ok(())
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}
