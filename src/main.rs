//! snipnote - Snippet Notebook
//!
//! Command line front-end: loads the collection, performs one action and
//! renders the result.

use color_eyre::Result;
use color_eyre::eyre::eyre;
use snipnote::cli;
use snipnote::config::Config;
use snipnote::logging;
use snipnote::models::StorageManager;
use snipnote::session::Session;
use snipnote::shell::SystemShell;

fn main() -> Result<()> {
    color_eyre::install()?;

    let (config, problem) = Config::load();
    logging::init(config.debug);
    if let Some(e) = problem {
        tracing::warn!(error = %format!("{:#}", e), "ignoring config file");
    }

    let data_file = config.data_file().map_err(|e| eyre!("{:#}", e))?;
    let store = StorageManager::new(data_file);
    tracing::debug!(path = %store.path().display(), "using data file");
    let mut session = Session::open(store);

    let args: Vec<String> = std::env::args().skip(1).collect();
    cli::execute_cli(&args, &mut session, &SystemShell).map_err(|e| eyre!("{}", e))?;

    Ok(())
}
