use clap::crate_authors;
use clap::crate_description;
use clap::crate_version;
pub use clap::Parser;
use rollq_lib::Explode;
use std::path::PathBuf;

const ROLLQ_AUTHOR: &str = crate_authors!();
const ROLLQ_VERSION: &str = crate_version!();
const ROLLQ_ABOUT: &str = crate_description!();
const ROLLQ_FLAG_D_SHORT: char = 'd';
const ROLLQ_FLAG_D_HELP: &str = "Enable Debug logging";
const ROLLQ_FLAG_S_SHORT: char = 's';
const ROLLQ_FLAG_S_HELP: &str = "Seed the dice for reproducible rolls";
const ROLLQ_FLAG_E_SHORT: char = 'e';
const ROLLQ_FLAG_E_HELP: &str = "Explode rule for every roll: none, max, a face or a range like 4..6";
const ROLLQ_FLAG_HISTORY_HELP: &str = "File keeping the line history";
const ROLLQ_HISTORY_FILE: &str = "history";

#[derive(Parser, Debug)]
#[command(author = ROLLQ_AUTHOR, version = ROLLQ_VERSION, about = ROLLQ_ABOUT)]
pub struct Args {
    #[arg(short = ROLLQ_FLAG_D_SHORT, long, help = ROLLQ_FLAG_D_HELP, action)]
    pub debug: bool,

    #[arg(short = ROLLQ_FLAG_S_SHORT, long, help = ROLLQ_FLAG_S_HELP)]
    pub seed: Option<u64>,

    #[arg(short = ROLLQ_FLAG_E_SHORT, long, help = ROLLQ_FLAG_E_HELP, default_value = "none")]
    pub explode: Explode,

    #[arg(long, help = ROLLQ_FLAG_HISTORY_HELP, default_value = ROLLQ_HISTORY_FILE)]
    pub history: PathBuf,
}
