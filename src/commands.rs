//! CLI command definitions for grindlog.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Record increments for a user in a game's active cycle
    Add {
        /// Game name (must already be in the ledger)
        game: String,

        /// Username (quote it if it contains spaces)
        username: String,

        /// Number of increments to add (1-100)
        #[arg(default_value_t = 1)]
        count: u32,
    },

    /// Import a spreadsheet into the ledger
    Import {
        /// File name or path; lists importable files when omitted
        file: Option<String>,
    },

    /// Export a game, or every game, to a spreadsheet
    Export {
        /// Game name, or "all" for one workbook with a sheet per game;
        /// lists exportable games when omitted
        game: Option<String>,
    },

    /// List games known to the ledger
    Games,
}
