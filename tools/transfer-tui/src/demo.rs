//! Built-in recipient directory used when no `--directory` file is given.

use std::path::Path;

use transfer_flow::{FlowResult, Recipient, RecipientDirectory};

/// Sample payees for demo sessions.
pub fn demo_directory() -> RecipientDirectory {
    RecipientDirectory::new(vec![
        Recipient::new("Alice Chen", "Cathay United Bank", "***-***-1234"),
        Recipient::new("Brian Wu", "E.SUN Bank", "***-***-5678"),
        Recipient::new("Cindy Lin", "CTBC Bank", "***-***-9012"),
        Recipient::new("David Huang", "Taishin Bank", "***-***-3456"),
        Recipient::new("Emily Tsai", "Fubon Bank", "***-***-7890"),
    ])
}

/// Load the directory from `path`, or fall back to the demo list.
pub fn load_directory(path: Option<&Path>) -> FlowResult<RecipientDirectory> {
    match path {
        Some(path) => RecipientDirectory::load(path),
        None => Ok(demo_directory()),
    }
}
