//! Adapters that shell out to local commands

mod clipboard;
mod scheduler;

pub use clipboard::CommandClipboard;
pub use scheduler::{CommandScheduler, TWEETS_FILE_PLACEHOLDER};

/// Replace `placeholder` in every argument, reporting whether it appeared at all
fn expand_args(args: &[String], placeholder: &str, value: &str) -> (Vec<String>, bool) {
    let mut used = false;
    let expanded = args
        .iter()
        .map(|arg| {
            if arg.contains(placeholder) {
                used = true;
                arg.replace(placeholder, value)
            } else {
                arg.clone()
            }
        })
        .collect();

    (expanded, used)
}
