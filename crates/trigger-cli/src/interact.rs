//! Prompts and browser launching.

use std::io::{self, BufRead, Write};

/// Terminal-facing side effects of a command.
pub trait Interaction {
    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&self, message: &str) -> bool;

    /// Open a URL in the user's browser.
    fn open_url(&self, url: &str) -> io::Result<()>;
}

/// Interaction through stdin/stdout and the system browser.
pub struct Terminal;

impl Interaction for Terminal {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            // End of input
            Ok(0) => false,
            Ok(_) => is_affirmative(&answer),
            Err(_) => false,
        }
    }

    fn open_url(&self, url: &str) -> io::Result<()> {
        open::that(url)
    }
}

/// `y` or `yes`, any case, surrounding whitespace ignored.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
