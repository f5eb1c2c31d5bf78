use rpassword::read_password;
use std::io::{self, Write};

/// Everything needed to open a session: who, with what secret, and against
/// which gateway.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub category: String,
}

impl Credentials {
    /// Gathers credentials interactively. Username and category are plain
    /// input; the password prompt is hidden.
    pub fn prompt() -> io::Result<Self> {
        Ok(Self {
            username: prompt_text("[*] Username: ")?,
            password: prompt_password("[*] Password: ")?,
            category: prompt_text("[*] Category: ")?,
        })
    }
}

/// Asks only for the category, for paths that need no secret (such as
/// printing the proxy environment variables).
pub fn prompt_category() -> io::Result<String> {
    prompt_text("[*] Category: ")
}

/// Prompts the user for text input.
fn prompt_text(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_owned())
}

/// Prompts the user for password input (hidden).
fn prompt_password(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    read_password()
}
