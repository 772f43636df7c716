use std::io::{self, BufRead, Write};

/// Asks a yes/no question on the terminal; anything but y/yes is a no
pub fn confirm(question: &str) -> io::Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{} [y/N] ", question)?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
