//! Interactive question loop
//!
//! Reads one question per line, prints the expander's variations, and stops on
//! `quit` (any letter case) or end of input.

use std::io::{self, BufRead, Write};

use crate::expander::QueryExpander;

/// Welcome text printed once before the first prompt
pub const BANNER: &str = "Welcome to LangChain Query Expander!
Enter a question to see different variations (or 'quit' to exit)

Example questions:
1. 'What is the weather like today?'
2. 'Can you recommend me a good book to read?'
3. 'How do I make a cup of coffee?'";

const QUIT_COMMAND: &str = "quit";

/// True for the exit sentinel. Input is expected to be trimmed already.
pub fn is_quit(input: &str) -> bool {
    input.eq_ignore_ascii_case(QUIT_COMMAND)
}

/// Write the numbered variation list followed by the count line
pub fn print_variations<W: Write>(out: &mut W, variations: &[String]) -> io::Result<()> {
    writeln!(out, "\nGenerated variations:")?;
    for (i, variation) in variations.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, variation)?;
    }
    writeln!(out, "Total number of variations created: {}", variations.len())
}

/// Report an error that ended the program
pub fn print_fatal<W: Write>(out: &mut W, err: &dyn std::fmt::Display) -> io::Result<()> {
    writeln!(out, "Error: {}", err)?;
    writeln!(out, "Please check your API key and try again.")
}

/// Run the prompt loop until `quit` or EOF.
///
/// Returns how many questions were sent for expansion.
pub async fn run_session<R: BufRead, W: Write>(
    expander: &QueryExpander,
    mut input: R,
    out: &mut W,
) -> io::Result<usize> {
    writeln!(out, "{}", BANNER)?;

    let mut asked = 0;
    let mut line = String::new();
    loop {
        write!(out, "\nEnter your question: ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            tracing::debug!("End of input, leaving session");
            writeln!(out)?;
            return Ok(asked);
        }

        let question = line.trim();
        if is_quit(question) {
            writeln!(out, "Thank you!")?;
            return Ok(asked);
        }

        writeln!(out, "\nGenerating variations of the questions...")?;
        let variations = expander.expand_query_to(question, out).await;
        asked += 1;

        print_variations(out, &variations)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_quit_any_case() {
        for input in ["quit", "Quit", "QUIT", "qUiT"] {
            assert!(is_quit(input), "{input} should quit");
        }
    }

    #[test]
    fn test_is_quit_rejects_everything_else() {
        for input in ["", "q", "exit", "quit now", "quitt"] {
            assert!(!is_quit(input), "{input:?} should not quit");
        }
    }

    #[test]
    fn test_print_variations_numbering() {
        let mut out = Vec::new();
        print_variations(&mut out, &["A".to_string(), "B".to_string()]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nGenerated variations:\n1. A\n2. B\nTotal number of variations created: 2\n"
        );
    }

    #[test]
    fn test_print_fatal_lines() {
        let mut out = Vec::new();
        print_fatal(&mut out, &"stream did not contain valid UTF-8").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: stream did not contain valid UTF-8\nPlease check your API key and try again.\n"
        );
    }

    #[test]
    fn test_print_variations_empty() {
        let mut out = Vec::new();
        print_variations(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nGenerated variations:\nTotal number of variations created: 0\n"
        );
    }
}
