use std::io::{self, BufRead, Write};

use super::identity::IdentityInput;
use super::questionnaire::Question;
use super::scoring::AnswerSource;

/// Line-oriented prompter over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `prompt`, then reads one line without its line ending.
    /// End of input is an error rather than an empty answer.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("input closed before answering '{prompt}'"),
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn identity_input(&mut self) -> io::Result<IdentityInput> {
        let identifier = self.ask("Enter your NHS number:")?;
        let surname = self.ask("Enter your surname:")?;
        let date_of_birth = self.ask("Enter your date of birth (dd-mm-yyyy):")?;
        Ok(IdentityInput::new(
            identifier.trim(),
            surname.trim(),
            date_of_birth.trim(),
        ))
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> AnswerSource for Prompter<R, W> {
    fn next_answer(&mut self, _key: &str, question: &Question) -> io::Result<String> {
        self.ask(&question.text)
    }
}
