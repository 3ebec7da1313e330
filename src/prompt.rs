use anyhow::Result;
use dialoguer::Input;
use std::io::ErrorKind;

/// One-shot collection of the user's recalled line.
///
/// The session blocks on [`ask`](AnswerPrompt::ask) until the user submits
/// or aborts. `Ok(None)` means the prompt was aborted (interrupt or closed
/// stdin); the round then ends without grading.
pub trait AnswerPrompt {
    fn ask(&mut self, label: &str) -> Result<Option<String>>;
}

/// Interactive prompt on the controlling terminal.
#[derive(Debug, Default)]
pub struct TermPrompt;

impl AnswerPrompt for TermPrompt {
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        let input = Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text();

        match input {
            Ok(answer) => Ok(Some(answer)),
            Err(dialoguer::Error::IO(e))
                if matches!(e.kind(), ErrorKind::Interrupted | ErrorKind::UnexpectedEof) =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
