use pontifex_core::{DeckSource, Mode, RunOutcome};
use serde::{Deserialize, Serialize};

/// Raw lines of an input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFile {
    pub text: String,
    #[serde(default)]
    pub key: Option<String>,
}

/// Everything a summary needs about one run. Decks are kept in their
/// textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub mode: Mode,
    pub source: DeckSource,
    pub cleaned_input: String,
    /// Only set for alphabetic keys.
    #[serde(default)]
    pub cleaned_key: Option<String>,
    pub input_deck: String,
    pub final_deck: String,
    pub output: String,
}

impl RunReport {
    pub fn new(cleaned_input: &str, cleaned_key: Option<&str>, outcome: &RunOutcome) -> Self {
        Self {
            mode: outcome.mode,
            source: outcome.source,
            cleaned_input: cleaned_input.to_string(),
            cleaned_key: cleaned_key.map(str::to_string),
            input_deck: outcome.input_deck.to_string(),
            final_deck: outcome.final_deck.to_string(),
            output: outcome.output.clone(),
        }
    }

    /// Human readable summary, one labelled line per field.
    pub fn render(&self) -> String {
        let mut text = String::new();
        text.push_str(&format!("{} Mode\n", self.mode));
        text.push_str(&format!("Cleaned input text: '{}'\n", self.cleaned_input));
        match &self.cleaned_key {
            Some(key) => {
                text.push_str(&format!("Cleaned input key: '{key}'\n"));
                text.push_str(&format!("Converted deck: '{}'\n", self.input_deck));
            }
            None => text.push_str(&format!("Input deck: '{}'\n", self.input_deck)),
        }
        text.push_str(&format!("Ending deck: '{}'\n", self.final_deck));
        text.push_str(&format!("Output text: '{}'\n", self.output));
        text
    }
}
