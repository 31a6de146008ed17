//! Options picked for the current question

use crate::models::QuestionKind;

/// Insertion-ordered set of option strings.
///
/// Order matters: it is sent to the backend as `respuestasUsuario`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    options: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one toggle under the question's answer mode
    pub fn toggle(&mut self, kind: QuestionKind, option: &str) {
        match kind {
            QuestionKind::Single => {
                self.options.clear();
                self.options.push(option.to_string());
            }
            QuestionKind::Multiple => {
                if let Some(pos) = self.options.iter().position(|o| o == option) {
                    self.options.remove(pos);
                } else {
                    self.options.push(option.to_string());
                }
            }
        }
    }

    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn clear(&mut self) {
        self.options.clear();
    }

    pub fn as_slice(&self) -> &[String] {
        &self.options
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.options.clone()
    }
}
