use serde::{Deserialize, Serialize};

use super::ids::EpisodeId;

/// One reasoning run over a single overall question.
///
/// Fields are read-only: rebinding the question means starting a new episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    id: EpisodeId,
    overall_question: String,
}

impl Episode {
    /// The whole example text is taken as the overall question.
    pub fn new(example: impl Into<String>) -> Self {
        Self {
            id: EpisodeId::generate(),
            overall_question: example.into(),
        }
    }

    pub fn id(&self) -> EpisodeId {
        self.id
    }

    pub fn overall_question(&self) -> &str {
        &self.overall_question
    }
}
