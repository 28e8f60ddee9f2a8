use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ReelError, ReelResult};

/// A text post to narrate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post title, spoken first.
    pub title: String,
    /// Post body.
    #[serde(default)]
    pub body: String,
}

impl Post {
    /// Load a post from JSON (`{"title": ..., "body": ...}`).
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open post JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Load a post from any JSON reader.
    pub fn from_reader(r: impl std::io::Read) -> ReelResult<Self> {
        serde_json::from_reader(r).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Narration text: the title as its own sentence, then the body.
    pub fn full_text(&self) -> String {
        let title = self.title.trim();
        let body = self.body.trim();
        let stop = if title.ends_with(['.', '!', '?']) { "" } else { "." };
        match (title.is_empty(), body.is_empty()) {
            (true, _) => body.to_string(),
            (false, true) => format!("{title}{stop}"),
            (false, false) => format!("{title}{stop} {body}"),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/source.rs"]
mod tests;
