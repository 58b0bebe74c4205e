/// Shell-style walk over previously submitted lines
#[derive(Debug, Clone, Default)]
pub struct CommandRecall {
    entries: Vec<String>,
    cursor: Option<usize>,
    /// What was being typed before the walk started
    draft: String,
}

impl CommandRecall {
    /// Record a submitted line; repeats of the last entry are collapsed
    pub fn push(&mut self, line: &str) {
        if self.entries.last().map(String::as_str) != Some(line) {
            self.entries.push(line.to_string());
        }
        self.cursor = None;
        self.draft.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_walking(&self) -> bool {
        self.cursor.is_some()
    }

    /// Older entry, stopping at the oldest
    pub fn older(&mut self, current: &str) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }

        let index = match self.cursor {
            None => {
                self.draft = current.to_string();
                self.entries.len() - 1
            }
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Newer entry; past the newest the draft comes back and the walk ends
    pub fn newer(&mut self) -> Option<&str> {
        let i = self.cursor?;
        if i + 1 < self.entries.len() {
            self.cursor = Some(i + 1);
            self.entries.get(i + 1).map(String::as_str)
        } else {
            self.cursor = None;
            Some(&self.draft)
        }
    }
}

#[cfg(test)]
#[path = "recall_tests.rs"]
mod recall_tests;
