use crate::model::{Block, Document};

use super::classify::FountainLineClassifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupState {
    /// Lines are classified on their own.
    TopLevel,
    /// Inside a character's dialogue group until the next blank line.
    Dialogue,
}

/// Line-at-a-time state machine that turns classified lines into blocks.
pub struct BlockBuilder {
    classifier: FountainLineClassifier,
    state: GroupState,
    out: Vec<Block>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            classifier: FountainLineClassifier,
            state: GroupState::TopLevel,
            out: vec![],
        }
    }

    pub fn push(&mut self, raw: &str) {
        match self.state {
            GroupState::Dialogue => match self.classifier.classify_in_dialogue(raw) {
                Some(class) => self.out.push(class.into_block()),
                None => self.state = GroupState::TopLevel,
            },
            GroupState::TopLevel => {
                // Blank lines are separators only.
                let Some(class) = self.classifier.classify(raw) else {
                    return;
                };
                if class.opens_dialogue() {
                    self.state = GroupState::Dialogue;
                }
                self.out.push(class.into_block());
            }
        }
    }

    pub fn finish(self) -> Document {
        Document::from_blocks(self.out)
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
