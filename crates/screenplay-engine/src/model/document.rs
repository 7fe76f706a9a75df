use super::block::{Align, Block, BlockKind, HeadingLevel};
use super::input_rules::apply_input_rule;

/// An edit to the block model.
///
/// All in-editor mutation goes through [`Document::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Convert a block to another kind, keeping its text.
    SetKind { index: usize, kind: BlockKind },
    /// Replace a block's text.
    SetText { index: usize, text: String },
    /// Insert a block before `index`; `index == len` appends.
    Insert { index: usize, block: Block },
    Remove { index: usize },
    /// Heading of `level` turns back into action, anything else becomes a heading.
    ToggleHeading { index: usize, level: HeadingLevel },
    SetAlign { index: usize, align: Option<Align> },
    /// Run the typing shortcuts (`@ `, `( `, `INT. `, `... TO: `) on a block.
    ApplyInputRule { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Block index {index} out of range (document has {len} blocks)")]
    OutOfRange { index: usize, len: usize },
}

/// An ordered sequence of blocks forming a screenplay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub(crate) blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Block-wise [`Block::equivalent`].
    pub fn equivalent(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .blocks
                .iter()
                .zip(&other.blocks)
                .all(|(a, b)| a.equivalent(b))
    }

    /// Character block that a dialogue or parenthetical at `index` belongs to.
    ///
    /// Walks back over the dialogue group; returns `None` when the block is
    /// not part of a group or the group has no character.
    pub fn speaker(&self, index: usize) -> Option<&Block> {
        let block = self.blocks.get(index)?;
        if !block.kind.is_dialogue_part() {
            return None;
        }
        self.blocks[..index]
            .iter()
            .rev()
            .find(|b| !b.kind.is_dialogue_part())
            .filter(|b| b.kind == BlockKind::Character)
    }

    /// Apply an edit. Returns whether the document changed.
    ///
    /// An out-of-range index leaves the document untouched.
    pub fn apply(&mut self, cmd: Cmd) -> Result<bool, EditError> {
        match cmd {
            Cmd::SetKind { index, kind } => {
                let block = self.block_mut(index)?;
                let changed = block.kind != kind;
                block.kind = kind;
                Ok(changed)
            }
            Cmd::SetText { index, text } => {
                let block = self.block_mut(index)?;
                let changed = block.text != text;
                block.text = text;
                Ok(changed)
            }
            Cmd::Insert { index, block } => {
                if index > self.blocks.len() {
                    return Err(self.out_of_range(index));
                }
                self.blocks.insert(index, block);
                Ok(true)
            }
            Cmd::Remove { index } => {
                if index >= self.blocks.len() {
                    return Err(self.out_of_range(index));
                }
                self.blocks.remove(index);
                Ok(true)
            }
            Cmd::ToggleHeading { index, level } => {
                let block = self.block_mut(index)?;
                block.kind = match block.kind {
                    BlockKind::Heading { level: current } if current == level => BlockKind::Action,
                    _ => BlockKind::Heading { level },
                };
                Ok(true)
            }
            Cmd::SetAlign { index, align } => {
                let block = self.block_mut(index)?;
                let changed = block.align != align;
                block.align = align;
                Ok(changed)
            }
            Cmd::ApplyInputRule { index } => {
                let block = self.block_mut(index)?;
                match apply_input_rule(block) {
                    Some(converted) => {
                        *block = converted;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
        }
    }

    fn block_mut(&mut self, index: usize) -> Result<&mut Block, EditError> {
        let len = self.blocks.len();
        self.blocks
            .get_mut(index)
            .ok_or(EditError::OutOfRange { index, len })
    }

    fn out_of_range(&self, index: usize) -> EditError {
        EditError::OutOfRange {
            index,
            len: self.blocks.len(),
        }
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
