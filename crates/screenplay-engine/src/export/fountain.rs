use std::sync::OnceLock;

use regex::Regex;

use crate::model::{BlockKind, Document};
use crate::parsing::FountainLineClassifier;

/// Serialise a document to Fountain-like plain text.
///
/// Output never contains more than one consecutive blank line and always
/// ends with exactly one newline.
pub fn to_fountain(doc: &Document) -> String {
    let blocks = doc.blocks();
    let mut lines: Vec<String> = Vec::with_capacity(blocks.len() * 2);

    for (i, block) in blocks.iter().enumerate() {
        let text = block.text.as_str();
        let next_is_dialogue_part = blocks
            .get(i + 1)
            .is_some_and(|next| next.kind.is_dialogue_part());
        match block.kind {
            BlockKind::SceneHeading => {
                lines.push(String::new());
                lines.push(trim_lines(&text.to_uppercase()));
                lines.push(String::new());
            }
            BlockKind::Action => {
                lines.push(text.to_string());
                lines.push(String::new());
            }
            BlockKind::Dialogue => {
                lines.push(trim_lines(text));
                // Further dialogue or parentheticals stay in the same group.
                if !next_is_dialogue_part {
                    lines.push(String::new());
                }
            }
            BlockKind::Character => {
                lines.push(String::new());
                lines.push(character_line(text));
            }
            BlockKind::Parenthetical => {
                lines.push(format!("({text})"));
            }
            BlockKind::Transition => {
                lines.push(String::new());
                lines.push(format!("> {}", trim_lines(&text.to_uppercase())));
                lines.push(String::new());
            }
            BlockKind::Heading { level } => {
                lines.push(String::new());
                lines.push(format!("{} {text}", "#".repeat(usize::from(level.get()))));
                lines.push(String::new());
            }
        }

        // Close the dialogue group so the next block is not read back as dialogue.
        if matches!(block.kind, BlockKind::Character | BlockKind::Parenthetical)
            && i + 1 < blocks.len()
            && !next_is_dialogue_part
        {
            lines.push(String::new());
        }
    }

    finish(&lines.join("\n"))
}

/// The importer trims these kinds line by line, so leading whitespace would
/// change how the line classifies.
fn trim_lines(text: &str) -> String {
    text.split('\n').map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Upper-cased character name. A name that reads as a scene heading
/// (`EXT. YARD`, imported from an indented line) is indented by one space so
/// it imports as a character again.
fn character_line(text: &str) -> String {
    let name = trim_lines(&text.to_uppercase());
    let first = name.split('\n').next().unwrap_or_default();
    let reads_as_scene_heading = FountainLineClassifier
        .classify(first)
        .is_some_and(|class| class.kind == BlockKind::SceneHeading);
    if reads_as_scene_heading {
        format!(" {name}")
    } else {
        name
    }
}

/// Collapse blank-line runs, trim, and terminate with a single newline.
fn finish(raw: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\n{3,}").expect("Invalid newline regex"));
    let collapsed = re.replace_all(raw, "\n\n");
    let mut out = collapsed.trim().to_string();
    out.push('\n');
    out
}

impl Document {
    pub fn to_fountain(&self) -> String {
        to_fountain(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    fn export(blocks: Vec<Block>) -> String {
        to_fountain(&Document::from_blocks(blocks))
    }

    #[test]
    fn scene_heading_is_uppercased() {
        assert_eq!(
            export(vec![Block::scene_heading("int. house - day")]),
            "INT. HOUSE - DAY\n"
        );
    }

    #[test]
    fn parenthetical_is_rewrapped() {
        assert_eq!(export(vec![Block::parenthetical("whispering")]), "(whispering)\n");
    }

    #[test]
    fn transition_gets_arrow_and_case() {
        assert_eq!(export(vec![Block::transition("cut to:")]), "> CUT TO:\n");
    }

    #[test]
    fn headings_use_hashes() {
        assert_eq!(
            export(vec![Block::heading(1, "Title"), Block::heading(3, "Scene list")]),
            "# Title\n\n### Scene list\n"
        );
    }

    #[test]
    fn dialogue_group_is_contiguous() {
        assert_eq!(
            export(vec![
                Block::action("Rain."),
                Block::character("john"),
                Block::parenthetical("beat"),
                Block::dialogue("Hello."),
                Block::action("He leaves."),
            ]),
            "Rain.\n\nJOHN\n(beat)\nHello.\n\nHe leaves.\n"
        );
    }

    #[test]
    fn character_before_action_is_separated() {
        assert_eq!(
            export(vec![Block::character("THE END"), Block::action("Credits roll.")]),
            "THE END\n\nCredits roll.\n"
        );
    }

    #[test]
    fn consecutive_dialogue_stays_in_one_group() {
        assert_eq!(
            export(vec![
                Block::character("JOHN"),
                Block::dialogue("First."),
                Block::parenthetical("beat"),
                Block::dialogue("Second."),
                Block::dialogue("Third."),
                Block::action("He goes."),
            ]),
            "JOHN\nFirst.\n(beat)\nSecond.\nThird.\n\nHe goes.\n"
        );
    }

    #[test]
    fn never_three_newlines_in_a_row() {
        let out = export(vec![
            Block::scene_heading("INT. A"),
            Block::transition("CUT TO:"),
            Block::heading(2, "Act"),
            Block::action(""),
            Block::action(""),
            Block::scene_heading("EXT. B"),
        ]);
        assert!(!out.contains("\n\n\n"), "{out:?}");
    }

    #[test]
    fn leading_whitespace_is_dropped_where_import_trims() {
        assert_eq!(
            export(vec![
                Block::scene_heading(" ext. yard"),
                Block::action("  Rain."),
                Block::transition("  cut to:"),
                Block::character("  mary "),
                Block::dialogue("  Hi.\n   Bye."),
            ]),
            "EXT. YARD\n\n  Rain.\n\n> CUT TO:\n\nMARY\nHi.\nBye.\n"
        );
    }

    #[test]
    fn character_that_reads_as_scene_heading_stays_indented() {
        assert_eq!(
            export(vec![
                Block::action("Rain."),
                Block::character(" ext. yard"),
                Block::dialogue("Hello."),
            ]),
            "Rain.\n\n EXT. YARD\nHello.\n"
        );
    }

    #[test]
    fn empty_document_is_single_newline() {
        assert_eq!(export(vec![]), "\n");
    }

    #[test]
    fn full_scene_snapshot() {
        let out = export(vec![
            Block::heading(1, "The Visit"),
            Block::scene_heading("int. kitchen - night"),
            Block::action("A kettle whistles."),
            Block::character("Mary"),
            Block::parenthetical("to herself"),
            Block::dialogue("Not again."),
            Block::transition("smash cut to:"),
        ]);
        insta::assert_snapshot!(out, @r"
        # The Visit

        INT. KITCHEN - NIGHT

        A kettle whistles.

        MARY
        (to herself)
        Not again.

        > SMASH CUT TO:
        ");
    }
}
