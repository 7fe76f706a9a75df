/// Greedy word wrap to `columns` glyphs per line.
///
/// Embedded newlines are hard breaks and empty input yields one empty line.
/// A word longer than the budget gets a line of its own and overflows it, so
/// every line holds at least one word.
pub fn wrap(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut len = 0;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if len == 0 {
                line.push_str(word);
                len = word_len;
            } else if len + 1 + word_len <= columns {
                line.push(' ');
                line.push_str(word);
                len += 1 + word_len;
            } else {
                out.push(std::mem::take(&mut line));
                line.push_str(word);
                len = word_len;
            }
        }
        out.push(line);
    }

    out
}
