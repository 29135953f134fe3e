/// One word per line with a trailing newline.
pub fn render_word_list(words: &[String]) -> String {
    let mut out = words.join("\n");
    out.push('\n');
    out
}
