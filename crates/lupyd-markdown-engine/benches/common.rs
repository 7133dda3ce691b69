// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_post(paragraphs: usize) -> String {
    let base = "###Weekly update###\nShipped ***faster builds*** and //better// _logs_ today, thanks @ops_team #release\n>| quoted feedback from the channel\nDetails in [docs](https://example.com/notes) and ```cargo run --release``` |||no spoilers|||\n\n";
    base.repeat(paragraphs)
}

#[allow(dead_code)]
pub fn generate_nested(depth: usize) -> String {
    let fences = ["***", "///", "___", "###"];
    let mut content = String::from("core");
    for level in 0..depth {
        let fence = fences[level % fences.len()];
        content = format!("{fence}lvl{level} {content} end{fence}");
    }
    content
}

#[allow(dead_code)]
pub fn generate_plain(words: usize) -> String {
    "lorem ipsum dolor sit amet ".repeat(words / 5 + 1)
}
