//! Text normalization applied before usage extraction.

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
}

/// Remove `//` line comments and `/* ... */` block comments.
///
/// Newlines are always kept, including those inside a multi-line block comment, so
/// the result has the same number of lines as the input. Text before an inline block
/// comment and text after its close are joined on the same line. String literals are
/// not recognized: a `//` inside quotes starts a comment too.
pub fn strip_comments(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut state = State::Code;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match (c, chars.peek()) {
                ('/', Some('/')) => {
                    chars.next();
                    state = State::LineComment;
                }
                ('/', Some('*')) => {
                    chars.next();
                    state = State::BlockComment;
                }
                _ => output.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    output.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment => match (c, chars.peek()) {
                ('*', Some('/')) => {
                    chars.next();
                    state = State::Code;
                }
                ('\n', _) => output.push('\n'),
                _ => {}
            },
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_comment() {
        assert_eq!(strip_comments("let a = 1 // Foo\nlet b = 2"), "let a = 1 \nlet b = 2");
    }

    #[test]
    fn test_block_comment_on_one_line() {
        assert_eq!(strip_comments("a /* Foo */ b"), "a  b");
    }

    #[test]
    fn test_block_comment_spanning_lines_keeps_line_count() {
        let text = "before /* one\ntwo\nthree */ after\nlast";
        let stripped = strip_comments(text);
        assert_eq!(stripped, "before \n\n after\nlast");
        assert_eq!(stripped.lines().count(), text.lines().count());
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(strip_comments("code /* never\nclosed"), "code \n");
    }

    #[test]
    fn test_line_marker_inside_block_comment() {
        assert_eq!(strip_comments("/* // */ kept"), " kept");
    }

    #[test]
    fn test_text_without_comments_is_unchanged() {
        let text = "[Foo bar];\nlet x = a / b * c\n";
        assert_eq!(strip_comments(text), text);
    }
}
