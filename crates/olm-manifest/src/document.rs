//! Splitting multi-document YAML streams and rendering them back.

use crate::{ManifestObject, Result};

/// One `---`-delimited segment of a manifest file that holds content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    /// Zero-based position among the non-empty documents of the file.
    pub index: usize,
    /// One-based line on which the segment starts.
    pub line: usize,
    pub text: &'a str,
}

/// A line consisting of the document marker, optionally followed by a comment.
///
/// `--- value` style markers with inline content are left inside the segment;
/// the YAML parser handles a leading marker on its own.
fn is_separator(line: &str) -> bool {
    let line = line.trim_end_matches(['\n', '\r']);
    match line.strip_prefix("---") {
        Some(rest) => {
            rest.trim().is_empty()
                || (rest.starts_with(char::is_whitespace) && rest.trim_start().starts_with('#'))
        }
        None => false,
    }
}

/// True when `text` holds nothing but whitespace and `#` comments.
pub fn is_blank(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

/// Split `content` into documents on `---` separator lines.
///
/// Segments holding only whitespace or comments are not documents and are
/// skipped. Document order follows the source.
pub fn split_documents(content: &str) -> Vec<Document<'_>> {
    let mut documents = Vec::new();
    let mut start = 0;
    let mut start_line = 1;
    let mut offset = 0;
    let mut line_no = 1;

    for line in content.split_inclusive('\n') {
        if is_separator(line) {
            let segment = &content[start..offset];
            if !is_blank(segment) {
                documents.push(Document {
                    index: documents.len(),
                    line: start_line,
                    text: segment,
                });
            }
            start = offset + line.len();
            start_line = line_no + 1;
        }
        offset += line.len();
        line_no += 1;
    }

    let tail = &content[start..];
    if !is_blank(tail) {
        documents.push(Document {
            index: documents.len(),
            line: start_line,
            text: tail,
        });
    }

    documents
}

/// Render objects as a `---`-separated YAML stream, in order.
pub fn render_stream(objects: &[ManifestObject]) -> Result<String> {
    let mut out = String::new();
    for object in objects {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(object)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_split_single_document() {
        let docs = split_documents("kind: Namespace\n");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "kind: Namespace\n");
        assert_eq!(docs[0].line, 1);
    }

    #[test]
    fn test_split_skips_empty_segments() {
        let content = "---\nkind: A\n---\n\n   \n---\nkind: B\n---\n";
        let docs = split_documents(content);

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text, "kind: A\n");
        assert_eq!(docs[0].index, 0);
        assert_eq!(docs[1].text, "kind: B\n");
        assert_eq!(docs[1].index, 1);
        assert_eq!(docs[1].line, 7);
    }

    #[test]
    fn test_split_skips_comment_only_segments() {
        let content = "# header\n---\nkind: A\n---\n  # nothing here\n\n";
        let docs = split_documents(content);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "kind: A\n");
        assert_eq!(docs[0].line, 3);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \n\t\n"));
        assert!(is_blank("# only\n   # comments\n"));
        assert!(!is_blank("# comment\nkind: A\n"));
    }

    #[test]
    fn test_split_empty_content() {
        assert!(split_documents("").is_empty());
        assert!(split_documents("---\n---\n").is_empty());
    }

    #[test]
    fn test_split_keeps_dashes_inside_values() {
        let content = "kind: ConfigMap\ndata:\n  banner: \"---\"\n  rule: ----------\n";
        let docs = split_documents(content);
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_split_crlf() {
        let docs = split_documents("kind: A\r\n---\r\nkind: B\r\n");
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].text, "kind: B\r\n");
    }

    #[rstest]
    #[case("---", true)]
    #[case("---\n", true)]
    #[case("---  \r\n", true)]
    #[case("--- # crds", true)]
    #[case("---#x", false)]
    #[case("--- !tagged", false)]
    #[case("----", false)]
    #[case(" ---", false)]
    #[case("kind: A", false)]
    fn test_is_separator(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_separator(line), expected);
    }
}
