use serde::{Deserialize, Serialize};

/// Editor range, 1-based lines and columns counted in characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorRange {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl EditorRange {
    pub const fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Range covering the byte offsets `start..end` of `text`.
    pub fn from_offsets(text: &str, start: usize, end: usize) -> Self {
        let (start_line, start_column) = position_at(text, start);
        let (end_line, end_column) = position_at(text, end.max(start));
        Self::new(start_line, start_column, end_line, end_column)
    }

    pub const fn start(&self) -> (u32, u32) {
        (self.start_line, self.start_column)
    }

    pub const fn end(&self) -> (u32, u32) {
        (self.end_line, self.end_column)
    }
}

/// A text change reported by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub changed_range: EditorRange,
    pub inserted_text: String,
}

impl TextEdit {
    pub fn new(changed_range: EditorRange, inserted_text: impl Into<String>) -> Self {
        Self {
            changed_range,
            inserted_text: inserted_text.into(),
        }
    }
}

/// 1-based `(line, column)` of a byte offset. Offsets past the end clamp to
/// the end, offsets inside a character snap back to its start.
pub fn position_at(text: &str, offset: usize) -> (u32, u32) {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (saturate(line), saturate(column))
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 0, (1, 1))]
    #[case("SELECT", 6, (1, 7))]
    #[case("SELECT\nFROM", 7, (2, 1))]
    #[case("SELECT\nFROM", 11, (2, 5))]
    #[case("SELECT\nFROM", 99, (2, 5))]
    #[case("é x", 3, (1, 3))]
    #[case("é x", 1, (1, 1))]
    fn positions(#[case] text: &str, #[case] offset: usize, #[case] expected: (u32, u32)) {
        assert_eq!(position_at(text, offset), expected);
    }

    #[test]
    fn range_from_offsets() {
        let text = "SELECT *\nFROM us";
        assert_eq!(
            EditorRange::from_offsets(text, 14, 16),
            EditorRange::new(2, 6, 2, 8)
        );
    }

    #[test]
    fn edit_uses_editor_field_names() {
        let edit: TextEdit = serde_json::from_str(
            r#"{"changedRange":{"startLine":1,"startColumn":8,"endLine":1,"endColumn":10},"insertedText":"user_id"}"#,
        )
        .expect("edit event");
        assert_eq!(edit.changed_range.start(), (1, 8));
        assert_eq!(edit.changed_range.end(), (1, 10));
        assert_eq!(edit.inserted_text, "user_id");
    }
}
