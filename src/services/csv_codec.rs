use std::path::Path;

use crate::error::CsvError;
use crate::models::word::{NewWord, Word, WordPair, JOIN_DELIMITER, TAG_DELIMITER};

/// 导出文件的默认文件名
pub const EXPORT_FILE_NAME: &str = "prompt_builder.csv";

const EXPORT_HEADER: &str = "jp,en,tags";
const JP_HEADERS: [&str; 2] = ["jp", "日本語"];
const EN_HEADERS: [&str; 2] = ["en", "英語"];

/// 严格解析：粘贴的 CSV 文本，每个非空行必须恰好是 `jp,en` 两列。
/// 遇到第一处错误即放弃整个输入，不返回部分结果。
pub fn parse_strict(text: &str) -> Result<Vec<WordPair>, CsvError> {
    let mut pairs = Vec::new();

    for (index, line) in text.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let (jp, en) = match fields.as_slice() {
            [jp, en] if !jp.is_empty() && !en.is_empty() => (*jp, *en),
            _ => return Err(CsvError::MalformedRow { line: line_no }),
        };

        if jp.contains(JOIN_DELIMITER) {
            return Err(CsvError::IllegalCharacter { line: line_no, field: "jp" });
        }
        if en.contains(JOIN_DELIMITER) {
            return Err(CsvError::IllegalCharacter { line: line_no, field: "en" });
        }

        pairs.push(WordPair {
            jp: jp.to_string(),
            en: en.to_string(),
        });
    }

    Ok(pairs)
}

/// 宽松导入：跳过无法解析的行，从不因为单行内容报错
pub fn import_lenient(text: &str) -> Vec<NewWord> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = Vec::new();

    for (index, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }

        let cols = split_record(line);
        if cols.len() < 2 {
            continue;
        }

        let jp = cols[0].trim();
        let en = cols[1].trim();

        if index == 0 && is_header(jp, en) {
            continue;
        }
        if jp.is_empty() || en.is_empty() {
            continue;
        }

        let tags = cols.get(2).map(|raw| parse_tag_field(raw)).unwrap_or_default();
        rows.push(NewWord {
            jp: jp.to_string(),
            en: en.to_string(),
            tags,
        });
    }

    rows
}

/// 读取文件后做宽松导入；只有 I/O（含非 UTF-8 内容）会返回错误
pub async fn import_file(path: &Path) -> Result<Vec<NewWord>, CsvError> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(import_lenient(&text))
}

pub fn export(words: &[Word]) -> String {
    let mut lines = Vec::with_capacity(words.len() + 1);
    lines.push(EXPORT_HEADER.to_string());

    for word in words {
        // 第三列整体不加引号，即使其中的标签含有逗号
        let tags = word
            .tags
            .iter()
            .map(|tag| escape_field(&tag.replace(TAG_DELIMITER, "")))
            .collect::<Vec<_>>()
            .join("|");
        lines.push(format!(
            "{},{},{}",
            escape_field(&word.jp),
            escape_field(&word.en),
            tags
        ));
    }

    lines.join("\n")
}

pub async fn export_file(path: &Path, words: &[Word]) -> Result<(), CsvError> {
    tokio::fs::write(path, export(words)).await?;
    Ok(())
}

fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn is_header(jp: &str, en: &str) -> bool {
    JP_HEADERS.contains(&jp.to_lowercase().as_str()) && EN_HEADERS.contains(&en.to_lowercase().as_str())
}

/// 以逗号切分一行。引号只在字段开头（标签列中还包括 `|` 之后）开启引用，
/// 其他位置的引号按字面保留；引用状态内的 `""` 表示一个字面双引号
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut can_open = true;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' if quoted => quoted = false,
            '"' if can_open => {
                quoted = true;
                can_open = false;
            }
            ',' if !quoted => {
                fields.push(std::mem::take(&mut current));
                can_open = true;
            }
            _ => {
                current.push(c);
                can_open = !quoted && c == TAG_DELIMITER && fields.len() >= 2;
            }
        }
    }
    fields.push(current);
    fields
}

fn parse_tag_field(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(TAG_DELIMITER).map(str::trim) {
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(jp: &str, en: &str, tags: &[&str]) -> Word {
        Word {
            id: 0,
            jp: jp.into(),
            en: en.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn strict_parse_reads_pairs_and_skips_blank_lines() {
        let pairs = parse_strict("学校, school\n\n  \n本,book\r\n").unwrap();
        assert_eq!(
            pairs,
            vec![
                WordPair { jp: "学校".into(), en: "school".into() },
                WordPair { jp: "本".into(), en: "book".into() },
            ]
        );
    }

    #[test]
    fn strict_parse_rejects_missing_field() {
        let err = parse_strict("学校,school\n本\n猫,cat").unwrap_err();
        assert!(matches!(err, CsvError::MalformedRow { line: 2 }));

        let err = parse_strict("学校,").unwrap_err();
        assert!(matches!(err, CsvError::MalformedRow { line: 1 }));
    }

    #[test]
    fn strict_parse_rejects_extra_fields() {
        let err = parse_strict("学校,school,place").unwrap_err();
        assert!(matches!(err, CsvError::MalformedRow { line: 1 }));
    }

    #[test]
    fn strict_parse_rejects_join_delimiter() {
        let err = parse_strict("猫,cat\nあ、い,foo").unwrap_err();
        assert!(matches!(err, CsvError::IllegalCharacter { line: 2, field: "jp" }));

        let err = parse_strict("猫,c、at").unwrap_err();
        assert!(matches!(err, CsvError::IllegalCharacter { line: 1, field: "en" }));
    }

    #[test]
    fn lenient_import_skips_header() {
        let rows = import_lenient("jp,en\n学校,school");
        assert_eq!(rows, vec![NewWord::new("学校", "school")]);

        let rows = import_lenient("日本語,英語\r\n本,book\r\n");
        assert_eq!(rows, vec![NewWord::new("本", "book")]);

        let rows = import_lenient("JP,EN,tags\n本,book");
        assert_eq!(rows, vec![NewWord::new("本", "book")]);
    }

    #[test]
    fn header_is_only_detected_on_first_line() {
        let rows = import_lenient("本,book\njp,en");
        assert_eq!(rows, vec![NewWord::new("本", "book"), NewWord::new("jp", "en")]);
    }

    #[test]
    fn lenient_import_silently_skips_bad_rows() {
        let rows = import_lenient("only-one-column\n ,empty jp\n空,  \n猫,cat\n");
        assert_eq!(rows, vec![NewWord::new("猫", "cat")]);
    }

    #[test]
    fn lenient_import_parses_tag_column() {
        let rows = import_lenient("猫,cat, animal | pet ||animal\n犬,dog,");
        assert_eq!(rows[0].tags, vec!["animal", "pet"]);
        assert!(rows[1].tags.is_empty());
    }

    #[test]
    fn stray_quotes_are_kept_literally() {
        let rows = import_lenient("テレビ,5\" screen\na\"b,c\n猫,cat");
        assert_eq!(
            rows,
            vec![
                NewWord::new("テレビ", "5\" screen"),
                NewWord::new("a\"b", "c"),
                NewWord::new("猫", "cat"),
            ]
        );
    }

    #[test]
    fn surrounding_whitespace_is_not_preserved() {
        let imported = import_lenient(&export(&[word(" 猫 ", "cat  ", &[])]));
        assert_eq!(imported, vec![NewWord::new("猫", "cat")]);
    }

    #[test]
    fn lenient_import_ignores_byte_order_mark() {
        let rows = import_lenient("\u{feff}jp,en\n学校,school");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn export_quotes_jp_en_and_keeps_tag_field_unquoted() {
        let csv = export(&[
            word("学校", "school", &["place", "noun"]),
            word("a,b", "say \"hi\"", &[]),
            word("x", "y", &["p|q", "c,d"]),
        ]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "jp,en,tags");
        assert_eq!(lines[1], "学校,school,place|noun");
        assert_eq!(lines[2], "\"a,b\",\"say \"\"hi\"\"\",");
        assert_eq!(lines[3], "x,y,pq|\"c,d\"");
    }

    #[test]
    fn export_of_empty_list_is_header_only() {
        assert_eq!(export(&[]), "jp,en,tags");
    }

    #[test]
    fn export_then_import_preserves_fields() {
        let original = vec![
            word("学校", "school", &["place", "noun"]),
            word("a,b", "say \"hi\", then go", &["tag, with comma", "q\"uote"]),
            word("本", "book", &[]),
        ];

        let imported = import_lenient(&export(&original));

        assert_eq!(imported.len(), original.len());
        for (got, want) in imported.iter().zip(&original) {
            assert_eq!(got.jp, want.jp);
            assert_eq!(got.en, want.en);
            assert_eq!(got.tags, want.tags);
        }
    }

    #[tokio::test]
    async fn file_round_trip_and_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);

        export_file(&path, &[word("猫", "cat", &["animal"])]).await.unwrap();
        let rows = import_file(&path).await.unwrap();
        assert_eq!(rows, vec![NewWord::new("猫", "cat").with_tags(["animal"])]);

        let missing = import_file(&dir.path().join("nope.csv")).await;
        assert!(matches!(missing, Err(CsvError::Io(_))));
    }
}
