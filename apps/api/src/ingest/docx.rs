use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::Regex;

use super::IngestError;

const DOCUMENT_PART: &str = "word/document.xml";

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:p\b[^>]*?(?:/>|>(.*?)</w:p>)").expect("paragraph pattern is valid")
});

static TEXT_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>").expect("text run pattern is valid")
});

/// Text of every paragraph in the main document part, joined with single spaces.
pub(super) fn extract_docx_text(bytes: &[u8]) -> Result<String, IngestError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| IngestError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| IngestError::Docx(format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| IngestError::Docx(e.to_string()))?;

    Ok(paragraphs_from_xml(&xml).join(" "))
}

fn paragraphs_from_xml(xml: &str) -> Vec<String> {
    PARAGRAPH
        .captures_iter(xml)
        .map(|p| match p.get(1) {
            Some(body) => TEXT_RUN
                .captures_iter(body.as_str())
                .filter_map(|run| run.get(1))
                .map(|t| decode_entities(t.as_str()))
                .collect::<String>(),
            None => String::new(),
        })
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
