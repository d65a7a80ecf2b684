use encoding_rs::UTF_8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    /// True when malformed sequences were replaced with U+FFFD.
    pub lossy: bool,
}

/// Decode upstream bytes as UTF-8, dropping a leading BOM. Never fails:
/// malformed sequences are replaced so parsing can still proceed.
pub fn decode_html(bytes: &[u8]) -> DecodedHtml {
    let (text, lossy) = UTF_8.decode_with_bom_removal(bytes);
    DecodedHtml {
        html: text.into_owned(),
        lossy,
    }
}
