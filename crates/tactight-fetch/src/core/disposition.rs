use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use tactight_core::is_well_formed_filename;

// filename="a.stl" | filename='a.stl' | filename=a.stl | filename*=UTF-8''a.stl
const FILENAME_PARAM: &str = r#"(?i)\bfilename(\*)?\s*=\s*(?:"([^"]*)"|'([^']*)'|([^;]*))"#;

static FILENAME_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(FILENAME_PARAM).ok());

/// Pull a usable file name out of a `Content-Disposition` header.
///
/// An RFC 5987 `filename*` parameter wins over a plain `filename`. Names that
/// are blank or carry path components are rejected.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let re = FILENAME_RE.as_ref()?;

    let mut plain = None;
    let mut extended = None;

    for caps in re.captures_iter(header) {
        let Some(raw) = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)) else {
            continue;
        };
        let raw = raw.as_str().trim();

        if caps.get(1).is_some() {
            extended = extended.or_else(|| decode_extended(raw));
        } else if plain.is_none() {
            plain = Some(raw.trim_matches(['"', '\'']).to_string());
        }
    }

    extended
        .into_iter()
        .chain(plain)
        .map(|name| name.trim().to_string())
        .find(|name| is_well_formed_filename(name))
}

/// `charset'lang'percent-encoded` to a plain string.
fn decode_extended(value: &str) -> Option<String> {
    let encoded = value.split_once("''").map_or(value, |(_, rest)| rest);
    percent_decode_str(encoded).decode_utf8().ok().map(|name| name.into_owned())
}
