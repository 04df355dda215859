use crate::error::DespriteError;

/// Split a brace-delimited tuple string into numeric fields.
///
/// Sheet plists serialize points and rects as strings like
/// `{{10,20},{50,60}}` or `{0, -5}`. Whether the separator carries a space
/// varies between exporters and is not reliably predicted by the sheet
/// format version, so it is detected per string: if a comma is followed by
/// a space the string splits on `", "`, otherwise on `","`.
pub fn parse_tuple<const N: usize>(
    key: &str,
    field: &'static str,
    value: &str,
) -> Result<[i32; N], DespriteError> {
    let malformed = || DespriteError::MalformedTuple {
        key: key.to_string(),
        field,
        value: value.to_string(),
    };

    let stripped: String = value.chars().filter(|c| *c != '{' && *c != '}').collect();
    let separator = if stripped.contains(", ") { ", " } else { "," };

    let parts: Vec<&str> = stripped.split(separator).collect();
    if parts.len() != N {
        return Err(malformed());
    }

    let mut out = [0i32; N];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_e| malformed())?;
    }
    Ok(out)
}
