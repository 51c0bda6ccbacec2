/// Reformat a bare 32-character identifier into the dashed 8-4-4-4-12 form
/// the document API expects. Anything else is returned unchanged.
pub fn normalize_id(id: &str) -> String {
    if id.len() != 32 || !id.is_ascii() || id.contains('-') {
        return id.to_string();
    }

    format!(
        "{}-{}-{}-{}-{}",
        &id[..8],
        &id[8..12],
        &id[12..16],
        &id[16..20],
        &id[20..]
    )
}
