/// Supplies a presentation-ready label for menus and logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Implemented by fixed catalog entries that are addressed by a string id.
pub trait CatalogEntry {
    fn id_str(&self) -> &str;
}

/// Looks up a catalog entry by its string id, ignoring ASCII case.
pub fn find_by_id<'a, T: CatalogEntry>(entries: &'a [T], id: &str) -> Option<&'a T> {
    let needle = id.trim();
    entries
        .iter()
        .find(|entry| entry.id_str().eq_ignore_ascii_case(needle))
}
