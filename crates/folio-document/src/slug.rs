//! URL-safe slug generation.
//!
//! Slugs identify nodes, tags, authors and month buckets in URIs. The
//! algorithm:
//! - Fold common accented Latin letters to their ASCII base
//! - Lowercase ASCII letters
//! - Replace every run of other characters with a single hyphen
//! - Trim leading and trailing hyphens
//!
//! Unlike heading anchors, slugs here are not deduplicated; uniqueness among
//! siblings is enforced when nodes are attached to the tree.

/// Returns the URL-safe slug for `text`.
///
/// Returns an empty string when `text` has no alphanumeric characters.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(fold) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Maps accented Latin letters to their unaccented form.
///
/// Characters without a mapping are returned unchanged. Ligatures expand to
/// two letters.
fn fold(c: char) -> impl Iterator<Item = char> {
    let folded: &[char] = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => &['a'],
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => &['A'],
        'é' | 'è' | 'ê' | 'ë' => &['e'],
        'É' | 'È' | 'Ê' | 'Ë' => &['E'],
        'í' | 'ì' | 'î' | 'ï' => &['i'],
        'Í' | 'Ì' | 'Î' | 'Ï' => &['I'],
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => &['o'],
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ø' => &['O'],
        'ú' | 'ù' | 'û' | 'ü' => &['u'],
        'Ú' | 'Ù' | 'Û' | 'Ü' => &['U'],
        'ñ' => &['n'],
        'Ñ' => &['N'],
        'ç' => &['c'],
        'Ç' => &['C'],
        'ý' | 'ÿ' => &['y'],
        'Ý' => &['Y'],
        'ß' => &['s', 's'],
        'æ' => &['a', 'e'],
        'Æ' => &['A', 'E'],
        'œ' => &['o', 'e'],
        'Œ' => &['O', 'E'],
        _ => &[],
    };

    let passthrough = folded.is_empty().then_some(c);
    folded.iter().copied().chain(passthrough)
}
