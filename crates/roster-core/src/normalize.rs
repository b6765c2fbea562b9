//! Display-name normalization for filesystem use.
//!
//! [`folder_token`] turns a free-form name into the token used in canonical
//! folder names: accents folded to their base letters, surrounding whitespace
//! trimmed, internal spaces replaced with underscores, and everything outside
//! `[A-Za-z0-9_]` stripped. The result may be empty when the input has no
//! ASCII-representable characters; that is an accepted edge case, not an
//! error.

/// Fold a Latin accented character to its unaccented base letter. Characters
/// outside the table pass through unchanged and are stripped later unless
/// ASCII alphanumeric.
fn fold_accent(c: char) -> char {
  match c {
    'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
    'é' | 'è' | 'ê' | 'ë' => 'e',
    'í' | 'ì' | 'î' | 'ï' => 'i',
    'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
    'ú' | 'ù' | 'û' | 'ü' => 'u',
    'ç' => 'c',
    'ñ' => 'n',
    'ý' | 'ÿ' => 'y',
    'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
    'É' | 'È' | 'Ê' | 'Ë' => 'E',
    'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
    'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
    'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
    'Ç' => 'C',
    'Ñ' => 'N',
    'Ý' => 'Y',
    _ => c,
  }
}

/// Normalize a display name into a filesystem-safe token.
///
/// Idempotent and deterministic: `folder_token(folder_token(x)) ==
/// folder_token(x)`.
pub fn folder_token(name: &str) -> String {
  name
    .trim()
    .chars()
    .map(fold_accent)
    .map(|c| if c == ' ' { '_' } else { c })
    .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
    .collect()
}
