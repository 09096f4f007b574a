use crate::catalog::Book;

/// Number of matches not already in the reading list.
///
/// Membership is by ISBN. Each match counts once, however many times its
/// ISBN appears in the list.
pub fn count_available(matches: &[Book], reading_list: &[Book]) -> usize {
    let listed = matches
        .iter()
        .filter(|m| reading_list.iter().any(|b| b.has_isbn(&m.isbn)))
        .count();
    matches.len() - listed
}
