use crate::system::SystemRecord;

fn letter_key(value: &str) -> Vec<char> {
    let mut letters: Vec<char> = value.to_lowercase().chars().collect();
    letters.sort_unstable();
    letters
}

/// Records whose name uses exactly the letters of `letters`, ignoring case.
pub fn find_anagram_systems<'a>(
    records: &'a [SystemRecord],
    letters: &str,
) -> Vec<&'a SystemRecord> {
    let wanted = letter_key(letters);
    records
        .iter()
        .filter(|record| letter_key(&record.name) == wanted)
        .collect()
}
