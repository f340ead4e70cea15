use crate::hash_util::NonCryptoHashSet;
use std::error::Error;
use std::fmt::Display;
use std::hash::Hash;

#[derive(Debug, derive_more::Display)]
#[display(fmt = "Found the following duplicate {}: {}", list_label, listing)]
pub struct DuplicateError<T> {
    list_label: String,
    listing: String,
    duplicates: Vec<T>,
}

impl<T> DuplicateError<T> {
    /// The duplicates in order of their second occurrence.
    pub fn duplicates(&self) -> &[T] {
        &self.duplicates
    }

    pub fn into_duplicates(self) -> Vec<T> {
        self.duplicates
    }
}

impl<T: std::fmt::Debug> Error for DuplicateError<T> {}

/// Makes sure that no item occurs more than once.
///
/// Each duplicate is reported once, no matter how often it repeats.
pub fn ensure_no_duplicate<T>(list_label: &str, iter: T) -> Result<(), DuplicateError<T::Item>>
where
    T: IntoIterator,
    T::Item: Eq + Hash + Display + Clone,
{
    use std::fmt::Write;
    let mut uniq = NonCryptoHashSet::default();
    let mut reported = NonCryptoHashSet::default();
    let mut duplicates = vec![];
    for item in iter {
        if uniq.contains(&item) {
            if reported.insert(item.clone()) {
                duplicates.push(item);
            }
        } else {
            uniq.insert(item);
        }
    }
    if duplicates.is_empty() {
        return Ok(());
    }
    let mut listing = String::new();
    for (i, d) in duplicates.iter().enumerate() {
        if i > 0 {
            listing.push_str(", ");
        }
        let _ = write!(&mut listing, "{d}");
    }
    Err(DuplicateError {
        list_label: list_label.to_owned(),
        listing,
        duplicates,
    })
}
