//! Plain-text statistics reports.

use std::fmt::Write as _;

use crate::library::Library;

/// Render the "most accessed media" report for `specialty`.
///
/// Returns `None` when the specialty is not registered.
pub fn most_accessed_report(
  library: &Library,
  specialty: &str,
  limit: usize,
) -> Option<String> {
  library.get_specialty(specialty)?;

  let mut out = String::new();
  let _ = writeln!(out, "Most Accessed Media for Specialty: {specialty}");
  out.push_str("==========================================\n");
  for (rank, media) in library
    .most_accessed_by_specialty(specialty, limit)
    .iter()
    .enumerate()
  {
    let _ = writeln!(
      out,
      "{}. {} (ID: {}) - {} accesses",
      rank + 1,
      media.title,
      media.id,
      media.access_count()
    );
  }
  Some(out)
}
