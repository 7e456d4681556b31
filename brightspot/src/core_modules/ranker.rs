// THEORY:
// Ranking is the last spatial step: subjects are ordered brightest first and
// the list is capped. The sort is stable so equal brightness keeps scan order,
// which keeps frame output reproducible for tests and for the rank-keyed
// overlay state. Excess subjects are dropped from the dim end; that is a
// capacity rule, not an error.

use crate::core_modules::subject::Subject;

/// Sorts by brightness (descending, stable) and keeps at most `max_subjects`.
pub fn select(mut subjects: Vec<Subject>, max_subjects: usize) -> Vec<Subject> {
    subjects.sort_by(|a, b| b.brightness.total_cmp(&a.brightness));
    subjects.truncate(max_subjects);
    subjects
}
