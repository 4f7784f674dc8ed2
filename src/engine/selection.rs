// ==========================================
// PIAR Portal - selected student / collection sync
// ==========================================
// Updates replace the matching element in place (order kept).
// If the updated id is the selected one, the selection is replaced
// with the updated object so detail views never show a stale copy.
// ==========================================

use crate::domain::student::Student;
use crate::repository::collection::Keyed;

/// Replace the element whose key equals `updated`'s key.
///
/// Returns `false` (and leaves `items` untouched) when no element matches.
pub fn replace_by_id<T: Keyed + Clone>(items: &mut [T], updated: &T) -> bool {
    match items.iter_mut().find(|item| item.key() == updated.key()) {
        Some(slot) => {
            *slot = updated.clone();
            true
        }
        None => false,
    }
}

/// Currently selected student of a session.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: Option<Student>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Student> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.id.as_str())
    }

    pub fn select(&mut self, student: Student) {
        self.selected = Some(student);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Adopt `updated` if it is the selected student. Returns whether the
    /// selection changed.
    pub fn refresh(&mut self, updated: &Student) -> bool {
        match &mut self.selected {
            Some(current) if current.id == updated.id => {
                *current = updated.clone();
                true
            }
            _ => false,
        }
    }

    /// Re-read the selection from the authoritative collection. A selected
    /// student that no longer exists is dropped.
    pub fn resync(&mut self, students: &[Student]) {
        if let Some(id) = self.selected_id().map(str::to_string) {
            self.selected = students.iter().find(|s| s.id == id).cloned();
        }
    }
}
