#![allow(dead_code)]

//! Form Field Collections — the seven ordered sublists edited in the builder.
//!
//! Every list obeys the same three operations (`add`, `remove`, `update`) and
//! one editing invariant: a list being edited never goes empty, so removing
//! the last remaining entry is a no-op. No validation happens here — field
//! updates are raw string passthrough; blank entries are only filtered out at
//! render time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::resume::{
    AchievementEntry, CertificationEntry, EducationEntry, Entry, EntryId, ExperienceEntry,
    InternshipEntry, PersonalInfo, ProfileLinkEntry, ProjectEntry, ResumeRow,
};
use crate::store::ResumePatch;

/// Implemented by each of the seven entry kinds.
pub trait SectionEntry: Default + Clone {
    /// The field whose non-blank (trimmed) value makes the entry eligible
    /// for Preview/Export output.
    fn primary(&self) -> &str;

    /// Sets one named field to a raw string value. Returns `false` for an
    /// unknown field name (the caller treats that as a no-op).
    fn set_field(&mut self, field: &str, value: &str) -> bool;
}

/// True when the entry would appear in rendered output.
pub fn output_eligible<T: SectionEntry>(entry: &Entry<T>) -> bool {
    !entry.data.primary().trim().is_empty()
}

impl SectionEntry for ExperienceEntry {
    fn primary(&self) -> &str {
        &self.title
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "title" => self.title = value.to_string(),
            "company" => self.company = value.to_string(),
            "duration" => self.duration = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => return false,
        }
        true
    }
}

impl SectionEntry for EducationEntry {
    fn primary(&self) -> &str {
        &self.degree
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "degree" => self.degree = value.to_string(),
            "institution" => self.institution = value.to_string(),
            "year" => self.year = value.to_string(),
            _ => return false,
        }
        true
    }
}

impl SectionEntry for ProjectEntry {
    fn primary(&self) -> &str {
        &self.name
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            "technologies" => self.technologies = value.to_string(),
            _ => return false,
        }
        true
    }
}

impl SectionEntry for ProfileLinkEntry {
    fn primary(&self) -> &str {
        &self.platform
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "platform" => self.platform = value.to_string(),
            "url" => self.url = value.to_string(),
            _ => return false,
        }
        true
    }
}

impl SectionEntry for AchievementEntry {
    fn primary(&self) -> &str {
        &self.title
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "title" => self.title = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => return false,
        }
        true
    }
}

impl SectionEntry for CertificationEntry {
    fn primary(&self) -> &str {
        &self.name
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "name" => self.name = value.to_string(),
            "issuer" => self.issuer = value.to_string(),
            "date" => self.date = value.to_string(),
            _ => return false,
        }
        true
    }
}

impl SectionEntry for InternshipEntry {
    fn primary(&self) -> &str {
        &self.title
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "title" => self.title = value.to_string(),
            "company" => self.company = value.to_string(),
            "duration" => self.duration = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => return false,
        }
        true
    }
}

/// An ordered sublist with stable per-entry identity and a monotonic local
/// id allocator. Serializes as the plain entry array.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryList<T: SectionEntry> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T: SectionEntry> EntryList<T> {
    /// A list holding a single blank entry — the state every sublist starts
    /// editing from.
    pub fn seeded() -> Self {
        let mut list = Self {
            entries: Vec::new(),
            next_id: 0,
        };
        list.add();
        list
    }

    /// Rebuilds a list from stored entries. An empty input is seeded with one
    /// blank entry so the non-empty editing invariant holds from the start.
    pub fn from_entries(entries: Vec<Entry<T>>) -> Self {
        let next_id = entries
            .iter()
            .map(|e| e.id.0.saturating_add(1))
            .max()
            .unwrap_or(0);
        let mut list = Self { entries, next_id };
        if list.entries.is_empty() {
            list.add();
        }
        list
    }

    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    pub fn to_entries(&self) -> Vec<Entry<T>> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&T> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.data)
    }

    /// Appends a blank entry and returns its id. Always succeeds.
    pub fn add(&mut self) -> EntryId {
        let id = self.allocate();
        self.entries.push(Entry {
            id,
            data: T::default(),
        });
        id
    }

    /// Removes the entry with `id`, unless it is the last remaining one or
    /// the id is unknown — both are no-ops. Returns whether a removal
    /// happened.
    pub fn remove(&mut self, id: EntryId) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() < before
    }

    /// Sets one field on the entry with `id`. Unknown id or unknown field
    /// name is a no-op. Returns whether a field changed.
    pub fn update(&mut self, id: EntryId, field: &str, value: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => entry.data.set_field(field, value),
            None => false,
        }
    }

    /// Next id is always past every id seen so far, including ids that came
    /// in from stored entries.
    fn allocate(&mut self) -> EntryId {
        let floor = self
            .entries
            .iter()
            .map(|e| e.id.0.saturating_add(1))
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(floor);
        let id = EntryId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl<T: SectionEntry> Default for EntryList<T> {
    fn default() -> Self {
        Self::seeded()
    }
}

impl<T: SectionEntry + Serialize> Serialize for EntryList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, T: SectionEntry + Deserialize<'de>> Deserialize<'de> for EntryList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_entries(Vec::<Entry<T>>::deserialize(
            deserializer,
        )?))
    }
}

/// The complete in-memory form being edited: the personal-info record plus
/// the seven sublists, each starting with one blank entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub personal_info: PersonalInfo,
    pub experiences: EntryList<ExperienceEntry>,
    pub education: EntryList<EducationEntry>,
    pub projects: EntryList<ProjectEntry>,
    pub profile_links: EntryList<ProfileLinkEntry>,
    pub achievements: EntryList<AchievementEntry>,
    pub certifications: EntryList<CertificationEntry>,
    pub internships: EntryList<InternshipEntry>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            experiences: EntryList::seeded(),
            education: EntryList::seeded(),
            projects: EntryList::seeded(),
            profile_links: EntryList::seeded(),
            achievements: EntryList::seeded(),
            certifications: EntryList::seeded(),
            internships: EntryList::seeded(),
        }
    }
}

impl FormState {
    /// Loads a saved resume back into editable form state (the update flow).
    pub fn from_resume(row: &ResumeRow) -> Self {
        Self {
            personal_info: row.personal_info.0.clone(),
            experiences: EntryList::from_entries(row.experiences.0.clone()),
            education: EntryList::from_entries(row.education.0.clone()),
            projects: EntryList::from_entries(row.projects.0.clone()),
            profile_links: EntryList::from_entries(row.profile_links.0.clone()),
            achievements: EntryList::from_entries(row.achievements.0.clone()),
            certifications: EntryList::from_entries(row.certifications.0.clone()),
            internships: EntryList::from_entries(row.internships.0.clone()),
        }
    }

    /// The whole-payload replacement sent on save of an existing resume.
    pub fn to_patch(&self, name: &str) -> ResumePatch {
        ResumePatch {
            name: name.to_string(),
            personal_info: self.personal_info.clone(),
            experiences: self.experiences.to_entries(),
            education: self.education.to_entries(),
            projects: self.projects.to_entries(),
            profile_links: self.profile_links.to_entries(),
            achievements: self.achievements.to_entries(),
            certifications: self.certifications.to_entries(),
            internships: self.internships.to_entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_list_starts_with_one_blank_entry() {
        let list: EntryList<ExperienceEntry> = EntryList::seeded();
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].data, ExperienceEntry::default());
    }

    #[test]
    fn test_add_always_appends_with_fresh_ids() {
        let mut list: EntryList<EducationEntry> = EntryList::seeded();
        let a = list.add();
        let b = list.add();
        assert_eq!(list.len(), 3);
        assert_ne!(a, b);
    }

    #[test]
    fn test_rapid_adds_never_collide() {
        let mut list: EntryList<ProjectEntry> = EntryList::seeded();
        let mut seen = std::collections::HashSet::new();
        seen.insert(list.entries()[0].id);
        for _ in 0..100 {
            assert!(seen.insert(list.add()), "duplicate local id allocated");
        }
    }

    #[test]
    fn test_remove_last_remaining_entry_is_a_no_op() {
        let mut list: EntryList<AchievementEntry> = EntryList::seeded();
        let only = list.entries()[0].id;
        assert!(!list.remove(only));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_down_to_one_then_refuses() {
        let mut list: EntryList<CertificationEntry> = EntryList::seeded();
        let second = list.add();
        assert!(list.remove(second));
        assert_eq!(list.len(), 1);
        let only = list.entries()[0].id;
        assert!(!list.remove(only));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_a_no_op() {
        let mut list: EntryList<ExperienceEntry> = EntryList::seeded();
        list.add();
        assert!(!list.remove(EntryId(999)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_update_sets_named_field_raw() {
        let mut list: EntryList<ExperienceEntry> = EntryList::seeded();
        let id = list.entries()[0].id;
        assert!(list.update(id, "title", "  Engineer  "));
        // Raw passthrough — no trimming at this layer.
        assert_eq!(list.get(id).unwrap().title, "  Engineer  ");
    }

    #[test]
    fn test_update_unknown_id_or_field_is_a_no_op() {
        let mut list: EntryList<ProfileLinkEntry> = EntryList::seeded();
        let id = list.entries()[0].id;
        assert!(!list.update(EntryId(42), "platform", "GitHub"));
        assert!(!list.update(id, "nonexistent", "value"));
        assert_eq!(list.get(id).unwrap().platform, "");
    }

    #[test]
    fn test_ids_stay_stable_across_removal() {
        let mut list: EntryList<EducationEntry> = EntryList::seeded();
        let first = list.entries()[0].id;
        let second = list.add();
        let third = list.add();
        list.remove(second);
        let ids: Vec<EntryId> = list.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[test]
    fn test_allocator_skips_ids_loaded_from_storage() {
        let mut list = EntryList::from_entries(vec![Entry {
            id: EntryId(7),
            data: ExperienceEntry::default(),
        }]);
        assert_eq!(list.add(), EntryId(8));
    }

    #[test]
    fn test_from_entries_seeds_when_empty() {
        let list: EntryList<InternshipEntry> = EntryList::from_entries(vec![]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_entry_list_serializes_as_plain_array() {
        let mut list: EntryList<EducationEntry> = EntryList::seeded();
        let id = list.entries()[0].id;
        list.update(id, "degree", "BSc");
        let value = serde_json::to_value(&list).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["degree"], "BSc");

        let back: EntryList<EducationEntry> = serde_json::from_value(value).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn test_output_eligibility_requires_non_blank_primary() {
        let blank = Entry {
            id: EntryId(0),
            data: ExperienceEntry::default(),
        };
        let whitespace = Entry {
            id: EntryId(1),
            data: ExperienceEntry {
                title: "   ".to_string(),
                ..Default::default()
            },
        };
        let filled = Entry {
            id: EntryId(2),
            data: ExperienceEntry {
                title: "Engineer".to_string(),
                ..Default::default()
            },
        };
        assert!(!output_eligible(&blank));
        assert!(!output_eligible(&whitespace));
        assert!(output_eligible(&filled));
    }

    #[test]
    fn test_form_state_round_trips_through_patch() {
        let mut form = FormState::default();
        form.personal_info.full_name = "Jane Doe".to_string();
        let id = form.experiences.entries()[0].id;
        form.experiences.update(id, "title", "Engineer");

        let patch = form.to_patch("My CV");
        assert_eq!(patch.name, "My CV");
        assert_eq!(patch.personal_info.full_name, "Jane Doe");
        assert_eq!(patch.experiences[0].data.title, "Engineer");
    }
}
