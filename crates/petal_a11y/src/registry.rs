//! Element registry and section/landmark index
//!
//! Owns every registered element, section, and landmark. The index is
//! explicit: registering an element never creates its section, but a section
//! registered after its elements adopts them, so mount order within a screen
//! does not matter.

use crate::element::{
    NavigableElement, NavigableLandmark, NavigableSection, SectionEntry,
};
use crate::A11yError;
use rustc_hash::FxHashMap;

/// Registry of navigable structure for one engine instance.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: FxHashMap<String, NavigableElement>,
    sections: FxHashMap<String, NavigableSection>,
    landmarks: FxHashMap<String, NavigableLandmark>,
    /// Monotonic registration counter; stamped onto elements for stable
    /// ordering of equal `order` values.
    next_seq: u64,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Elements ==========

    /// Register an element. Rejects duplicates without touching the registry.
    pub fn register(&mut self, mut element: NavigableElement) -> Result<(), A11yError> {
        if self.elements.contains_key(&element.id) {
            return Err(A11yError::DuplicateId(element.id));
        }

        element.seq = self.next_seq;
        self.next_seq += 1;

        if let Some(section_id) = element.section_id.as_deref() {
            if let Some(section) = self.sections.get_mut(section_id) {
                section.attach(SectionEntry {
                    id: element.id.clone(),
                    order: element.order,
                    seq: element.seq,
                });
            }
        }

        tracing::debug!(id = %element.id, section = ?element.section_id, "element registered");
        self.elements.insert(element.id.clone(), element);
        Ok(())
    }

    /// Remove an element, detaching it from its section.
    pub fn unregister(&mut self, id: &str) -> Option<NavigableElement> {
        let element = self.elements.remove(id)?;
        if let Some(section_id) = element.section_id.as_deref() {
            if let Some(section) = self.sections.get_mut(section_id) {
                section.detach(id);
            }
        }
        tracing::debug!(id, "element unregistered");
        Some(element)
    }

    pub fn lookup(&self, id: &str) -> Option<&NavigableElement> {
        self.elements.get(id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &NavigableElement> {
        self.elements.values()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    // ========== Sections ==========

    /// Register a section, adopting any already registered elements that
    /// name it and attaching it to its landmark if present.
    pub fn register_section(&mut self, mut section: NavigableSection) -> Result<(), A11yError> {
        if self.sections.contains_key(&section.id) {
            return Err(A11yError::DuplicateId(section.id));
        }

        let mut adopted: Vec<SectionEntry> = self
            .elements
            .values()
            .filter(|e| e.section_id.as_deref() == Some(section.id.as_str()))
            .map(|e| SectionEntry {
                id: e.id.clone(),
                order: e.order,
                seq: e.seq,
            })
            .collect();
        adopted.sort_by_key(|e| (e.order, e.seq));
        for entry in adopted {
            section.attach(entry);
        }

        if let Some(landmark_id) = section.landmark_id.as_deref() {
            if let Some(landmark) = self.landmarks.get_mut(landmark_id) {
                landmark.attach_section(&section.id);
            }
        }

        tracing::debug!(id = %section.id, landmark = ?section.landmark_id, "section registered");
        self.sections.insert(section.id.clone(), section);
        Ok(())
    }

    /// Remove a section. Member elements stay registered but become
    /// ungrouped for ordering and section jumps.
    pub fn unregister_section(&mut self, id: &str) -> bool {
        let Some(section) = self.sections.remove(id) else {
            return false;
        };
        if let Some(landmark_id) = section.landmark_id.as_deref() {
            if let Some(landmark) = self.landmarks.get_mut(landmark_id) {
                landmark.detach_section(id);
            }
        }
        tracing::debug!(id, "section unregistered");
        true
    }

    pub fn section(&self, id: &str) -> Option<&NavigableSection> {
        self.sections.get(id)
    }

    pub fn sections(&self) -> impl Iterator<Item = &NavigableSection> {
        self.sections.values()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    // ========== Landmarks ==========

    /// Register a landmark, adopting any already registered sections that
    /// name it.
    pub fn register_landmark(&mut self, mut landmark: NavigableLandmark) -> Result<(), A11yError> {
        if self.landmarks.contains_key(&landmark.id) {
            return Err(A11yError::DuplicateId(landmark.id));
        }

        let owned: Vec<String> = self
            .sections
            .values()
            .filter(|s| s.landmark_id.as_deref() == Some(landmark.id.as_str()))
            .map(|s| s.id.clone())
            .collect();
        for id in &owned {
            landmark.attach_section(id);
        }

        tracing::debug!(id = %landmark.id, role = landmark.role.as_str(), "landmark registered");
        self.landmarks.insert(landmark.id.clone(), landmark);
        Ok(())
    }

    /// Remove a landmark. Its sections stay registered but become
    /// landmark-less for ordering purposes.
    pub fn unregister_landmark(&mut self, id: &str) -> bool {
        let removed = self.landmarks.remove(id).is_some();
        if removed {
            tracing::debug!(id, "landmark unregistered");
        }
        removed
    }

    pub fn landmark(&self, id: &str) -> Option<&NavigableLandmark> {
        self.landmarks.get(id)
    }

    pub fn landmarks(&self) -> impl Iterator<Item = &NavigableLandmark> {
        self.landmarks.values()
    }

    pub fn landmark_count(&self) -> usize {
        self.landmarks.len()
    }

    // ========== Grouping ==========

    /// Resolve an element's effective section: its declared section, if that
    /// section is actually registered.
    pub(crate) fn section_of(&self, element: &NavigableElement) -> Option<&NavigableSection> {
        element
            .section_id
            .as_deref()
            .and_then(|id| self.sections.get(id))
    }

    /// Resolve the landmark owning an element's section, if both exist.
    pub(crate) fn landmark_of(&self, element: &NavigableElement) -> Option<&NavigableLandmark> {
        self.section_of(element)
            .and_then(|s| s.landmark_id.as_deref())
            .and_then(|id| self.landmarks.get(id))
    }

    // ========== Teardown ==========

    /// Drop every element; sections and landmarks survive with empty
    /// membership.
    pub fn clear_elements(&mut self) {
        self.elements.clear();
        for section in self.sections.values_mut() {
            section.entries.clear();
        }
        tracing::debug!("all elements cleared");
    }

    /// Drop everything.
    pub fn clear_all(&mut self) {
        self.elements.clear();
        self.sections.clear();
        self.landmarks.clear();
    }
}
