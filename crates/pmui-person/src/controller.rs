#![forbid(unsafe_code)]

//! Master and selection controllers for a list of persons.
//!
//! # Design
//!
//! The [`MasterController`] owns the collection; list and table views
//! subscribe to additions and removals. The [`SelectionController`] owns a
//! single `Option<Person>` cell; views highlight the row or list entry whose
//! person is selected and a detail form rebinds to it.
//!
//! Views that render one person subscribe with
//! [`MasterController::on_person_remove`] and tear themselves down from
//! inside the callback with [`RemoveMe::remove`] once their person is gone.
//!
//! # Invariants
//!
//! 1. `on_person_add` listeners see the person already in `persons()`.
//! 2. After a selected person is removed, a selection controller wired with
//!    [`SelectionController::follow_removals`] selects nobody.

use pmui_model::logging::debug;
use pmui_reactive::{Observable, ObservableList, RemoveMe, Subscription};

use crate::person::Person;

/// Owns the persons and announces additions and removals.
#[derive(Clone, Default)]
pub struct MasterController {
    persons: ObservableList<Person>,
}

impl MasterController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a person with default names, add it, and return it.
    pub fn add_person(&self) -> Person {
        let person = Person::default();
        self.add(person.clone());
        person
    }

    /// Add an existing person.
    pub fn add(&self, person: Person) {
        debug!(count = self.persons.count() + 1, "person added");
        self.persons.add(person);
    }

    /// Remove `person`. Returns `false` when it was not in the list.
    pub fn remove_person(&self, person: &Person) -> bool {
        let removed = self.persons.del(person);
        debug!(removed, count = self.persons.count(), "person removal");
        removed
    }

    pub fn on_person_add(&self, listener: impl Fn(&Person) + 'static) -> Subscription {
        self.persons.on_add(listener)
    }

    /// Register a removal listener. The [`RemoveMe`] token lets it
    /// unregister itself.
    pub fn on_person_remove(
        &self,
        listener: impl Fn(&Person, &RemoveMe) + 'static,
    ) -> Subscription {
        self.persons.on_del(listener)
    }

    #[must_use]
    pub fn persons(&self) -> Vec<Person> {
        self.persons.items()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.persons.count()
    }

    /// Number of persons whose first and last names are both valid.
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.persons
            .count_if(|p| p.firstname().is_valid() && p.lastname().is_valid())
    }
}

impl std::fmt::Debug for MasterController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterController")
            .field("count", &self.count())
            .finish()
    }
}

/// Tracks which person, if any, is selected.
#[derive(Clone)]
pub struct SelectionController {
    selected: Observable<Option<Person>>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionController {
    /// Start with nobody selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            selected: Observable::new(None),
        }
    }

    pub fn set_selected_person(&self, person: Person) {
        debug!(person = ?person, "person selected");
        self.selected.set(Some(person));
    }

    pub fn clear_selection(&self) {
        self.selected.set(None);
    }

    #[must_use]
    pub fn selected_person(&self) -> Option<Person> {
        self.selected.get()
    }

    #[must_use]
    pub fn is_selected(&self, person: &Person) -> bool {
        self.selected.with(|sel| sel.as_ref() == Some(person))
    }

    /// Register a listener called with the newly selected person (or `None`)
    /// whenever the selection changes.
    pub fn on_person_selected(&self, listener: impl Fn(Option<&Person>) + 'static) -> Subscription {
        self.selected.on_change(move |new, _| listener(new.as_ref()))
    }

    /// Clear the selection whenever the selected person is removed from
    /// `master`.
    pub fn follow_removals(&self, master: &MasterController) -> Subscription {
        let selection = self.clone();
        master.on_person_remove(move |removed, _| {
            if selection.is_selected(removed) {
                selection.clear_selection();
            }
        })
    }
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("selected", &self.selected_person())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn add_person_returns_listed_person() {
        let master = MasterController::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let master_clone = master.clone();
        let _sub = master.on_person_add(move |p| {
            assert!(master_clone.persons().contains(p));
            seen_clone.borrow_mut().push(p.clone());
        });

        let p = master.add_person();
        assert_eq!(master.count(), 1);
        assert_eq!(*seen.borrow(), vec![p]);
    }

    #[test]
    fn remove_unknown_person_is_noop() {
        let master = MasterController::new();
        master.add_person();
        assert!(!master.remove_person(&Person::default()));
        assert_eq!(master.count(), 1);
    }

    #[test]
    fn row_views_remove_themselves() {
        let master = MasterController::new();
        let rows = Rc::new(Cell::new(0u32));

        // Render one "row" per added person, torn down on its removal.
        let rows_clone = Rc::clone(&rows);
        let master_clone = master.clone();
        master
            .on_person_add(move |person| {
                rows_clone.set(rows_clone.get() + 1);
                let me = person.clone();
                let rows = Rc::clone(&rows_clone);
                master_clone
                    .on_person_remove(move |removed, remove_me| {
                        if *removed != me {
                            return;
                        }
                        rows.set(rows.get() - 1);
                        remove_me.remove();
                    })
                    .detach();
            })
            .detach();

        let a = master.add_person();
        let b = master.add_person();
        assert_eq!(rows.get(), 2);

        master.remove_person(&a);
        assert_eq!(rows.get(), 1);
        master.remove_person(&b);
        assert_eq!(rows.get(), 0);
    }

    #[test]
    fn selection_notifies_with_new_person() {
        let selection = SelectionController::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = Rc::clone(&log);
        let _sub = selection.on_person_selected(move |p| {
            log_clone
                .borrow_mut()
                .push(p.map(|p| p.firstname().value()));
        });

        let ada = Person::new("Ada", "Lovelace");
        selection.set_selected_person(ada.clone());
        selection.set_selected_person(ada.clone());
        selection.clear_selection();
        assert_eq!(*log.borrow(), vec![Some("Ada".to_string()), None]);
    }

    #[test]
    fn selection_distinguishes_equal_names() {
        let selection = SelectionController::new();
        let a = Person::default();
        let b = Person::default();
        selection.set_selected_person(a.clone());
        assert!(selection.is_selected(&a));
        assert!(!selection.is_selected(&b));
    }

    #[test]
    fn removing_selected_person_clears_selection() {
        let master = MasterController::new();
        let selection = SelectionController::new();
        selection.follow_removals(&master).detach();

        let a = master.add_person();
        let b = master.add_person();
        selection.set_selected_person(b.clone());

        master.remove_person(&a);
        assert_eq!(selection.selected_person(), Some(b.clone()));

        master.remove_person(&b);
        assert_eq!(selection.selected_person(), None);
    }

    #[test]
    fn valid_count_follows_validators() {
        let master = MasterController::new();
        let p = master.add_person();
        master.add_person();
        assert_eq!(master.valid_count(), 2);

        p.firstname().set_validator(|s: &String| s.len() > 10);
        assert_eq!(master.valid_count(), 1);
    }
}
