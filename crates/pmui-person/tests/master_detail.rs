#![forbid(unsafe_code)]

//! End-to-end master/detail flow without a renderer: a "table" keyed by
//! person, a detail "form" rebinding to the current selection, and edits
//! flowing through attributes into both.

use pmui_model::{LABEL, Subscription};
use pmui_person::{MasterController, Person, SelectionController};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{Level, info};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

/// Rows shown by the table, in insertion order.
type Table = Rc<RefCell<Vec<(Person, String)>>>;

fn table_projector(master: &MasterController) -> Table {
    let table: Table = Rc::new(RefCell::new(Vec::new()));

    let rows = Rc::clone(&table);
    let master_clone = master.clone();
    master
        .on_person_add(move |person| {
            rows.borrow_mut().push((person.clone(), person.firstname().value()));

            let cell_rows = Rc::clone(&rows);
            let me = person.clone();
            person
                .firstname()
                .value_obs()
                .on_change(move |text: &String, _| {
                    for (p, shown) in cell_rows.borrow_mut().iter_mut() {
                        if *p == me {
                            shown.clone_from(text);
                        }
                    }
                })
                .detach();

            let removal_rows = Rc::clone(&rows);
            let me = person.clone();
            master_clone
                .on_person_remove(move |removed, remove_me| {
                    if *removed != me {
                        return;
                    }
                    removal_rows.borrow_mut().retain(|(p, _)| *p != me);
                    remove_me.remove();
                })
                .detach();
        })
        .detach();

    table
}

#[derive(Default)]
struct Form {
    firstname: String,
    firstname_label: String,
    bindings: Vec<Subscription>,
}

fn form_projector(selection: &SelectionController) -> Rc<RefCell<Form>> {
    let form = Rc::new(RefCell::new(Form::default()));
    let form_clone = Rc::clone(&form);
    selection
        .on_person_selected(move |selected| {
            // Rebinding drops the previous person's subscriptions.
            let mut state = form_clone.borrow_mut();
            state.bindings.clear();
            let Some(person) = selected else {
                state.firstname.clear();
                state.firstname_label.clear();
                return;
            };
            drop(state);

            let target = Rc::clone(&form_clone);
            let value_sub = person
                .firstname()
                .value_obs()
                .on_change_now(move |text: &String, _| {
                    target.borrow_mut().firstname.clone_from(text);
                });
            let target = Rc::clone(&form_clone);
            let label_sub = person
                .firstname()
                .get_obs(&LABEL)
                .on_change_now(move |label: &String, _| {
                    target.borrow_mut().firstname_label.clone_from(label);
                });
            let mut state = form_clone.borrow_mut();
            state.bindings.push(value_sub);
            state.bindings.push(label_sub);
        })
        .detach();
    form
}

#[test]
fn edits_in_the_form_show_up_in_the_table() {
    init_tracing();
    let master = MasterController::new();
    let selection = SelectionController::new();
    selection.follow_removals(&master).detach();
    let table = table_projector(&master);
    let form = form_projector(&selection);

    let first = master.add_person();
    let second = master.add_person();
    selection.set_selected_person(second.clone());
    assert_eq!(form.borrow().firstname, "Monika");
    assert_eq!(form.borrow().firstname_label, "First Name");

    info!("editing the selected person");
    second.firstname().set_converted_value("Grace".to_string());
    assert_eq!(form.borrow().firstname, "Grace");
    assert_eq!(table.borrow()[1].1, "Grace");
    assert_eq!(table.borrow()[0].1, "Monika");

    // The old selection no longer drives the form.
    selection.set_selected_person(first.clone());
    second.firstname().set_converted_value("Hopper".to_string());
    assert_eq!(form.borrow().firstname, "Monika");
}

#[test]
fn removing_rows_and_selection() {
    init_tracing();
    let master = MasterController::new();
    let selection = SelectionController::new();
    selection.follow_removals(&master).detach();
    let table = table_projector(&master);
    let form = form_projector(&selection);

    let a = master.add_person();
    let b = master.add_person();
    let c = master.add_person();
    selection.set_selected_person(b.clone());

    assert!(master.remove_person(&b));
    assert_eq!(table.borrow().len(), 2);
    assert!(table.borrow().iter().all(|(p, _)| *p != b));
    assert_eq!(selection.selected_person(), None);
    assert!(form.borrow().firstname.is_empty());
    assert!(form.borrow().bindings.is_empty());

    assert!(master.remove_person(&a));
    assert!(master.remove_person(&c));
    assert!(table.borrow().is_empty());
    assert!(!master.remove_person(&c));
}
