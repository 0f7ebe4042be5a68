#![forbid(unsafe_code)]

//! The person model: two labelled text attributes.

use std::fmt;
use std::rc::Rc;

use pmui_model::Attribute;

struct PersonInner {
    firstname: Attribute<String>,
    lastname: Attribute<String>,
}

/// A person with first and last name attributes.
///
/// `Person` is a handle. Equality is identity: two handles are equal only if
/// they refer to the same person, regardless of the names they hold.
#[derive(Clone)]
pub struct Person {
    inner: Rc<PersonInner>,
}

impl Person {
    pub const FIRSTNAME_LABEL: &str = "First Name";
    pub const LASTNAME_LABEL: &str = "Last Name";

    /// Create a person. Both attributes get their labels preset.
    #[must_use]
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        let firstname = Attribute::new(firstname.into());
        firstname.set_label(Self::FIRSTNAME_LABEL);
        let lastname = Attribute::new(lastname.into());
        lastname.set_label(Self::LASTNAME_LABEL);
        Self {
            inner: Rc::new(PersonInner {
                firstname,
                lastname,
            }),
        }
    }

    #[must_use]
    pub fn firstname(&self) -> &Attribute<String> {
        &self.inner.firstname
    }

    #[must_use]
    pub fn lastname(&self) -> &Attribute<String> {
        &self.inner.lastname
    }

    /// `"<first> <last>"` from the current values.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname().value(), self.lastname().value())
    }
}

impl Default for Person {
    fn default() -> Self {
        Self::new("Monika", "Mustermann")
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Person {}

impl fmt::Debug for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Person")
            .field("firstname", &self.firstname().value())
            .field("lastname", &self.lastname().value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_preset() {
        let p = Person::new("Ada", "Lovelace");
        assert_eq!(p.firstname().label(), "First Name");
        assert_eq!(p.lastname().label(), "Last Name");
        assert_eq!(p.full_name(), "Ada Lovelace");
    }

    #[test]
    fn equality_is_identity() {
        let a = Person::new("Ada", "Lovelace");
        let b = Person::new("Ada", "Lovelace");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn clones_share_attributes() {
        let a = Person::default();
        let b = a.clone();
        a.firstname().set_converted_value("Grace".to_string());
        assert_eq!(b.firstname().value(), "Grace");
        assert!(Attribute::ptr_eq(a.lastname(), b.lastname()));
    }

    #[test]
    fn debug_shows_names() {
        let dbg = format!("{:?}", Person::default());
        assert!(dbg.contains("Monika"));
        assert!(dbg.contains("Mustermann"));
    }
}
