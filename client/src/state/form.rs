//! Form binder: one editable record per form with reset-to-initial.
//!
//! DESIGN
//! ======
//! Each form is a plain struct whose keys are closed by a `Field` enum, so
//! the key set cannot change after construction and lookups by field are
//! checked at compile time. `on_named_input_change` bridges DOM `name=`
//! attributes onto that enum.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::fmt::Debug;

/// A form record with a fixed set of string fields.
pub trait FormFields: Clone {
    type Field: Copy + Eq + Debug;

    /// Resolve a DOM input `name` to its field.
    fn field_by_name(name: &str) -> Option<Self::Field>;

    fn value(&self, field: Self::Field) -> &str;

    fn value_mut(&mut self, field: Self::Field) -> &mut String;
}

/// Current values of a form plus the record it was created from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState<T> {
    initial: T,
    current: T,
}

impl<T: FormFields + Default> Default for FormState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: FormFields> FormState<T> {
    pub fn new(initial: T) -> Self {
        Self { current: initial.clone(), initial }
    }

    pub fn values(&self) -> &T {
        &self.current
    }

    pub fn value(&self, field: T::Field) -> &str {
        self.current.value(field)
    }

    /// Value of the field named `name`, if the form has one.
    pub fn named_value(&self, name: &str) -> Option<&str> {
        T::field_by_name(name).map(|field| self.current.value(field))
    }

    /// Replace exactly one field; every other field keeps its value.
    pub fn on_input_change(&mut self, field: T::Field, value: impl Into<String>) {
        *self.current.value_mut(field) = value.into();
    }

    /// Replace the field named `name`. Returns `false` for a name the form
    /// does not have.
    ///
    /// # Panics
    ///
    /// In debug builds, panics on an unknown `name`.
    pub fn on_named_input_change(&mut self, name: &str, value: impl Into<String>) -> bool {
        let field = T::field_by_name(name);
        debug_assert!(field.is_some(), "unknown form field `{name}`");
        match field {
            Some(field) => {
                self.on_input_change(field, value);
                true
            }
            None => false,
        }
    }

    /// Restore the initial record. Idempotent.
    pub fn on_reset_form(&mut self) {
        self.current = self.initial.clone();
    }

    pub fn is_dirty(&self) -> bool
    where
        T: PartialEq,
    {
        self.current != self.initial
    }
}

// =============================================================
// Application forms
// =============================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignInField {
    Email,
    Password,
}

impl FormFields for SignInForm {
    type Field = SignInField;

    fn field_by_name(name: &str) -> Option<SignInField> {
        match name {
            "email" => Some(SignInField::Email),
            "password" => Some(SignInField::Password),
            _ => None,
        }
    }

    fn value(&self, field: SignInField) -> &str {
        match field {
            SignInField::Email => &self.email,
            SignInField::Password => &self.password,
        }
    }

    fn value_mut(&mut self, field: SignInField) -> &mut String {
        match field {
            SignInField::Email => &mut self.email,
            SignInField::Password => &mut self.password,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignUpField {
    Name,
    Email,
    Password,
}

impl FormFields for SignUpForm {
    type Field = SignUpField;

    fn field_by_name(name: &str) -> Option<SignUpField> {
        match name {
            "name" => Some(SignUpField::Name),
            "email" => Some(SignUpField::Email),
            "password" => Some(SignUpField::Password),
            _ => None,
        }
    }

    fn value(&self, field: SignUpField) -> &str {
        match field {
            SignUpField::Name => &self.name,
            SignUpField::Email => &self.email,
            SignUpField::Password => &self.password,
        }
    }

    fn value_mut(&mut self, field: SignUpField) -> &mut String {
        match field {
            SignUpField::Name => &mut self.name,
            SignUpField::Email => &mut self.email,
            SignUpField::Password => &mut self.password,
        }
    }
}

/// Password-reset request: just the account email.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetRequestForm {
    pub email: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetRequestField {
    Email,
}

impl FormFields for ResetRequestForm {
    type Field = ResetRequestField;

    fn field_by_name(name: &str) -> Option<ResetRequestField> {
        (name == "email").then_some(ResetRequestField::Email)
    }

    fn value(&self, ResetRequestField::Email: ResetRequestField) -> &str {
        &self.email
    }

    fn value_mut(&mut self, ResetRequestField::Email: ResetRequestField) -> &mut String {
        &mut self.email
    }
}

/// New password entered from an emailed reset link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetConfirmForm {
    pub password: String,
    pub confirm: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetConfirmField {
    Password,
    Confirm,
}

impl FormFields for ResetConfirmForm {
    type Field = ResetConfirmField;

    fn field_by_name(name: &str) -> Option<ResetConfirmField> {
        match name {
            "password" => Some(ResetConfirmField::Password),
            "confirm" => Some(ResetConfirmField::Confirm),
            _ => None,
        }
    }

    fn value(&self, field: ResetConfirmField) -> &str {
        match field {
            ResetConfirmField::Password => &self.password,
            ResetConfirmField::Confirm => &self.confirm,
        }
    }

    fn value_mut(&mut self, field: ResetConfirmField) -> &mut String {
        match field {
            ResetConfirmField::Password => &mut self.password,
            ResetConfirmField::Confirm => &mut self.confirm,
        }
    }
}
