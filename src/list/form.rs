use crate::data::student::{NPM_LENGTH, Student, StudentForm, is_valid_npm};
use snafu::Snafu;
use std::fmt;

pub const NPM_ERROR: &str = "NPM harus terdiri dari 8 digit angka";
pub const NAMA_ERROR: &str = "Nama wajib diisi";
pub const JURUSAN_ERROR: &str = "Jurusan wajib diisi";
pub const UNSAVED_CHANGES_PROMPT: &str =
    "Anda memiliki perubahan yang belum disimpan. Apakah Anda yakin ingin membatalkan?";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub nama: Option<&'static str>,
    pub jurusan: Option<&'static str>,
    pub npm: Option<&'static str>,
}

impl FormErrors {
    pub const fn is_empty(&self) -> bool {
        self.nama.is_none() && self.jurusan.is_none() && self.npm.is_none()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = [self.nama, self.jurusan, self.npm]
            .into_iter()
            .flatten()
            .collect();
        f.write_str(&messages.join(", "))
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("{errors}"))]
pub struct InvalidForm {
    pub errors: FormErrors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The form was reset and can be closed.
    Discarded,
    /// The user declined to throw away their changes.
    Kept,
}

/// The add/edit form. `initial` is what the form opened with, used by the
/// unsaved-changes guard.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    initial: StudentForm,
    current: StudentForm,
    errors: FormErrors,
}

impl FormState {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn editing(student: &Student) -> Self {
        let initial = student.to_form();
        Self {
            current: initial.clone(),
            initial,
            errors: FormErrors::default(),
        }
    }

    /// Rebuilds a form from values the browser posted back. No keystroke
    /// filtering is applied, `submit` still validates everything.
    pub fn restore(initial: StudentForm, current: StudentForm) -> Self {
        Self {
            initial,
            current,
            errors: FormErrors::default(),
        }
    }

    pub const fn values(&self) -> &StudentForm {
        &self.current
    }

    pub const fn initial(&self) -> &StudentForm {
        &self.initial
    }

    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn set_nama(&mut self, nama: impl Into<String>) {
        self.current.nama = nama.into();
        self.errors.nama = None;
    }

    pub fn set_jurusan(&mut self, jurusan: impl Into<String>) {
        self.current.jurusan = jurusan.into();
        self.errors.jurusan = None;
    }

    /// Keystroke filter for the NPM input. Returns whether `npm` was
    /// accepted; a rejected value leaves the field as it was, silently.
    pub fn set_npm(&mut self, npm: &str) -> bool {
        let acceptable =
            npm.len() <= NPM_LENGTH && npm.bytes().all(|b| b.is_ascii_digit());
        if !acceptable {
            return false;
        }

        npm.clone_into(&mut self.current.npm);
        self.errors.npm = None;
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.initial
    }

    pub fn submit(&mut self) -> Result<StudentForm, InvalidForm> {
        let errors = FormErrors {
            nama: self.current.nama.is_empty().then_some(NAMA_ERROR),
            jurusan: self.current.jurusan.is_empty().then_some(JURUSAN_ERROR),
            npm: (!is_valid_npm(&self.current.npm)).then_some(NPM_ERROR),
        };
        self.errors = errors;

        if errors.is_empty() {
            Ok(self.current.clone())
        } else {
            InvalidFormSnafu { errors }.fail()
        }
    }

    /// Unsaved-changes guard. `confirm` is only asked when something changed.
    pub fn cancel(&mut self, confirm: impl FnOnce() -> bool) -> CancelOutcome {
        if self.is_dirty() && !confirm() {
            return CancelOutcome::Kept;
        }

        self.current = self.initial.clone();
        self.errors = FormErrors::default();
        CancelOutcome::Discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_npm(form: &mut FormState, keys: &str) {
        for c in keys.chars() {
            let mut next = form.values().npm.clone();
            next.push(c);
            form.set_npm(&next);
        }
    }

    fn filled(npm: &str) -> FormState {
        let mut form = FormState::blank();
        form.set_nama("Budi Santoso");
        form.set_jurusan("Teknik Informatika");
        type_npm(&mut form, npm);
        form
    }

    #[test]
    fn letters_are_rejected_per_keystroke() {
        let mut form = FormState::blank();
        type_npm(&mut form, "abc");
        assert_eq!(form.values().npm, "");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn digits_mixed_with_letters_keep_only_digits() {
        let mut form = FormState::blank();
        type_npm(&mut form, "12a34");
        assert_eq!(form.values().npm, "1234");
    }

    #[test]
    fn npm_input_stops_at_eight_digits() {
        let mut form = FormState::blank();
        type_npm(&mut form, "1234567890");
        assert_eq!(form.values().npm, "12345678");
    }

    #[test]
    fn seven_digits_fail_with_inline_error() {
        let mut form = filled("1234567");
        let err = form.submit().unwrap_err();
        assert_eq!(err.errors.npm, Some(NPM_ERROR));
        assert_eq!(form.errors().npm, Some(NPM_ERROR));
        assert!(form.errors().nama.is_none());
    }

    #[test]
    fn eight_digits_submit() {
        let mut form = filled("12345678");
        let submitted = form.submit().unwrap();
        assert_eq!(
            submitted,
            StudentForm {
                nama: "Budi Santoso".into(),
                jurusan: "Teknik Informatika".into(),
                npm: "12345678".into(),
            }
        );
    }

    #[test]
    fn editing_npm_clears_its_error() {
        let mut form = filled("1234567");
        assert!(form.submit().is_err());
        type_npm(&mut form, "8");
        assert!(form.errors().npm.is_none());
    }

    #[test]
    fn empty_nama_and_jurusan_are_rejected() {
        let mut form = FormState::blank();
        type_npm(&mut form, "12345678");
        let err = form.submit().unwrap_err();
        assert_eq!(err.errors.nama, Some(NAMA_ERROR));
        assert_eq!(err.errors.jurusan, Some(JURUSAN_ERROR));
        assert!(err.errors.npm.is_none());
    }

    #[test]
    fn names_are_submitted_verbatim() {
        let mut form = FormState::blank();
        form.set_nama("  Budi  ");
        form.set_jurusan("   ");
        type_npm(&mut form, "12345678");

        let submitted = form.submit().unwrap();
        assert_eq!(submitted.nama, "  Budi  ");
        assert_eq!(submitted.jurusan, "   ");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn restored_values_are_validated_on_submit() {
        let mut form = FormState::restore(
            StudentForm::default(),
            StudentForm {
                nama: "Ani".into(),
                jurusan: "Manajemen".into(),
                npm: "1234abcd".into(),
            },
        );
        assert_eq!(form.submit().unwrap_err().errors.npm, Some(NPM_ERROR));
    }

    #[test]
    fn cancel_without_changes_never_asks() {
        let student = Student {
            id: 1,
            nama: "Ani".into(),
            jurusan: "Manajemen".into(),
            npm: "20240001".into(),
        };
        let mut form = FormState::editing(&student);
        let outcome = form.cancel(|| panic!("should not ask"));
        assert_eq!(outcome, CancelOutcome::Discarded);
    }

    #[test]
    fn cancel_with_changes_respects_the_answer() {
        let mut form = filled("123");

        assert_eq!(form.cancel(|| false), CancelOutcome::Kept);
        assert_eq!(form.values().npm, "123");

        assert_eq!(form.cancel(|| true), CancelOutcome::Discarded);
        assert_eq!(form.values(), &StudentForm::default());
        assert!(!form.is_dirty());
    }

    #[test]
    fn reverting_a_change_is_not_dirty() {
        let mut form = FormState::blank();
        form.set_nama("x");
        assert!(form.is_dirty());
        form.set_nama("");
        assert!(!form.is_dirty());
    }
}
