use crate::{
    data::student::Student,
    list::view::{SortField, SortSpec, ViewRow, derive_view},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// Everything that can change the list. Mutation messages carry the record
/// the server confirmed, so they are only sent after a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Loaded(Vec<Student>),
    LoadFailed(String),
    SearchChanged(String),
    SortClicked(SortField),
    Created(Student),
    Updated(Student),
    Deleted(i32),
}

#[derive(Debug, Clone, Default)]
pub struct ListState {
    students: Vec<Student>,
    search: String,
    sort: Option<SortSpec>,
    load: LoadState,
}

impl ListState {
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub const fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub const fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn view(&self) -> Vec<ViewRow<'_>> {
        derive_view(&self.students, &self.search, self.sort)
    }

    pub fn apply(&mut self, msg: Msg) {
        match msg {
            Msg::Loaded(students) => {
                self.students = students;
                self.load = LoadState::Loaded;
            }
            Msg::LoadFailed(message) => self.load = LoadState::Failed(message),
            Msg::SearchChanged(search) => self.search = search,
            Msg::SortClicked(field) => self.sort = Some(SortSpec::toggle(self.sort, field)),
            Msg::Created(student) => self.students.insert(0, student),
            Msg::Updated(student) => {
                if let Some(existing) = self.students.iter_mut().find(|s| s.id == student.id) {
                    *existing = student;
                }
            }
            Msg::Deleted(id) => self.students.retain(|s| s.id != id),
        }
    }
}
