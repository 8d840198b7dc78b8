use crate::{
    client::StudentsApi,
    data::student::{Student, StudentForm},
    error::{InvalidSnafu, ListError, Operation, RequestSnafu},
    list::{
        form::FormState,
        highlight::Highlight,
        state::{ListState, Msg},
        view::{SortField, ViewRow},
    },
};
use snafu::ResultExt;

/// Drives a [`ListState`] against the REST API: each command awaits the
/// server's answer and only then merges it into the local list. A failed
/// request leaves the list as it was and is returned to the caller to show.
#[derive(Debug)]
pub struct ListController<A> {
    api: A,
    state: ListState,
    highlight: Highlight,
}

impl<A: StudentsApi> ListController<A> {
    pub fn new(api: A) -> Self {
        Self::with_highlight(api, Highlight::default())
    }

    pub fn with_highlight(api: A, highlight: Highlight) -> Self {
        Self {
            api,
            state: ListState::default(),
            highlight,
        }
    }

    pub const fn state(&self) -> &ListState {
        &self.state
    }

    pub fn highlighted(&self) -> Option<i32> {
        self.highlight.current()
    }

    pub fn view(&self) -> Vec<ViewRow<'_>> {
        self.state.view()
    }

    pub async fn load(&mut self) -> Result<(), ListError> {
        match self.api.list().await {
            Ok(students) => {
                self.state.apply(Msg::Loaded(students));
                Ok(())
            }
            Err(source) => {
                self.state.apply(Msg::LoadFailed(source.to_string()));
                Err(ListError::Request {
                    operation: Operation::Load,
                    source,
                })
            }
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.apply(Msg::SearchChanged(search.into()));
    }

    pub fn sort_by(&mut self, field: SortField) {
        self.state.apply(Msg::SortClicked(field));
    }

    /// Validates `form` and, if it passes, creates a new student (`editing`
    /// is `None`) or replaces the one with id `editing`.
    pub async fn submit(
        &mut self,
        form: &mut FormState,
        editing: Option<i32>,
    ) -> Result<Student, ListError> {
        let operation = if editing.is_some() {
            Operation::Update
        } else {
            Operation::Create
        };
        let values = form.submit().context(InvalidSnafu { operation })?;

        match editing {
            Some(id) => self.update(id, values).await,
            None => self.create(values).await,
        }
    }

    pub async fn create(&mut self, form: StudentForm) -> Result<Student, ListError> {
        let created = self.api.create(&form).await.context(RequestSnafu {
            operation: Operation::Create,
        })?;

        info!(id = created.id, "Created student");
        self.state.apply(Msg::Created(created.clone()));
        self.highlight.mark(created.id);
        Ok(created)
    }

    pub async fn update(&mut self, id: i32, form: StudentForm) -> Result<Student, ListError> {
        let updated = self.api.update(id, &form).await.context(RequestSnafu {
            operation: Operation::Update,
        })?;

        info!(id, "Updated student");
        self.state.apply(Msg::Updated(updated.clone()));
        self.highlight.mark(id);
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i32) -> Result<(), ListError> {
        self.api.delete(id).await.context(RequestSnafu {
            operation: Operation::Delete,
        })?;

        info!(id, "Deleted student");
        self.state.apply(Msg::Deleted(id));
        if self.highlight.current() == Some(id) {
            self.highlight.clear();
        }
        Ok(())
    }
}
