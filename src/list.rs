//! Client-side list logic: the derived view, the sort toggle, form validation,
//! the transient highlight and the controller that ties them to the REST API.

pub mod controller;
pub mod form;
pub mod highlight;
pub mod state;
pub mod view;

pub use controller::ListController;
pub use form::FormState;
pub use highlight::Highlight;
pub use state::{ListState, LoadState, Msg};
pub use view::{SortDirection, SortField, SortSpec, ViewRow, derive_view};
