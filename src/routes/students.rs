use crate::{
    data::student::{Student, StudentForm},
    error::{HtmlError, Operation},
    list::{
        form::{CancelOutcome, FormState, UNSAVED_CHANGES_PROMPT},
        view::{SortDirection, SortField, SortSpec, ViewRow, derive_view},
    },
    maud_conveniences::{
        DANGER_BUTTON, PRIMARY_BUTTON, SECONDARY_BUTTON, close_modal_oob, form_element, modal,
        simple_form_element,
    },
    state::KampusState,
};
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

const INPUT_CLASS: &str = "w-full h-10 px-3 rounded-lg border border-slate-200 bg-white text-sm focus:outline-none focus:ring-2 focus:ring-indigo-500";
const LIST_INCLUDE: &str = "#student_table, #search";
const CONFIRM_CANCEL_VALS: &str = r#"{"confirmed": true}"#;

/// The list's view parameters, carried between fragments by htmx.
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub search: String,
    pub sort: Option<SortField>,
    pub dir: Option<SortDirection>,
    pub highlight: Option<i32>,
}

impl ListQuery {
    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort.map(|field| SortSpec {
            field,
            direction: self.dir.unwrap_or_default(),
        })
    }
}

pub async fn internal_get_students(
    State(state): State<KampusState>,
    Query(query): Query<ListQuery>,
) -> Markup {
    render_table(&state, &query).await
}

async fn render_table(state: &KampusState, query: &ListQuery) -> Markup {
    let sort = query.sort_spec();
    let students = state.list().await;
    if let Err(e) = &students {
        error!(?e, "Unable to list students");
    }
    let total = students.as_ref().map_or(0, Vec::len);

    // re-fetching without `highlight` after 2s un-marks the row; any newer
    // swap of this element drops the pending request
    let unflash = query.highlight.map(|_| "/internal/students");

    html! {
        div id="student_table" hx-get=[unflash] hx-trigger=[unflash.map(|_| "load delay:2s")]
            hx-include=[unflash.map(|_| "this, #search")] hx-swap=[unflash.map(|_| "outerHTML")] {
            @if let Some(spec) = sort {
                input type="hidden" name="sort" value=(spec.field.as_str());
                input type="hidden" name="dir" value=(spec.direction.as_str());
            }
            div class="text-sm text-slate-500 font-medium mb-2 text-right" {
                "Total Mahasiswa: "
                span class="text-slate-900" {(total)}
            }
            div class="bg-white rounded-xl shadow-sm border border-slate-200 overflow-hidden" {
                table class="w-full text-left border-collapse" {
                    thead {
                        tr class="bg-slate-50 border-b border-slate-200" {
                            th class="px-6 py-4 text-xs font-semibold text-slate-500 uppercase w-12" {"#"}
                            (sort_header(SortField::Nama, "Nama Mahasiswa", sort))
                            (sort_header(SortField::Npm, "NPM", sort))
                            (sort_header(SortField::Jurusan, "Jurusan", sort))
                            th class="px-6 py-4 text-xs font-semibold text-slate-500 uppercase text-right" {"Aksi"}
                        }
                    }
                    tbody class="divide-y divide-slate-100" {
                        @match &students {
                            Err(e) => {
                                tr {
                                    td colspan="5" class="px-6 py-16 text-center text-red-500" {
                                        p {"Gagal " (Operation::Load.to_string()) ": " (e.to_string())}
                                    }
                                }
                            }
                            Ok(students) => {
                                @let rows = derive_view(students, &query.search, sort);
                                @if rows.is_empty() {
                                    tr {
                                        td colspan="5" class="px-6 py-16 text-center" {
                                            h3 class="text-slate-900 font-medium mb-1" {"Tidak ada data ditemukan"}
                                            p class="text-slate-500 text-sm" {
                                                "Coba ubah kata kunci pencarian atau tambah data mahasiswa baru."
                                            }
                                        }
                                    }
                                } @else {
                                    @for row in rows {
                                        (student_row(row, query.highlight))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn sort_header(field: SortField, label: &'static str, current: Option<SortSpec>) -> Markup {
    let next = SortSpec::toggle(current, field);
    let vals = serde_json::to_string(&next).unwrap_or_default(); //plain enums always serialise
    let arrow = match current {
        Some(SortSpec { field: active, direction }) if active == field => match direction {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        },
        _ => "",
    };

    html! {
        th class="px-6 py-4 text-xs font-semibold text-slate-500 uppercase cursor-pointer hover:bg-slate-100 select-none"
            hx-get="/internal/students" hx-vals=(vals) hx-include="#search" hx-target="#student_table" hx-swap="outerHTML" {
            (label) " "
            span class="text-indigo-600" {(arrow)}
        }
    }
}

fn student_row(row: ViewRow<'_>, highlight: Option<i32>) -> Markup {
    let ViewRow { number, student } = row;
    let row_class = if highlight == Some(student.id) {
        "bg-indigo-100 transition-colors duration-500"
    } else {
        "hover:bg-indigo-50/30 transition-colors duration-500"
    };
    let edit_vals = serde_json::to_string(student).unwrap_or_default();
    let delete_vals = serde_json::json!({ "id": student.id, "nama": student.nama }).to_string();

    html! {
        tr class=(row_class) {
            td class="px-6 py-4 text-sm text-slate-500" {(number)}
            td class="px-6 py-4 text-sm font-medium text-slate-900" {(student.nama)}
            td class="px-6 py-4 text-sm font-mono" {
                span class="bg-slate-100 px-2 py-1 rounded text-slate-700" {(student.npm)}
            }
            td class="px-6 py-4 text-sm" {
                span class="px-2.5 py-0.5 rounded-full text-xs font-medium bg-blue-50 text-blue-700 border border-blue-100" {(student.jurusan)}
            }
            td class="px-6 py-4 text-sm text-right space-x-2" {
                button class="text-slate-500 hover:text-indigo-600" title="Edit"
                    hx-get="/internal/students/form" hx-vals=(edit_vals) hx-target="#modal" hx-swap="innerHTML" {"Edit"}
                button class="text-slate-500 hover:text-red-600" title="Hapus"
                    hx-get="/internal/students/confirm_delete" hx-vals=(delete_vals) hx-target="#modal" hx-swap="innerHTML" {"Hapus"}
            }
        }
    }
}

/// Which student the form opens for. Without an `id` the form adds a new one.
#[derive(Deserialize, Debug, Default)]
pub struct FormTarget {
    pub id: Option<i32>,
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub jurusan: String,
    #[serde(default)]
    pub npm: String,
}

pub async fn internal_get_student_form(Query(target): Query<FormTarget>) -> Markup {
    let FormTarget {
        id,
        nama,
        jurusan,
        npm,
    } = target;

    let form = match id {
        Some(id) => FormState::editing(&Student {
            id,
            nama,
            jurusan,
            npm,
        }),
        None => FormState::blank(),
    };

    render_form(&form, id)
}

fn render_form(form: &FormState, editing: Option<i32>) -> Markup {
    let values = form.values();
    let initial = form.initial();
    let errors = form.errors();

    let heading = if editing.is_some() {
        "Edit Data Mahasiswa"
    } else {
        "Tambah Mahasiswa Baru"
    };

    modal(heading, html! {
        form hx-post="/internal/students/form" hx-target="#student_table" hx-swap="outerHTML" hx-include=(LIST_INCLUDE) {
            @if let Some(id) = editing {
                input type="hidden" name="id" value=(id);
            }
            input type="hidden" name="initial_nama" value=(initial.nama);
            input type="hidden" name="initial_jurusan" value=(initial.jurusan);
            input type="hidden" name="initial_npm" value=(initial.npm);

            (simple_form_element("nama", "Nama Lengkap", &values.nama, "Contoh: Budi Santoso", errors.nama))
            (simple_form_element("jurusan", "Jurusan", &values.jurusan, "Contoh: Teknik Informatika", errors.jurusan))
            (form_element("npm", "NPM", html! {
                input type="text" id="npm" name="npm" value=(values.npm) placeholder="Contoh: 20240001"
                    maxlength="8" inputmode="numeric" required class=(INPUT_CLASS)
                    oninput="this.value = this.value.replace(/[^0-9]/g, '')";
            }, errors.npm))

            div id="cancel_prompt" {}

            div class="flex justify-end gap-3 pt-4" {
                button type="button" class=(SECONDARY_BUTTON) hx-post="/internal/students/form/cancel"
                    hx-include="closest form" hx-target="#cancel_prompt" hx-swap="innerHTML" {"Batal"}
                button type="submit" class=(PRIMARY_BUTTON) {
                    @if editing.is_some() {"Simpan Perubahan"} @else {"Tambah Mahasiswa"}
                }
            }
        }
    })
}

#[derive(Deserialize, Debug)]
pub struct SubmittedForm {
    pub id: Option<i32>,
    pub nama: String,
    pub jurusan: String,
    pub npm: String,
    #[serde(default)]
    pub initial_nama: String,
    #[serde(default)]
    pub initial_jurusan: String,
    #[serde(default)]
    pub initial_npm: String,
    #[serde(default)]
    pub search: String,
    pub sort: Option<SortField>,
    pub dir: Option<SortDirection>,
}

pub async fn internal_post_student_form(
    State(state): State<KampusState>,
    Form(submitted): Form<SubmittedForm>,
) -> Result<Response, HtmlError> {
    let SubmittedForm {
        id,
        nama,
        jurusan,
        npm,
        initial_nama,
        initial_jurusan,
        initial_npm,
        search,
        sort,
        dir,
    } = submitted;

    let mut form = FormState::restore(
        StudentForm {
            nama: initial_nama,
            jurusan: initial_jurusan,
            npm: initial_npm,
        },
        StudentForm { nama, jurusan, npm },
    );

    let Ok(values) = form.submit() else {
        return Ok((
            [("HX-Retarget", "#modal"), ("HX-Reswap", "innerHTML")],
            render_form(&form, id),
        )
            .into_response());
    };

    let student = match id {
        Some(id) => {
            let student = state
                .update(id, values)
                .await
                .map_err(HtmlError::during(Operation::Update))?;
            info!(id, "Updated student");
            student
        }
        None => {
            let student = state
                .create(values)
                .await
                .map_err(HtmlError::during(Operation::Create))?;
            info!(id = student.id, "Created student");
            student
        }
    };

    let query = ListQuery {
        search,
        sort,
        dir,
        highlight: Some(student.id),
    };
    let table = render_table(&state, &query).await;

    Ok(html! {
        (table)
        (close_modal_oob())
    }
    .into_response())
}

#[derive(Deserialize, Debug)]
pub struct CancelForm {
    pub nama: String,
    pub jurusan: String,
    pub npm: String,
    #[serde(default)]
    pub initial_nama: String,
    #[serde(default)]
    pub initial_jurusan: String,
    #[serde(default)]
    pub initial_npm: String,
    #[serde(default)]
    pub confirmed: bool,
}

pub async fn internal_post_cancel_form(Form(cancel): Form<CancelForm>) -> Markup {
    let CancelForm {
        nama,
        jurusan,
        npm,
        initial_nama,
        initial_jurusan,
        initial_npm,
        confirmed,
    } = cancel;

    let mut form = FormState::restore(
        StudentForm {
            nama: initial_nama,
            jurusan: initial_jurusan,
            npm: initial_npm,
        },
        StudentForm { nama, jurusan, npm },
    );

    match form.cancel(|| confirmed) {
        CancelOutcome::Discarded => close_modal_oob(),
        CancelOutcome::Kept => html! {
            div class="bg-amber-50 border border-amber-300 text-amber-800 px-4 py-3 rounded-lg" role="alert" {
                p class="text-sm" {(UNSAVED_CHANGES_PROMPT)}
                div class="flex justify-end gap-2 mt-3" {
                    button type="button" class=(SECONDARY_BUTTON) hx-get="/internal/modal/close"
                        hx-target="#cancel_prompt" hx-swap="innerHTML" {"Tidak"}
                    button type="button" class=(DANGER_BUTTON) hx-post="/internal/students/form/cancel"
                        hx-vals=(CONFIRM_CANCEL_VALS) hx-include="closest form" hx-target="#cancel_prompt" hx-swap="innerHTML" {"Ya, batalkan"}
                }
            }
        },
    }
}

#[derive(Deserialize, Debug)]
pub struct DeleteTarget {
    pub id: i32,
    #[serde(default)]
    pub nama: String,
}

pub async fn internal_get_delete_confirmation(
    Query(DeleteTarget { id, nama }): Query<DeleteTarget>,
) -> Markup {
    modal("Konfirmasi Hapus", html! {
        p class="text-slate-600 text-sm leading-relaxed" {
            "Apakah Anda yakin ingin menghapus data mahasiswa "
            span class="font-semibold text-slate-900" {(nama)}
            "? Tindakan ini tidak dapat dibatalkan."
        }
        div class="flex justify-end gap-3 mt-4" {
            button type="button" class=(SECONDARY_BUTTON) hx-get="/internal/modal/close" hx-target="#modal" {"Batal"}
            button type="button" class=(DANGER_BUTTON) hx-delete={"/internal/students?id=" (id)}
                hx-include=(LIST_INCLUDE) hx-target="#student_table" hx-swap="outerHTML" {"Hapus Data"}
        }
    })
}

#[derive(Deserialize, Debug)]
pub struct DeleteQuery {
    pub id: i32,
    #[serde(default)]
    pub search: String,
    pub sort: Option<SortField>,
    pub dir: Option<SortDirection>,
}

pub async fn internal_delete_student(
    State(state): State<KampusState>,
    Query(DeleteQuery {
        id,
        search,
        sort,
        dir,
    }): Query<DeleteQuery>,
) -> Result<Markup, HtmlError> {
    state
        .delete(id)
        .await
        .map_err(HtmlError::during(Operation::Delete))?;
    info!(id, "Deleted student");

    let query = ListQuery {
        search,
        sort,
        dir,
        highlight: None,
    };
    let table = render_table(&state, &query).await;

    Ok(html! {
        (table)
        (close_modal_oob())
    })
}

pub async fn internal_get_close_modal() -> Markup {
    html! {}
}
