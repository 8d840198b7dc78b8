use crate::{maud_conveniences::PRIMARY_BUTTON, state::KampusState};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<KampusState>) -> Markup {
    state.render(html! {
        header class="bg-white border-b border-slate-200 sticky top-0 z-30" {
            div class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 h-16 flex items-center justify-between" {
                h1 class="text-xl font-bold tracking-tight text-slate-900" {"DataMahasiswa"}
                button class=(PRIMARY_BUTTON) hx-get="/internal/students/form" hx-target="#modal" {
                    "Tambah Data"
                }
            }
        }

        main class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 py-8" {
            div class="mb-6 w-full sm:w-72" {
                input id="search" type="search" name="search" placeholder="Cari nama, NPM, atau jurusan..."
                    class="w-full h-10 px-3 rounded-lg border border-slate-200 bg-white text-sm focus:outline-none focus:ring-2 focus:ring-indigo-500 shadow-sm"
                    hx-get="/internal/students" hx-trigger="input changed delay:200ms, search"
                    hx-target="#student_table" hx-swap="outerHTML" hx-include="#student_table";
            }

            div id="student_table" hx-get="/internal/students" hx-trigger="load" hx-swap="outerHTML" {
                p class="py-16 text-center text-slate-500" {"Memuat data..."}
            }
        }

        div id="modal" {}
    })
}
