use crate::{
    config::{RuntimeConfiguration, StoreConfig},
    error::KampusResult,
    store::{MemoryStudentStore, PostgresStudentStore, StudentStore},
};
use maud::{DOCTYPE, Markup, html};
use sqlx::postgres::PgPoolOptions;
use std::{ops::Deref, sync::Arc};

const HTMX_CONFIG: &str = r#"{"responseHandling":[{"code":"204","swap":false},{"code":".*","swap":true}]}"#;

#[derive(Clone, Debug)]
pub struct KampusState {
    store: Arc<dyn StudentStore>,
}

impl KampusState {
    pub async fn new(config: &RuntimeConfiguration) -> KampusResult<Self> {
        let store: Arc<dyn StudentStore> = match config.store() {
            StoreConfig::Postgres(db_config) => {
                let options = PgPoolOptions::new().max_connections(db_config.max_connections());
                Arc::new(PostgresStudentStore::connect(options, &db_config).await?)
            }
            StoreConfig::Memory => {
                warn!("Using the in-memory store, nothing will be persisted");
                Arc::new(MemoryStudentStore::new())
            }
        };

        Ok(Self { store })
    }

    pub fn with_store(store: impl StudentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    #[allow(clippy::unused_self)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    meta name="htmx-config" content=(HTMX_CONFIG) {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "DataMahasiswa" }
                }
                body class="min-h-screen bg-slate-50 text-slate-900 font-sans" {
                    (markup)
                }
            }
        }
    }

    pub async fn sensible_shutdown(&self) {
        self.store.close().await;
    }
}

impl Deref for KampusState {
    type Target = dyn StudentStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
