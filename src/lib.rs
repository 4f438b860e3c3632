// Biblioteca raíz del crate `panel_licitaciones`.
// Expone la normalización de la exportación de Mercado Público, el motor de
// filtros/agregaciones del panel y el servidor HTTP que lo publica.
pub mod api_json;
pub mod catalogos;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod normalizacion;
pub mod panel;
pub mod server;

pub use config::PanelConfig;
pub use error::{PanelError, PanelResult};
pub use normalizacion::{cargar_tabla_base, normalizar, TablaBase};
pub use panel::{calcular_panel, VistasPanel};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::{run_server, PanelState};

/// Carga todo lo necesario para servir el panel: la tabla base (fatal si
/// falla) y los límites regionales (opcionales).
pub fn preparar_estado(config: &PanelConfig) -> PanelResult<PanelState> {
    let tabla = cargar_tabla_base(&config.data_path, config.politica_duracion)?;
    let limites = match geo::LimitesRegionales::cargar(&config.geojson_path) {
        Ok(l) => Some(l),
        Err(e) => {
            tracing::warn!(error = %e, "sin límites regionales; el mapa se mostrará sin geometría");
            None
        }
    };
    Ok(PanelState::new(tabla, limites))
}
