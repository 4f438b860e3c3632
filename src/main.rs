// --- Panel Licitaciones Mercado Público - Archivo principal ---

use panel_licitaciones::{preparar_estado, run_server, PanelConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match PanelConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "configuración inválida");
            std::process::exit(2);
        }
    };

    // la tabla base se construye una sola vez; sin ella no hay panel
    let state = match preparar_estado(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, archivo = %config.data_path.display(), "no se pudo construir la tabla base");
            std::process::exit(1);
        }
    };

    tracing::info!("=== Panel Licitaciones Mercado Público (API) ===");
    run_server(&config.bind, state).await
}
