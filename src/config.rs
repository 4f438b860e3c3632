use std::env;
use std::path::PathBuf;

use crate::error::{PanelError, PanelResult};
use crate::normalizacion::PoliticaDuracion;

pub const DEFAULT_DATA_PATH: &str = "mercado_publico.detalles.json";
pub const DEFAULT_GEOJSON_PATH: &str = "regiones.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:8051";

/// Configuración del proceso. Se lee del entorno (y de `.env` si existe).
///
/// - `PANEL_DATA_PATH`: JSON con los detalles de licitaciones.
/// - `PANEL_GEOJSON_PATH`: GeoJSON con los límites regionales.
/// - `PANEL_BIND`: dirección del servidor HTTP.
/// - `PANEL_DURACION`: `omitir` (por defecto) o `estricto`.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub data_path: PathBuf,
    pub geojson_path: PathBuf,
    pub bind: String,
    pub politica_duracion: PoliticaDuracion,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            geojson_path: PathBuf::from(DEFAULT_GEOJSON_PATH),
            bind: DEFAULT_BIND.to_string(),
            politica_duracion: PoliticaDuracion::default(),
        }
    }
}

// load .env at startup if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl PanelConfig {
    pub fn from_env() -> PanelResult<Self> {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda, de modo
    /// que los tests no dependan de variables de entorno del proceso.
    pub fn from_lookup<F>(lookup: F) -> PanelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = PanelConfig::default();

        if let Some(p) = non_empty("PANEL_DATA_PATH") {
            cfg.data_path = PathBuf::from(p);
        }
        if let Some(p) = non_empty("PANEL_GEOJSON_PATH") {
            cfg.geojson_path = PathBuf::from(p);
        }
        if let Some(b) = non_empty("PANEL_BIND") {
            if !b.contains(':') {
                return Err(PanelError::config(format!("PANEL_BIND debe ser host:puerto, se recibió '{}'", b)));
            }
            cfg.bind = b;
        }
        if let Some(p) = non_empty("PANEL_DURACION") {
            cfg.politica_duracion = p.parse()?;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_env_empty() {
        let cfg = PanelConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, PanelConfig::default());
        assert_eq!(cfg.bind, "127.0.0.1:8051");
    }

    #[test]
    fn overrides_and_policy() {
        let cfg = PanelConfig::from_lookup(lookup_from(&[
            ("PANEL_DATA_PATH", "data/licitaciones.json"),
            ("PANEL_BIND", "0.0.0.0:9000"),
            ("PANEL_DURACION", "estricto"),
            ("PANEL_GEOJSON_PATH", "  "),
        ]))
        .unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("data/licitaciones.json"));
        assert_eq!(cfg.geojson_path, PathBuf::from(DEFAULT_GEOJSON_PATH));
        assert_eq!(cfg.bind, "0.0.0.0:9000");
        assert_eq!(cfg.politica_duracion, PoliticaDuracion::Estricto);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(PanelConfig::from_lookup(lookup_from(&[("PANEL_BIND", "8051")])).is_err());
        assert!(PanelConfig::from_lookup(lookup_from(&[("PANEL_DURACION", "ignorar")])).is_err());
    }
}
