//! Documento de límites regionales (GeoJSON) que consume el mapa coroplético.

use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{PanelError, PanelResult};

/// Propiedad del feature que identifica la región.
pub const PROPIEDAD_REGION: &str = "Region";

#[derive(Debug, Clone, PartialEq)]
pub struct LimitesRegionales {
    documento: Value,
    regiones: BTreeSet<String>,
}

impl LimitesRegionales {
    pub fn desde_valor(documento: Value) -> Self {
        let regiones = documento
            .get("features")
            .and_then(Value::as_array)
            .map(|features| {
                features
                    .iter()
                    .filter_map(|f| f.get("properties")?.get(PROPIEDAD_REGION)?.as_str())
                    .map(|s| s.trim().to_string())
                    .collect()
            })
            .unwrap_or_default();
        LimitesRegionales { documento, regiones }
    }

    pub fn cargar(path: &Path) -> PanelResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PanelError::io(path, e))?;
        let documento: Value = serde_json::from_str(&contents)?;
        let limites = Self::desde_valor(documento);
        tracing::info!(archivo = %path.display(), regiones = limites.regiones.len(), "límites regionales cargados");
        Ok(limites)
    }

    pub fn contiene(&self, region: &str) -> bool {
        self.regiones.contains(region)
    }

    pub fn documento(&self) -> &Value {
        &self.documento
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn indexa_propiedad_region() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"Region": "Región de Atacama"}, "geometry": null},
                {"type": "Feature", "properties": {"Region": "Región del Bío-Bío "}},
                {"type": "Feature", "properties": {"NOMBRE": "sin region"}}
            ]
        });
        let limites = LimitesRegionales::desde_valor(doc);
        assert!(limites.contiene("Región de Atacama"));
        assert!(limites.contiene("Región del Bío-Bío"));
        assert_eq!(limites.regiones.len(), 2);
    }

    #[test]
    fn documento_sin_features() {
        let limites = LimitesRegionales::desde_valor(json!({"type": "FeatureCollection"}));
        assert!(!limites.contiene("Región de Atacama"));
    }
}
