use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{PanelError, PanelResult};
use crate::models::{AgrupacionTipo, FiltrosPanel, RangoFechas};

/// Filtros del panel recibidos como JSON
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "regiones": ["Región de Atacama"],
///   "estados": ["Publicada"],
///   "organismos": [],
///   "categorias": [],
///   "rango_fechas": { "desde": "2025-01-01", "hasta": "2025-06-30" },
///   "agrupacion_tipo": "grupo"
/// }
/// ```
///
/// # Campos:
/// - `regiones`, `estados`, `organismos`, `categorias`: listas vacías o ausentes = sin filtro
/// - `rango_fechas`: días de publicación inclusivos (opcional); con una cota nula o ausente no se filtra por fecha
/// - `agrupacion_tipo`: `grupo`, `privado` o `publico` (por defecto `grupo`)
pub fn parse_json_input(body: Value) -> Result<FiltrosPanel, serde_json::Error> {
    serde_json::from_value::<FiltrosPanel>(body)
}

// Valores de una clave repetida: 'categorias=a&categorias=b' -> ["a", "b"].
// No se separa por comas: los nombres de Mercado Público las contienen.
fn valores(pares: &[(String, String)], key: &str) -> Vec<String> {
    pares
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn primero(pares: &[(String, String)], key: &str) -> Option<String> {
    valores(pares, key).into_iter().next()
}

fn parse_fecha(key: &str, s: &str) -> PanelResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| PanelError::filtro(format!("{} debe ser YYYY-MM-DD ('{}'): {}", key, s, e)))
}

/// Filtros desde query string. Las listas se envían repitiendo la clave:
/// - regiones, estados, organismos, categorias
/// - desde, hasta (ambas requeridas para filtrar por fecha)
/// - agrupacion
pub fn filtros_desde_query(pares: &[(String, String)]) -> PanelResult<FiltrosPanel> {
    let desde = primero(pares, "desde").map(|s| parse_fecha("desde", &s)).transpose()?;
    let hasta = primero(pares, "hasta").map(|s| parse_fecha("hasta", &s)).transpose()?;
    let agrupacion_tipo = match primero(pares, "agrupacion") {
        Some(a) => a.parse::<AgrupacionTipo>()?,
        None => AgrupacionTipo::default(),
    };

    Ok(FiltrosPanel {
        regiones: valores(pares, "regiones"),
        estados: valores(pares, "estados"),
        organismos: valores(pares, "organismos"),
        categorias: valores(pares, "categorias"),
        rango_fechas: (desde.is_some() || hasta.is_some()).then_some(RangoFechas { desde, hasta }),
        agrupacion_tipo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn par(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_parse_json_completo() {
        let json_data = json!({
            "regiones": ["Región de Atacama", "Región del Maule"],
            "estados": ["Publicada"],
            "rango_fechas": {"desde": "2025-01-01", "hasta": "2025-06-30"},
            "agrupacion_tipo": "privado"
        });

        let filtros = parse_json_input(json_data).expect("Debe parsear JSON con filtros");
        assert_eq!(filtros.regiones.len(), 2);
        assert_eq!(filtros.estados, vec!["Publicada"]);
        assert!(filtros.organismos.is_empty());
        assert_eq!(filtros.agrupacion_tipo, AgrupacionTipo::Privado);
        let rango = filtros.rango_fechas.expect("Debe haber rango");
        assert_eq!(rango.hasta, NaiveDate::from_ymd_opt(2025, 6, 30));
    }

    #[test]
    fn test_parse_json_rango_con_una_cota() {
        let filtros = parse_json_input(json!({"rango_fechas": {"desde": "2025-01-01"}})).expect("Cota ausente es válida");
        assert!(!filtros.rango_fechas.unwrap().completo());

        let filtros = parse_json_input(json!({"rango_fechas": {"desde": null, "hasta": "2025-06-30"}})).expect("Cota nula es válida");
        assert!(!filtros.rango_fechas.unwrap().completo());
    }

    #[test]
    fn test_parse_json_agrupacion_invalida() {
        assert!(parse_json_input(json!({"agrupacion_tipo": "todos"})).is_err());
    }

    #[test]
    fn test_query_claves_repetidas_y_fechas() {
        let pares = vec![
            par("regiones", "Región de Atacama"),
            par("regiones", " "),
            par("regiones", "Región del Maule"),
            par("desde", "2025-02-01"),
            par("hasta", "2025-02-28"),
            par("agrupacion", "public-only"),
        ];

        let filtros = filtros_desde_query(&pares).unwrap();
        assert_eq!(filtros.regiones, vec!["Región de Atacama", "Región del Maule"]);
        assert!(filtros.rango_fechas.unwrap().completo());
        assert_eq!(filtros.agrupacion_tipo, AgrupacionTipo::Publico);
    }

    #[test]
    fn test_query_nombres_con_comas() {
        let categoria = "Servicios de limpieza, descontaminación y tratamiento de residuos";
        let filtros = filtros_desde_query(&[par("categorias", categoria)]).unwrap();
        assert_eq!(filtros.categorias, vec![categoria]);
    }

    #[test]
    fn test_query_fecha_incompleta_o_invalida() {
        let mut pares = vec![par("desde", "2025-02-01")];
        assert!(!filtros_desde_query(&pares).unwrap().rango_fechas.unwrap().completo());
        assert_eq!(filtros_desde_query(&[]).unwrap().rango_fechas, None);

        pares.push(par("hasta", "28/02/2025"));
        assert!(filtros_desde_query(&pares).is_err());
    }
}
