//! Módulo de filtros del panel.
//!
//! Hay tres vistas independientes sobre la tabla base y no deben mezclarse:
//! la de regiones (sólo estado), la principal (corte 2025 + todos los
//! filtros) y la del mapa (sin filtros de usuario).

use chrono::NaiveDate;

use crate::models::{FiltrosPanel, RangoFechas, TenderRow};
use crate::normalizacion::TablaBase;

/// Corte adicional de la vista principal, encima de `BASE_CUTOFF`.
pub const MAIN_VIEW_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2025, 1, 1) {
    Some(d) => d,
    None => panic!("fecha de corte inválida"),
};

/// Lista vacía = sin restricción; si no, el valor debe estar en la lista.
fn coincide(seleccion: &[String], valor: Option<&str>) -> bool {
    seleccion.is_empty() || valor.is_some_and(|v| seleccion.iter().any(|s| s == v))
}

/// Vista del gráfico de regiones: sólo aplica el filtro de estado.
pub fn vista_region<'a>(tabla: &'a TablaBase, filtros: &FiltrosPanel) -> Vec<&'a TenderRow> {
    tabla
        .filas()
        .iter()
        .filter(|f| coincide(&filtros.estados, f.estado.as_deref()))
        .collect()
}

/// Vista principal: publicaciones desde 2025 más todos los filtros.
pub fn vista_principal<'a>(tabla: &'a TablaBase, filtros: &FiltrosPanel) -> Vec<&'a TenderRow> {
    tabla
        .filas()
        .iter()
        .filter(|f| f.dia_publicacion().is_some_and(|d| d >= MAIN_VIEW_CUTOFF))
        .filter(|f| coincide(&filtros.regiones, f.region.as_deref()))
        .filter(|f| coincide(&filtros.estados, f.estado.as_deref()))
        .filter(|f| coincide(&filtros.organismos, f.organismo.as_deref()))
        .filter(|f| coincide(&filtros.categorias, f.categoria.as_deref()))
        .filter(|f| match filtros.rango_fechas.filter(RangoFechas::completo) {
            None => true,
            Some(rango) => f.dia_publicacion().is_some_and(|dia| rango.contiene(dia)),
        })
        .collect()
}

/// Vista del mapa: la tabla base completa. No reacciona a los filtros.
pub fn vista_mapa(tabla: &TablaBase) -> Vec<&TenderRow> {
    tabla.filas().iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fila(region: &str, estado: &str, dia: (i32, u32, u32)) -> TenderRow {
        let fecha = NaiveDate::from_ymd_opt(dia.0, dia.1, dia.2).unwrap();
        TenderRow {
            region: Some(region.to_string()),
            estado: Some(estado.to_string()),
            categoria: Some("Salud".to_string()),
            fecha_publicacion: fecha.and_hms_opt(12, 0, 0),
            ..Default::default()
        }
    }

    fn tabla() -> TablaBase {
        TablaBase::desde_filas(vec![
            fila("Región de Atacama", "Publicada", (2025, 3, 1)),
            fila("Región de Atacama", "Cerrada", (2025, 3, 15)),
            fila("Región de Tarapacá", "Publicada", (2024, 6, 1)),
        ])
    }

    #[test]
    fn vista_region_ignora_todo_menos_estado() {
        let t = tabla();
        let filtros = FiltrosPanel {
            regiones: vec!["Región de Tarapacá".into()],
            categorias: vec!["Otra".into()],
            ..Default::default()
        };
        assert_eq!(vista_region(&t, &filtros).len(), 3);

        let filtros = FiltrosPanel { estados: vec!["Publicada".into()], ..Default::default() };
        assert_eq!(vista_region(&t, &filtros).len(), 2);
    }

    #[test]
    fn vista_principal_aplica_corte_2025() {
        let t = tabla();
        assert_eq!(vista_principal(&t, &FiltrosPanel::default()).len(), 2);

        let filtros = FiltrosPanel { regiones: vec!["Región de Tarapacá".into()], ..Default::default() };
        assert!(vista_principal(&t, &filtros).is_empty());
    }

    #[test]
    fn rango_de_fechas_inclusivo_por_dia() {
        let t = tabla();
        let filtros = FiltrosPanel {
            rango_fechas: Some(RangoFechas::new(
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            )),
            ..Default::default()
        };
        let v = vista_principal(&t, &filtros);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].estado.as_deref(), Some("Publicada"));
    }

    #[test]
    fn rango_con_una_sola_cota_no_filtra() {
        let t = tabla();
        let filtros = FiltrosPanel {
            rango_fechas: Some(RangoFechas { desde: NaiveDate::from_ymd_opt(2025, 3, 10), hasta: None }),
            ..Default::default()
        };
        assert_eq!(vista_principal(&t, &filtros).len(), 2);
    }

    #[test]
    fn mapa_sin_filtros() {
        let t = tabla();
        assert_eq!(vista_mapa(&t).len(), 3);
    }
}
