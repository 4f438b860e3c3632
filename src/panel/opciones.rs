use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::TenderRow;
use crate::normalizacion::TablaBase;

/// Valores disponibles para los selectores del panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpcionesFiltros {
    pub regiones: Vec<String>,
    pub estados: Vec<String>,
    pub organismos: Vec<String>,
    pub categorias: Vec<String>,
    pub fecha_min: Option<NaiveDate>,
    pub fecha_max: Option<NaiveDate>,
}

fn distintos<'a>(filas: &'a [TenderRow], campo: impl Fn(&'a TenderRow) -> Option<&'a str>) -> Vec<String> {
    filas
        .iter()
        .filter_map(campo)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn opciones_filtros(tabla: &TablaBase) -> OpcionesFiltros {
    let filas = tabla.filas();
    let dias = filas.iter().filter_map(TenderRow::dia_publicacion);
    let (fecha_min, fecha_max) = dias.fold((None, None), |(lo, hi): (Option<NaiveDate>, Option<NaiveDate>), d| {
        (Some(lo.map_or(d, |l| l.min(d))), Some(hi.map_or(d, |h| h.max(d))))
    });

    OpcionesFiltros {
        regiones: distintos(filas, |f| f.region.as_deref()),
        estados: distintos(filas, |f| f.estado.as_deref()),
        organismos: distintos(filas, |f| f.organismo.as_deref()),
        categorias: distintos(filas, |f| f.categoria.as_deref()),
        fecha_min,
        fecha_max,
    }
}
