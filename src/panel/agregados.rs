// Agregaciones de cada gráfico. Todas reciben una vista ya filtrada y
// devuelven listas vacías cuando no hay datos.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalogos::{self, ETIQUETA_OTRO};
use crate::geo::LimitesRegionales;
use crate::models::{AgrupacionTipo, TenderRow};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConteoRegion {
    pub region: Option<String>,
    pub codigo_romano: Option<&'static str>,
    pub licitaciones: usize,
    /// Texto del tooltip.
    pub detalle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MontoMensual {
    pub mes: NaiveDate,
    pub etiqueta: String,
    pub monto: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConteoDiario {
    pub fecha: NaiveDate,
    pub cantidad: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PuntoDuracionMonto {
    pub duracion_dias: f64,
    pub monto: f64,
    pub nombre_licitacion: Option<String>,
    pub organismo: Option<String>,
    pub categoria: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConteoTipo {
    pub tipo: String,
    pub cantidad: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistribucionTipo {
    pub titulo: &'static str,
    pub conteos: Vec<ConteoTipo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MontoRegion {
    pub region: String,
    pub monto: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapaRegional {
    pub regiones: Vec<MontoRegion>,
    /// Rango de color (mínimo y máximo de los montos); nulo sin datos.
    pub rango: Option<(f64, f64)>,
    /// Regiones sin feature en el GeoJSON: se dibujan en blanco.
    pub sin_geometria: Vec<String>,
}

/// Ordena descendente por cantidad. El orden es estable, así que los
/// empates conservan el orden de la clave.
fn ordenar_por_cantidad<K, T>(grupos: BTreeMap<K, usize>, f: impl Fn(K, usize) -> T) -> Vec<T> {
    let mut v: Vec<(K, usize)> = grupos.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1));
    v.into_iter().map(|(k, c)| f(k, c)).collect()
}

/// Nº de licitaciones por región (vista de regiones).
pub fn conteo_por_region(vista: &[&TenderRow]) -> Vec<ConteoRegion> {
    let mut grupos: BTreeMap<Option<String>, usize> = BTreeMap::new();
    for f in vista {
        *grupos.entry(f.region.clone()).or_default() += 1;
    }
    ordenar_por_cantidad(grupos, |region, licitaciones| {
        let detalle = format!(
            "Región={}<br>Nº licitaciones={}",
            region.as_deref().unwrap_or(""),
            licitaciones
        );
        ConteoRegion {
            codigo_romano: region.as_deref().and_then(catalogos::region_romano),
            region,
            licitaciones,
            detalle,
        }
    })
}

/// Suma de montos por mes de publicación, ignorando montos nulos.
pub fn monto_por_mes(vista: &[&TenderRow]) -> Vec<MontoMensual> {
    let mut grupos: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for f in vista {
        if let (Some(mes), Some(monto)) = (f.mes_publicacion, f.monto_estimado) {
            *grupos.entry(mes).or_default() += monto;
        }
    }
    grupos
        .into_iter()
        .map(|(mes, monto)| MontoMensual { mes, etiqueta: mes.format("%B %Y").to_string(), monto })
        .collect()
}

/// Serie diaria de cantidad de licitaciones.
pub fn conteo_diario(vista: &[&TenderRow]) -> Vec<ConteoDiario> {
    let mut grupos: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for dia in vista.iter().filter_map(|f| f.dia_publicacion()) {
        *grupos.entry(dia).or_default() += 1;
    }
    grupos.into_iter().map(|(fecha, cantidad)| ConteoDiario { fecha, cantidad }).collect()
}

/// Puntos (duración, monto) con ambos valores estrictamente positivos.
pub fn duracion_vs_monto(vista: &[&TenderRow]) -> Vec<PuntoDuracionMonto> {
    vista
        .iter()
        .filter_map(|f| {
            let monto = f.monto_estimado.filter(|m| *m > 0.0)?;
            if f.duracion_dias <= 0.0 {
                return None;
            }
            Some(PuntoDuracionMonto {
                duracion_dias: f.duracion_dias,
                monto,
                nombre_licitacion: f.nombre_licitacion.clone(),
                organismo: f.organismo.clone(),
                categoria: f.categoria.clone(),
            })
        })
        .collect()
}

pub fn clasificar_grupo(tipo: Option<&str>) -> &'static str {
    match tipo {
        Some(t) if catalogos::es_publico(t) => "Público",
        Some(t) if catalogos::es_privado(t) => "Privado",
        _ => ETIQUETA_OTRO,
    }
}

/// Distribución por tipo según el modo elegido.
pub fn distribucion_tipo(vista: &[&TenderRow], agrupacion: AgrupacionTipo) -> DistribucionTipo {
    let mut grupos: BTreeMap<&'static str, usize> = BTreeMap::new();
    let titulo = match agrupacion {
        AgrupacionTipo::Grupo => {
            for f in vista {
                *grupos.entry(clasificar_grupo(f.tipo.as_deref())).or_default() += 1;
            }
            "Distribución de Licitaciones: Público vs Privado"
        }
        AgrupacionTipo::Privado | AgrupacionTipo::Publico => {
            let pertenece: fn(&str) -> bool = if agrupacion == AgrupacionTipo::Privado {
                catalogos::es_privado
            } else {
                catalogos::es_publico
            };
            for tipo in vista.iter().filter_map(|f| f.tipo.as_deref()).filter(|t| pertenece(t)) {
                *grupos.entry(catalogos::etiqueta_tipo(tipo)).or_default() += 1;
            }
            if agrupacion == AgrupacionTipo::Privado {
                "Distribución de Licitaciones Privadas"
            } else {
                "Distribución de Licitaciones Públicas"
            }
        }
    };
    let conteos = ordenar_por_cantidad(grupos, |tipo, cantidad| ConteoTipo { tipo: tipo.to_string(), cantidad });
    DistribucionTipo { titulo, conteos }
}

/// Monto estimado total por región, con los nombres del GeoJSON.
pub fn mapa_regional(vista: &[&TenderRow], limites: Option<&LimitesRegionales>) -> MapaRegional {
    let mut grupos: BTreeMap<String, f64> = BTreeMap::new();
    for f in vista {
        if let (Some(region), Some(monto)) = (f.region.as_deref(), f.monto_estimado) {
            let region = catalogos::region_geo(region.trim()).trim().to_string();
            *grupos.entry(region).or_default() += monto;
        }
    }

    let rango = grupos.values().fold(None, |acc: Option<(f64, f64)>, &m| match acc {
        None => Some((m, m)),
        Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
    });
    let sin_geometria = grupos
        .keys()
        .filter(|r| !limites.is_some_and(|l| l.contiene(r)))
        .cloned()
        .collect();
    let regiones = grupos.into_iter().map(|(region, monto)| MontoRegion { region, monto }).collect();

    MapaRegional { regiones, rango, sin_geometria }
}
