//! Normalización de la exportación de licitaciones.
//!
//! Convierte cada entrada anidada en una fila por ítem con tipos escalares
//! consistentes y construye la `TablaBase`, que no cambia durante la vida del
//! proceso.

pub mod crudo;
pub mod escalar;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;

use crate::error::{PanelError, PanelResult};
use crate::models::{TenderRow, UnidadDuracion};
use crudo::{Comprador, Detalle, EntradaCruda, ItemCrudo};
use escalar::{a_entero, a_f64, a_fecha, a_texto, es_falso, Escalar};

/// Sólo entran a la tabla base las publicaciones desde esta fecha.
pub const BASE_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(d) => d,
    None => panic!("fecha de corte inválida"),
};

pub const COMUNA_NO_INDICA: &str = "No indica";

/// Qué hacer cuando `TiempoDuracionContrato` o su unidad no son enteros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoliticaDuracion {
    /// Descarta las filas de la entrada y lo registra en el informe.
    #[default]
    Omitir,
    /// Aborta la normalización completa.
    Estricto,
}

impl FromStr for PoliticaDuracion {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "omitir" => Ok(PoliticaDuracion::Omitir),
            "estricto" => Ok(PoliticaDuracion::Estricto),
            other => Err(PanelError::config(format!("PANEL_DURACION desconocida: '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InformeNormalizacion {
    pub entradas_leidas: usize,
    pub entradas_malformadas: usize,
    pub filas_generadas: usize,
    pub filas_sin_duracion: usize,
    pub filas_antes_de_corte: usize,
    pub filas_base: usize,
}

/// Tabla normalizada e inmutable. Todas sus filas tienen
/// `fecha_publicacion >= BASE_CUTOFF`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TablaBase {
    filas: Vec<TenderRow>,
    informe: InformeNormalizacion,
}

impl TablaBase {
    /// Construye la tabla aplicando el corte base a filas ya normalizadas.
    pub fn desde_filas(filas: Vec<TenderRow>) -> Self {
        let informe = InformeNormalizacion {
            filas_generadas: filas.len(),
            ..Default::default()
        };
        Self::con_corte_base(filas, informe)
    }

    fn con_corte_base(filas: Vec<TenderRow>, mut informe: InformeNormalizacion) -> Self {
        let antes = filas.len();
        let filas: Vec<TenderRow> = filas
            .into_iter()
            .filter(|f| f.dia_publicacion().is_some_and(|d| d >= BASE_CUTOFF))
            .collect();
        informe.filas_antes_de_corte = antes - filas.len();
        informe.filas_base = filas.len();
        TablaBase { filas, informe }
    }

    pub fn filas(&self) -> &[TenderRow] {
        &self.filas
    }

    pub fn informe(&self) -> &InformeNormalizacion {
        &self.informe
    }

    pub fn len(&self) -> usize {
        self.filas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filas.is_empty()
    }
}

/// Lee el archivo de licitaciones y normaliza su contenido. Un archivo
/// ausente o un JSON de nivel superior que no sea un arreglo es fatal.
pub fn cargar_tabla_base(path: &Path, politica: PoliticaDuracion) -> PanelResult<TablaBase> {
    let contents = std::fs::read_to_string(path).map_err(|e| PanelError::io(path, e))?;
    let entradas: Vec<Value> = serde_json::from_str(&contents)?;
    tracing::info!(archivo = %path.display(), entradas = entradas.len(), "exportación cargada");
    normalizar(&entradas, politica)
}

/// Función pura: misma entrada, misma tabla.
pub fn normalizar(entradas: &[Value], politica: PoliticaDuracion) -> PanelResult<TablaBase> {
    let mut informe = InformeNormalizacion {
        entradas_leidas: entradas.len(),
        ..Default::default()
    };
    let mut filas: Vec<TenderRow> = Vec::new();

    for (idx, valor) in entradas.iter().enumerate() {
        let entrada: EntradaCruda = match serde_json::from_value(valor.clone()) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(indice = idx, error = %e, "entrada con forma inválida, se omite");
                informe.entradas_malformadas += 1;
                continue;
            }
        };
        let detalle = entrada.detalle.unwrap_or_default();
        let items = detalle.items.as_ref().and_then(|i| i.listado.as_deref()).unwrap_or_default();
        // sin ítems no hay filas, y tampoco se exige la duración
        if items.is_empty() {
            continue;
        }
        informe.filas_generadas += items.len();

        let duracion = duracion_entera(&detalle, "TiempoDuracionContrato", detalle.tiempo_duracion_contrato.as_ref(), politica)?;
        let unidad = duracion_entera(
            &detalle,
            "UnidadTiempoDuracionContrato",
            detalle.unidad_tiempo_duracion_contrato.as_ref(),
            politica,
        )?;
        match (duracion, unidad) {
            (Some(duracion), Some(unidad)) => filas.extend(filas_de_detalle(&detalle, items, duracion, unidad)),
            _ => informe.filas_sin_duracion += items.len(),
        }
    }

    let tabla = TablaBase::con_corte_base(filas, informe);
    tracing::info!(
        filas = tabla.informe.filas_base,
        descartadas_corte = tabla.informe.filas_antes_de_corte,
        sin_duracion = tabla.informe.filas_sin_duracion,
        malformadas = tabla.informe.entradas_malformadas,
        "tabla base construida"
    );
    Ok(tabla)
}

fn texto_recortado(e: Option<&Escalar>) -> Option<String> {
    a_texto(e).map(|s| s.trim().to_string())
}

fn duracion_entera(
    detalle: &Detalle,
    campo: &'static str,
    valor: Option<&Escalar>,
    politica: PoliticaDuracion,
) -> PanelResult<Option<i64>> {
    if let Some(n) = a_entero(valor) {
        return Ok(Some(n));
    }
    let codigo = a_texto(detalle.codigo_externo.as_ref()).unwrap_or_default();
    let crudo = valor.map(|v| v.valor().to_string()).unwrap_or_else(|| "ausente".to_string());
    match politica {
        PoliticaDuracion::Estricto => Err(PanelError::Duracion {
            codigo_externo: codigo,
            campo,
            valor: crudo,
        }),
        PoliticaDuracion::Omitir => {
            tracing::warn!(licitacion = %codigo, campo, valor = %crudo, "duración no entera, se omiten sus ítems");
            Ok(None)
        }
    }
}

/// Una fila por ítem; los campos de la licitación se repiten en cada una.
fn filas_de_detalle(detalle: &Detalle, items: &[ItemCrudo], duracion: i64, unidad: i64) -> Vec<TenderRow> {
    let sin_comprador = Comprador::default();
    let comprador = detalle.comprador.as_ref().unwrap_or(&sin_comprador);
    let (fecha_publicacion, fecha_cierre) = match detalle.fechas.as_ref() {
        Some(f) => (a_fecha(f.fecha_publicacion.as_ref()), a_fecha(f.fecha_cierre.as_ref())),
        None => (None, None),
    };
    let comuna = if es_falso(comprador.comuna_unidad.as_ref()) {
        COMUNA_NO_INDICA.to_string()
    } else {
        a_texto(comprador.comuna_unidad.as_ref()).unwrap_or_else(|| COMUNA_NO_INDICA.to_string())
    };

    let base = TenderRow {
        codigo_externo: a_texto(detalle.codigo_externo.as_ref()),
        nombre_licitacion: a_texto(detalle.nombre.as_ref()),
        descripcion: a_texto(detalle.descripcion.as_ref()),
        region: texto_recortado(comprador.region_unidad.as_ref()),
        organismo: texto_recortado(comprador.nombre_organismo.as_ref()),
        estado: a_texto(detalle.estado.as_ref()),
        tipo: a_texto(detalle.tipo.as_ref()),
        codigo_tipo: a_texto(detalle.codigo_tipo.as_ref()),
        monto_estimado: a_f64(detalle.monto_estimado.as_ref()),
        fecha_publicacion,
        fecha_cierre,
        duracion_contrato: duracion,
        unidad_duracion: unidad,
        mes_publicacion: fecha_publicacion.and_then(|f| f.date().with_day(1)),
        duracion_dias: UnidadDuracion::from_codigo(unidad).a_dias(duracion),
        comuna_comprador: comuna,
        nombre_unidad: a_texto(comprador.nombre_unidad.as_ref()),
        ..Default::default()
    };

    items
        .iter()
        .map(|item| TenderRow {
            codigo_producto: a_texto(item.codigo_producto.as_ref()),
            nombre_producto: a_texto(item.nombre_producto.as_ref()),
            cantidad_producto: a_f64(item.cantidad.as_ref()),
            categoria: a_texto(item.categoria.as_ref()),
            ..base.clone()
        })
        .collect()
}
