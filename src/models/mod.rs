// Estructuras de datos principales

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PanelError;

/// Fila plana: una por ítem de cada licitación.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TenderRow {
    pub codigo_externo: Option<String>,
    pub nombre_licitacion: Option<String>,
    pub descripcion: Option<String>,
    pub region: Option<String>,
    pub organismo: Option<String>,
    pub estado: Option<String>,
    /// Código de tipo de licitación ("L1", "E2", ...).
    pub tipo: Option<String>,
    /// `CodigoTipo` numérico de Mercado Público, ya desenvuelto.
    pub codigo_tipo: Option<String>,
    pub categoria: Option<String>,
    pub codigo_producto: Option<String>,
    pub nombre_producto: Option<String>,
    pub cantidad_producto: Option<f64>,
    /// Nulo cuando falta o no es numérico, nunca cero.
    pub monto_estimado: Option<f64>,
    pub fecha_publicacion: Option<NaiveDateTime>,
    pub fecha_cierre: Option<NaiveDateTime>,
    pub duracion_contrato: i64,
    pub unidad_duracion: i64,
    pub mes_publicacion: Option<NaiveDate>,
    pub duracion_dias: f64,
    pub comuna_comprador: String,
    pub nombre_unidad: Option<String>,
}

impl TenderRow {
    pub fn dia_publicacion(&self) -> Option<NaiveDate> {
        self.fecha_publicacion.map(|f| f.date())
    }
}

/// Unidad de `TiempoDuracionContrato`. Cualquier código desconocido se trata
/// como días.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnidadDuracion {
    Horas,
    Dias,
    Semanas,
    Meses,
    Anios,
}

impl UnidadDuracion {
    pub fn from_codigo(codigo: i64) -> Self {
        match codigo {
            1 => UnidadDuracion::Horas,
            3 => UnidadDuracion::Semanas,
            4 => UnidadDuracion::Meses,
            5 => UnidadDuracion::Anios,
            _ => UnidadDuracion::Dias,
        }
    }

    pub fn a_dias(self, duracion: i64) -> f64 {
        let d = duracion as f64;
        match self {
            UnidadDuracion::Horas => d / 24.0,
            UnidadDuracion::Dias => d,
            UnidadDuracion::Semanas => d * 7.0,
            UnidadDuracion::Meses => d * 30.0,
            UnidadDuracion::Anios => d * 365.0,
        }
    }
}

/// Modo del gráfico de distribución por tipo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgrupacionTipo {
    /// Público vs privado.
    #[default]
    #[serde(rename = "grupo", alias = "group")]
    Grupo,
    #[serde(rename = "privado", alias = "private-only")]
    Privado,
    #[serde(rename = "publico", alias = "public-only")]
    Publico,
}

impl FromStr for AgrupacionTipo {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "grupo" | "group" => Ok(AgrupacionTipo::Grupo),
            "privado" | "private-only" => Ok(AgrupacionTipo::Privado),
            "publico" | "público" | "public-only" => Ok(AgrupacionTipo::Publico),
            other => Err(PanelError::filtro(format!("agrupación de tipo desconocida: '{}'", other))),
        }
    }
}

/// Rango inclusivo de días de publicación. El selector puede dejar una cota
/// vacía; sólo se restringe cuando vienen las dos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangoFechas {
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}

impl RangoFechas {
    pub fn new(desde: NaiveDate, hasta: NaiveDate) -> Self {
        RangoFechas { desde: Some(desde), hasta: Some(hasta) }
    }

    pub fn completo(&self) -> bool {
        self.desde.is_some() && self.hasta.is_some()
    }

    /// Con un rango incompleto todo día cabe.
    pub fn contiene(&self, dia: NaiveDate) -> bool {
        match (self.desde, self.hasta) {
            (Some(desde), Some(hasta)) => dia >= desde && dia <= hasta,
            _ => true,
        }
    }
}

/// Filtros seleccionados por el usuario. Listas vacías = sin restricción.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltrosPanel {
    pub regiones: Vec<String>,
    pub estados: Vec<String>,
    pub organismos: Vec<String>,
    pub categorias: Vec<String>,
    pub rango_fechas: Option<RangoFechas>,
    pub agrupacion_tipo: AgrupacionTipo,
}
