//! Motor de filtros y agregaciones del panel.
//!
//! Cada consulta recalcula los seis gráficos desde la tabla base compartida,
//! de forma síncrona y sin modificarla.

pub mod agregados;
pub mod filtros;
pub mod opciones;

use serde::Serialize;

use crate::geo::LimitesRegionales;
use crate::models::FiltrosPanel;
use crate::normalizacion::TablaBase;
use agregados::{
    ConteoDiario, ConteoRegion, DistribucionTipo, MapaRegional, MontoMensual, PuntoDuracionMonto,
};

pub use filtros::MAIN_VIEW_CUTOFF;
pub use opciones::{opciones_filtros, OpcionesFiltros};

/// Datos de los seis gráficos para un conjunto de filtros.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VistasPanel {
    pub licitaciones_por_region: Vec<ConteoRegion>,
    pub monto_por_mes: Vec<MontoMensual>,
    pub licitaciones_por_dia: Vec<ConteoDiario>,
    pub duracion_vs_monto: Vec<PuntoDuracionMonto>,
    pub distribucion_tipo: DistribucionTipo,
    pub mapa_monto_region: MapaRegional,
}

pub fn calcular_panel(
    tabla: &TablaBase,
    filtros: &FiltrosPanel,
    limites: Option<&LimitesRegionales>,
) -> VistasPanel {
    let region = filtros::vista_region(tabla, filtros);
    let principal = filtros::vista_principal(tabla, filtros);
    let mapa = filtros::vista_mapa(tabla);
    tracing::debug!(
        region = region.len(),
        principal = principal.len(),
        mapa = mapa.len(),
        agrupacion = ?filtros.agrupacion_tipo,
        "recalculando panel"
    );

    VistasPanel {
        licitaciones_por_region: agregados::conteo_por_region(&region),
        monto_por_mes: agregados::monto_por_mes(&principal),
        licitaciones_por_dia: agregados::conteo_diario(&principal),
        duracion_vs_monto: agregados::duracion_vs_monto(&principal),
        distribucion_tipo: agregados::distribucion_tipo(&principal, filtros.agrupacion_tipo),
        mapa_monto_region: agregados::mapa_regional(&mapa, limites),
    }
}
