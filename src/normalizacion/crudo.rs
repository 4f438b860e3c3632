// Forma de cada elemento del JSON de Mercado Público (solo lo que se usa).

use serde::Deserialize;

use super::escalar::Escalar;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EntradaCruda {
    pub detalle: Option<Detalle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Detalle {
    pub codigo_externo: Option<Escalar>,
    pub nombre: Option<Escalar>,
    pub descripcion: Option<Escalar>,
    pub estado: Option<Escalar>,
    pub tipo: Option<Escalar>,
    pub codigo_tipo: Option<Escalar>,
    pub monto_estimado: Option<Escalar>,
    pub tiempo_duracion_contrato: Option<Escalar>,
    pub unidad_tiempo_duracion_contrato: Option<Escalar>,
    pub fechas: Option<Fechas>,
    pub comprador: Option<Comprador>,
    pub items: Option<Items>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Fechas {
    pub fecha_publicacion: Option<Escalar>,
    pub fecha_cierre: Option<Escalar>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Comprador {
    pub region_unidad: Option<Escalar>,
    pub nombre_organismo: Option<Escalar>,
    pub comuna_unidad: Option<Escalar>,
    pub nombre_unidad: Option<Escalar>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Items {
    pub listado: Option<Vec<ItemCrudo>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ItemCrudo {
    pub codigo_producto: Option<Escalar>,
    pub nombre_producto: Option<Escalar>,
    pub cantidad: Option<Escalar>,
    pub categoria: Option<Escalar>,
}
