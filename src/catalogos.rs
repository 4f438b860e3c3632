//! Tablas estáticas de clasificación.
//!
//! Son datos, no lógica: códigos de tipo de licitación, sus etiquetas, la
//! numeración romana de cada región y los alias que hacen coincidir el nombre
//! de región de Mercado Público con el identificador del GeoJSON.

/// Códigos de licitación pública.
pub const CODIGOS_PUBLICOS: [&str; 6] = ["L1", "LE", "LP", "LQ", "LR", "LS"];

/// Códigos de licitación privada.
pub const CODIGOS_PRIVADOS: [&str; 5] = ["E2", "CO", "B2", "H2", "I2"];

pub const ETIQUETA_OTRO: &str = "Otro";

pub const ETIQUETAS_TIPO: [(&str, &str); 11] = [
    ("L1", "LP <100 UTM"),
    ("LE", "LP 100‑1k"),
    ("LP", "LP 1k‑2k"),
    ("LQ", "LP 2k‑5k"),
    ("LR", "LP >5k"),
    ("E2", "LPriv <100"),
    ("CO", "LPriv 100‑1k"),
    ("B2", "LPriv 1k‑2k"),
    ("H2", "LPriv 2k‑5k"),
    ("I2", "LPriv >5k"),
    ("LS", "LP Serv. pers."),
];

pub const REGIONES_ROMANO: [(&str, &str); 16] = [
    ("Región de Arica y Parinacota", "XV"),
    ("Región de Tarapacá", "I"),
    ("Región de Antofagasta", "II"),
    ("Región de Atacama", "III"),
    ("Región de Coquimbo", "IV"),
    ("Región de Valparaíso", "V"),
    ("Región Metropolitana de Santiago", "RM"),
    ("Región del Libertador General Bernardo O´Higgins", "VI"),
    ("Región del Maule", "VII"),
    ("Región de Ñuble", "XVI"),
    ("Región del Biobío", "VIII"),
    ("Región de la Araucanía", "IX"),
    ("Región de Los Ríos", "XIV"),
    ("Región de los Lagos", "X"),
    ("Región de Aysén del General Carlos Ibáñez del Campo", "XI"),
    ("Región de Magallanes y de la Antártica", "XII"),
];

/// Nombre de Mercado Público -> `properties.Region` del GeoJSON.
pub const ALIAS_REGIONES_GEO: [(&str, &str); 16] = [
    ("Región de la Araucanía", "Región de La Araucanía"),
    ("Región Metropolitana de Santiago", "Región Metropolitana de Santiago"),
    ("Región de Coquimbo", "Región de Coquimbo"),
    ("Región del Maule", "Región del Maule"),
    ("Región Aysén del General Carlos Ibáñez del Campo", "Región de Aysén del Gral.Ibañez del Campo"),
    ("Región de Tarapacá", "Región de Tarapacá"),
    ("Región de Atacama", "Región de Atacama"),
    ("Región de Valparaíso", "Región de Valparaíso"),
    ("Región de Magallanes y de la Antártica", "Región de Magallanes y Antártica Chilena"),
    ("Región del Biobío", "Región del Bío-Bío"),
    ("Región del Libertador General Bernardo O´Higgins", "Región del Libertador Bernardo O'Higgins"),
    ("Región de Los Ríos", "Región de Los Ríos"),
    ("Región del Ñuble", "Región de Ñuble"),
    ("Región de los Lagos", "Región de Los Lagos"),
    ("Región de Antofagasta", "Región de Antofagasta"),
    ("Región de Arica y Parinacota", "Región de Arica y Parinacota"),
];

fn buscar(tabla: &[(&'static str, &'static str)], clave: &str) -> Option<&'static str> {
    tabla.iter().find(|(k, _)| *k == clave).map(|(_, v)| *v)
}

pub fn es_publico(tipo: &str) -> bool {
    CODIGOS_PUBLICOS.contains(&tipo)
}

pub fn es_privado(tipo: &str) -> bool {
    CODIGOS_PRIVADOS.contains(&tipo)
}

/// Etiqueta legible del código de tipo; "Otro" si no está en la tabla.
pub fn etiqueta_tipo(tipo: &str) -> &'static str {
    buscar(&ETIQUETAS_TIPO, tipo).unwrap_or(ETIQUETA_OTRO)
}

pub fn region_romano(region: &str) -> Option<&'static str> {
    buscar(&REGIONES_ROMANO, region)
}

/// Identificador geográfico de la región; sin alias se devuelve tal cual.
pub fn region_geo(region: &str) -> &str {
    buscar(&ALIAS_REGIONES_GEO, region).unwrap_or(region)
}
