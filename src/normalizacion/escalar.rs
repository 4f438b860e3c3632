//! Valores escalares de la exportación JSON.
//!
//! La exportación viene de MongoDB en formato extendido: un mismo campo puede
//! llegar como `5`, `"5"` o `{"$numberInt": "5"}`. `Escalar` resuelve la
//! envoltura una sola vez al deserializar; las funciones `a_*` convierten el
//! valor resultante con la tolerancia que necesita cada columna.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Escalar {
    Crudo(Value),
    /// Objeto de una sola clave `$tipo`. Puede anidarse (`$date` -> `$numberLong`).
    Etiquetado { etiqueta: String, valor: Box<Escalar> },
}

impl Escalar {
    pub fn desde_valor(v: Value) -> Self {
        if let Value::Object(map) = &v {
            if map.len() == 1 {
                if let Some((k, inner)) = map.iter().next() {
                    if k.starts_with('$') {
                        return Escalar::Etiquetado {
                            etiqueta: k.clone(),
                            valor: Box::new(Escalar::desde_valor(inner.clone())),
                        };
                    }
                }
            }
        }
        Escalar::Crudo(v)
    }

    /// Valor ya desenvuelto.
    pub fn valor(&self) -> &Value {
        match self {
            Escalar::Crudo(v) => v,
            Escalar::Etiquetado { valor, .. } => valor.valor(),
        }
    }
}

impl<'de> Deserialize<'de> for Escalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Escalar::desde_valor)
    }
}

fn valor_de(e: Option<&Escalar>) -> Option<&Value> {
    e.map(Escalar::valor).filter(|v| !v.is_null())
}

pub fn a_texto(e: Option<&Escalar>) -> Option<String> {
    match valor_de(e)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Numérico tolerante: lo no convertible (incluido NaN/infinito) es nulo.
pub fn a_f64(e: Option<&Escalar>) -> Option<f64> {
    let n = match valor_de(e)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|x| x.is_finite())
}

/// Entero estricto para los campos de duración. `None` significa que la
/// conversión falló; quien llama decide la política.
pub fn a_entero(e: Option<&Escalar>) -> Option<i64> {
    match valor_de(e)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

const FORMATOS_FECHA_HORA: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Fecha tolerante. Acepta RFC 3339 (se conserva la hora local indicada),
/// fecha-hora sin zona, solo fecha y milisegundos desde época.
pub fn a_fecha(e: Option<&Escalar>) -> Option<NaiveDateTime> {
    match valor_de(e)? {
        Value::Number(n) => n.as_i64().and_then(desde_millis),
        Value::String(s) => parsear_fecha(s.trim()),
        _ => None,
    }
}

fn desde_millis(ms: i64) -> Option<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|d| d.naive_utc())
}

pub fn parsear_fecha(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in FORMATOS_FECHA_HORA {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    // $date con $numberLong llega como texto de dígitos
    s.parse::<i64>().ok().and_then(desde_millis)
}

/// Falsedad al estilo de la exportación: nulo, vacío, `false` o cero.
pub fn es_falso(e: Option<&Escalar>) -> bool {
    match e.map(Escalar::valor) {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
    }
}
