use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde_json::json;

use crate::api_json::{filtros_desde_query, parse_json_input};
use crate::geo::LimitesRegionales;
use crate::models::{AgrupacionTipo, FiltrosPanel, RangoFechas};
use crate::normalizacion::TablaBase;
use crate::panel::{calcular_panel, opciones_filtros};

/// Estado compartido por todos los handlers. Se construye una vez al iniciar
/// y nunca se modifica.
#[derive(Debug)]
pub struct PanelState {
    pub tabla: TablaBase,
    pub limites: Option<LimitesRegionales>,
}

impl PanelState {
    pub fn new(tabla: TablaBase, limites: Option<LimitesRegionales>) -> Self {
        PanelState { tabla, limites }
    }
}

fn responder_panel(state: &PanelState, filtros: &FiltrosPanel) -> HttpResponse {
    let vistas = calcular_panel(&state.tabla, filtros, state.limites.as_ref());
    HttpResponse::Ok().json(vistas)
}

/// POST /panel
/// Recibe los filtros como JSON (ver `parse_json_input`) y devuelve los seis gráficos.
async fn panel_post_handler(state: web::Data<PanelState>, body: web::Json<serde_json::Value>) -> impl Responder {
    match parse_json_input(body.into_inner()) {
        Ok(filtros) => responder_panel(&state, &filtros),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": format!("failed to parse filters: {}", e)})),
    }
}

/// GET /panel?regiones=a&regiones=b&estados=...&desde=YYYY-MM-DD&hasta=YYYY-MM-DD&agrupacion=grupo
async fn panel_get_handler(state: web::Data<PanelState>, query: web::Query<Vec<(String, String)>>) -> impl Responder {
    match filtros_desde_query(&query.into_inner()) {
        Ok(filtros) => responder_panel(&state, &filtros),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}

/// GET /filtros
/// Valores disponibles para cada selector y rango de fechas por defecto.
async fn filtros_handler(state: web::Data<PanelState>) -> impl Responder {
    HttpResponse::Ok().json(opciones_filtros(&state.tabla))
}

/// GET /geojson
async fn geojson_handler(state: web::Data<PanelState>) -> impl Responder {
    match &state.limites {
        Some(l) => HttpResponse::Ok().json(l.documento()),
        None => HttpResponse::NotFound().json(json!({"error": "boundary document not loaded"})),
    }
}

/// GET /resumen
async fn resumen_handler(state: web::Data<PanelState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "filas": state.tabla.len(),
        "normalizacion": state.tabla.informe(),
        "geojson_cargado": state.limites.is_some(),
    }))
}

async fn help_handler() -> impl Responder {
    let example = FiltrosPanel {
        regiones: vec!["Región de Atacama".to_string()],
        estados: vec!["Publicada".to_string()],
        organismos: Vec::new(),
        categorias: Vec::new(),
        rango_fechas: Some(RangoFechas {
            desde: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
            hasta: chrono::NaiveDate::from_ymd_opt(2025, 6, 30),
        }),
        agrupacion_tipo: AgrupacionTipo::Grupo,
    };

    let help = json!({
        "description": "API del panel de licitaciones de Mercado Público. POST /panel acepta los filtros como JSON (ver 'post_example') y devuelve los datos de los seis gráficos. GET /panel acepta los mismos filtros en query (listas repitiendo la clave).",
        "post_example": example,
        "get_example_query": "/panel?regiones=Región de Atacama&regiones=Región del Maule&estados=Publicada&desde=2025-01-01&hasta=2025-06-30&agrupacion=grupo",
        "agrupacion_choices": ["grupo", "privado", "publico"],
        "note": "El gráfico por región sólo aplica el filtro de estado; el mapa no aplica filtros.",
        "endpoints": ["/panel", "/filtros", "/geojson", "/resumen", "/help"]
    });

    HttpResponse::Ok().json(help)
}

pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.route("/panel", web::post().to(panel_post_handler))
        .route("/panel", web::get().to(panel_get_handler))
        .route("/filtros", web::get().to(filtros_handler))
        .route("/geojson", web::get().to(geojson_handler))
        .route("/resumen", web::get().to(resumen_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(bind_addr: &str, state: PanelState) -> std::io::Result<()> {
    let data = web::Data::new(state);
    tracing::info!(bind = bind_addr, "servidor del panel iniciado");
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(configurar_rutas)
    })
    .bind(bind_addr)?
    .run()
    .await
}
