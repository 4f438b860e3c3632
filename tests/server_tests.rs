use actix_web::{test, web, App};
use panel_licitaciones::geo::LimitesRegionales;
use panel_licitaciones::normalizacion::{cargar_tabla_base, PoliticaDuracion};
use panel_licitaciones::server::configurar_rutas;
use panel_licitaciones::PanelState;
use serde_json::{json, Value};
use std::path::Path;

fn estado() -> web::Data<PanelState> {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data");
    let tabla = cargar_tabla_base(&base.join("licitaciones_muestra.json"), PoliticaDuracion::Omitir).unwrap();
    let limites = LimitesRegionales::cargar(&base.join("regiones_muestra.json")).unwrap();
    web::Data::new(PanelState::new(tabla, Some(limites)))
}

#[actix_web::test]
async fn test_post_panel() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;
    let req = test::TestRequest::post()
        .uri("/panel")
        .set_json(json!({"regiones": ["Región de Atacama"], "agrupacion_tipo": "grupo"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["licitaciones_por_region"].as_array().unwrap().len(), 2);
    assert_eq!(body["monto_por_mes"][0]["monto"], json!(3000.0));
    assert_eq!(body["distribucion_tipo"]["conteos"].as_array().unwrap().len(), 2);
    assert_eq!(body["mapa_monto_region"]["sin_geometria"], json!([]));
}

#[actix_web::test]
async fn test_get_panel_query() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;
    let req = test::TestRequest::get()
        .uri("/panel?estados=Publicada&desde=2025-03-01&hasta=2025-03-01&agrupacion=publico")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["licitaciones_por_dia"].as_array().unwrap().len(), 1);
    assert_eq!(body["distribucion_tipo"]["titulo"], json!("Distribución de Licitaciones Públicas"));
    let regiones = body["licitaciones_por_region"].as_array().unwrap();
    let total: u64 = regiones.iter().map(|r| r["licitaciones"].as_u64().unwrap()).sum();
    assert_eq!(total, 2);
}

#[actix_web::test]
async fn test_get_panel_fecha_invalida() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;
    let req = test::TestRequest::get().uri("/panel?desde=ayer&hasta=hoy").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_filtros_y_resumen() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;

    let req = test::TestRequest::get().uri("/filtros").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["regiones"], json!(["Región de Atacama", "Región de Tarapacá"]));
    assert_eq!(body["fecha_min"], json!("2024-06-01"));

    let req = test::TestRequest::get().uri("/resumen").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["filas"], json!(3));
    assert_eq!(body["geojson_cargado"], json!(true));
}

#[actix_web::test]
async fn test_geojson_ausente() {
    let data = estado();
    let sin_geo = web::Data::new(PanelState::new(data.tabla.clone(), None));
    let app = test::init_service(App::new().app_data(sin_geo).configure(configurar_rutas)).await;
    let req = test::TestRequest::get().uri("/geojson").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_post_panel_rango_con_una_cota() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;
    let req = test::TestRequest::post()
        .uri("/panel")
        .set_json(json!({"rango_fechas": {"desde": "2025-03-10", "hasta": null}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    // sin rango completo no se filtra por fecha
    assert_eq!(body["licitaciones_por_dia"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_get_panel_categoria_con_coma() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar_rutas)).await;

    let req = test::TestRequest::get().uri("/filtros").to_request();
    let opciones: Value = test::call_and_read_body_json(&app, req).await;
    let categoria = "Servicios de limpieza, descontaminación y tratamiento de residuos";
    assert!(opciones["categorias"].as_array().unwrap().contains(&json!(categoria)));

    let req = test::TestRequest::get()
        .uri("/panel?categorias=Servicios%20de%20limpieza%2C%20descontaminaci%C3%B3n%20y%20tratamiento%20de%20residuos")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["licitaciones_por_dia"].as_array().unwrap().len(), 1);
    assert_eq!(body["monto_por_mes"][0]["monto"], json!(2000.0));
}
