//! API Integration Tests
//!
//! Drive the router in-process, one request at a time, the way the web
//! front end calls it.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use osim_server::{router, AppState, ServerConfig};

fn app() -> Router {
    router(AppState::new(&ServerConfig::default()).unwrap())
}

fn demo_app() -> Router {
    let config = ServerConfig {
        seed_demo: true,
        ..ServerConfig::default()
    };
    router(AppState::new(&config).unwrap())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

async fn post(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "POST", uri, None).await
}

// ============================================================================
// Process queues
// ============================================================================

#[tokio::test]
async fn test_home() {
    let (status, body) = get(&app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["mensaje"].is_string());
}

#[tokio::test]
async fn test_add_and_list_processes() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/colas/agregar",
        Some(json!({"PID": 3, "tiempo_llegada": 0, "rafaga_cpu": 4, "usuario": "usuario1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["PID"], 3);
    assert_eq!(body["Estado"], "Listo");

    let (_, body) = get(&app, "/colas/procesos").await;
    assert_eq!(body, json!([{"PID": 3, "Estado": "Listo"}]));

    let (_, body) = get(&app, "/colas/mostrar").await;
    assert_eq!(body, json!({"cola_listos": [3], "cola_bloqueados": []}));
}

#[tokio::test]
async fn test_add_rejects_bad_input() {
    let app = app();
    let cases = [
        json!({"PID": 1, "tiempo_llegada": -1, "rafaga_cpu": 4, "usuario": "root"}),
        json!({"PID": 1, "tiempo_llegada": 0, "rafaga_cpu": 0, "usuario": "root"}),
        json!({"PID": 0, "tiempo_llegada": 0, "rafaga_cpu": 1, "usuario": "root"}),
        json!({"PID": 1, "tiempo_llegada": 0, "rafaga_cpu": 1.5, "usuario": "root"}),
        json!({"PID": 1, "tiempo_llegada": 0}),
    ];
    for case in cases {
        let (status, body) = send(&app, "POST", "/colas/agregar", Some(case)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_argument");
        assert!(body["error"].is_string());
    }

    let (_, body) = get(&app, "/colas/procesos").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_add_rejects_huge_times() {
    let app = app();
    for pid in 1..=3 {
        let body = json!({"PID": pid, "tiempo_llegada": 0, "rafaga_cpu": i64::MAX, "usuario": "root"});
        let (status, body) = send(&app, "POST", "/colas/agregar", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_argument");
    }
    let body = json!({"PID": 4, "tiempo_llegada": i64::MAX, "rafaga_cpu": 1, "usuario": "root"});
    let (status, _) = send(&app, "POST", "/colas/agregar", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for name in ["fcfs", "sjf", "rr"] {
        let (status, body) = post(&app, &format!("/planificar/{}", name)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}

#[tokio::test]
async fn test_add_duplicate_pid() {
    let app = demo_app();
    let (status, body) = send(
        &app,
        "POST",
        "/colas/agregar",
        Some(json!({"PID": 1, "tiempo_llegada": 0, "rafaga_cpu": 1, "usuario": "root"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "duplicate_pid");
}

#[tokio::test]
async fn test_block_and_unblock() {
    let app = demo_app();

    let (status, body) = post(&app, "/colas/bloquear").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["PID"], 1);
    assert_eq!(body["Estado"], "Bloqueado");

    let (_, body) = get(&app, "/colas/mostrar").await;
    assert_eq!(body, json!({"cola_listos": [2], "cola_bloqueados": [1]}));

    let (_, body) = get(&app, "/colas/procesos").await;
    assert_eq!(
        body,
        json!([{"PID": 1, "Estado": "Bloqueado"}, {"PID": 2, "Estado": "Listo"}])
    );

    let (status, _) = post(&app, "/colas/desbloquear").await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get(&app, "/colas/mostrar").await;
    assert_eq!(body, json!({"cola_listos": [2, 1], "cola_bloqueados": []}));
}

#[tokio::test]
async fn test_empty_queues() {
    let app = app();
    let (status, body) = post(&app, "/colas/bloquear").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "empty_queue");
    assert_eq!(body["error"], "No hay procesos en la cola de listos");

    let (status, body) = post(&app, "/colas/desbloquear").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No hay procesos en la cola de bloqueados");
}

#[tokio::test]
async fn test_block_by_pid() {
    let app = demo_app();
    let (status, body) = post(&app, "/colas/bloquear?pid=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["PID"], 2);

    let (status, body) = post(&app, "/colas/bloquear?pid=9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");

    let (status, body) = post(&app, "/colas/desbloquear?pid=1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "not_in_queue");

    let (status, _) = post(&app, "/colas/bloquear?pid=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Scheduling
// ============================================================================

#[tokio::test]
async fn test_run_algorithms_on_demo() {
    let app = demo_app();

    let (status, body) = post(&app, "/planificar/fcfs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"pid": 1, "tiempo_llegada": 0, "rafaga_cpu": 5, "tiempo_espera": 0, "tiempo_finalizacion": 5, "tiempo_retorno": 5},
            {"pid": 2, "tiempo_llegada": 0, "rafaga_cpu": 1, "tiempo_espera": 5, "tiempo_finalizacion": 6, "tiempo_retorno": 6}
        ])
    );

    let (_, body) = post(&app, "/planificar/sjf").await;
    assert_eq!(body[0]["pid"], 2);
    assert_eq!(body[1]["tiempo_finalizacion"], 6);

    let (_, body) = post(&app, "/planificar/rr").await;
    assert_eq!(body[0]["pid"], 2);
    assert_eq!(body[0]["tiempo_finalizacion"], 3);
    assert_eq!(body[1]["tiempo_finalizacion"], 6);
}

#[tokio::test]
async fn test_runs_do_not_change_queues() {
    let app = demo_app();
    post(&app, "/planificar/rr").await;
    let (_, body) = get(&app, "/colas/procesos").await;
    assert_eq!(
        body,
        json!([{"PID": 1, "Estado": "Listo"}, {"PID": 2, "Estado": "Listo"}])
    );
}

#[tokio::test]
async fn test_summary() {
    let app = demo_app();
    let (status, body) = get(&app, "/planificar/sjf/resumen").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "algoritmo": "sjf",
            "procesos": 2,
            "espera_promedio": 0.5,
            "retorno_promedio": 3.5,
            "tiempo_total": 6
        })
    );
}

#[tokio::test]
async fn test_unknown_algorithm_and_empty_queue() {
    let app = app();
    let (status, body) = post(&app, "/planificar/lottery").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_argument");

    let (status, body) = post(&app, "/planificar/fcfs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

// ============================================================================
// Filesystem
// ============================================================================

#[tokio::test]
async fn test_session_reads() {
    let app = app();
    assert_eq!(get(&app, "/fs/pwd").await.1, json!({"pwd": "/"}));
    assert_eq!(
        get(&app, "/fs/users").await.1,
        json!({"users": ["root", "usuario1", "usuario2"]})
    );
    assert_eq!(get(&app, "/fs/current-user").await.1, json!({"username": "root"}));
}

#[tokio::test]
async fn test_su() {
    let app = app();
    let (status, _) = post(&app, "/fs/su?username=usuario1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(get(&app, "/fs/current-user").await.1["username"], "usuario1");

    let (status, body) = post(&app, "/fs/su?username=nadie").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "unknown_user");
    assert_eq!(get(&app, "/fs/current-user").await.1["username"], "usuario1");
}

#[tokio::test]
async fn test_mkdir_create_ls_read() {
    let app = app();
    let (status, body) = post(&app, "/fs/mkdir?ruta=/a&permisos=750").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["mensaje"].is_string());

    let (status, _) = post(&app, "/fs/create?ruta=/a/b.txt&contenido=hola").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/fs/ls?ruta=/a").await;
    assert_eq!(
        body,
        json!({"contenido": [
            {"nombre": "b.txt", "tipo": "archivo", "propietario": "root", "permisos": "644", "tamanio": 4}
        ]})
    );

    let (_, body) = get(&app, "/fs/ls").await;
    let names: Vec<&str> = body["contenido"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a", "home", "tmp"]);

    let (_, body) = get(&app, "/fs/read?ruta=/a/b.txt").await;
    assert_eq!(body, json!({"contenido": "hola"}));

    let (status, _) = post(&app, "/fs/write?ruta=/a/b.txt&texto=adios").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(get(&app, "/fs/read?ruta=/a/b.txt").await.1["contenido"], "adios");
}

#[tokio::test]
async fn test_fs_errors() {
    let app = app();
    let (status, body) = post(&app, "/fs/mkdir?ruta=/x&permisos=rwx").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_argument");

    let (status, body) = get(&app, "/fs/ls?ruta=/nada").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");

    let (status, body) = post(&app, "/fs/mkdir?ruta=/tmp").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "already_exists");

    let (status, _) = post(&app, "/fs/mkdir").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_permission_denied() {
    let app = app();
    post(&app, "/fs/su?username=usuario1").await;

    let (status, body) = post(&app, "/fs/mkdir?ruta=/prohibido").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "permission_denied");

    let (status, _) = post(&app, "/fs/rm?ruta=/home/usuario2").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = post(&app, "/fs/mkdir?ruta=/home/usuario1/proyectos").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cd_and_rm() {
    let app = app();
    let (status, body) = post(&app, "/fs/cd?ruta=/home/usuario1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pwd"], "/home/usuario1");

    post(&app, "/fs/mkdir?ruta=docs").await;
    let (_, body) = get(&app, "/fs/ls?ruta=.").await;
    assert_eq!(body["contenido"][0]["nombre"], "docs");

    let (status, _) = post(&app, "/fs/rm?ruta=docs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(get(&app, "/fs/ls").await.1, json!({"contenido": []}));

    let (_, body) = post(&app, "/fs/cd?ruta=..").await;
    assert_eq!(body["pwd"], "/home");
}

#[tokio::test]
async fn test_stat_chmod_chown() {
    let app = app();
    post(&app, "/fs/create?ruta=/tmp/f").await;

    let (status, _) = post(&app, "/fs/chown?ruta=/tmp/f&username=usuario2").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post(&app, "/fs/chmod?ruta=/tmp/f&permisos=600").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/fs/stat?ruta=/tmp/f").await;
    assert_eq!(
        body,
        json!({"nombre": "f", "tipo": "archivo", "propietario": "usuario2", "permisos": "600", "tamanio": 0})
    );

    post(&app, "/fs/su?username=usuario1").await;
    let (status, _) = get(&app, "/fs/read?ruta=/tmp/f").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = post(&app, "/fs/chmod?ruta=/tmp/f&permisos=777").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
