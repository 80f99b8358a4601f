use actix_web::{web, App, HttpResponse, HttpServer};
use hello_dapp::rpc::UpstreamRpc;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

/// Wrap an upstream implementation the way the relay registers it.
pub fn shared<U: UpstreamRpc + 'static>(upstream: U) -> web::Data<Arc<dyn UpstreamRpc>> {
    web::Data::new(Arc::new(upstream) as Arc<dyn UpstreamRpc>)
}

/// Spawns an Anvil process on a free port and returns the process handle and the RPC URL.
///
/// # Panics
///
/// Panics if it fails to bind to a free port or spawn Anvil.
pub fn spawn_anvil() -> (Child, String) {
    // Bind to a free port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind to port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let rpc_url = format!("http://127.0.0.1:{}", port);

    let child = Command::new("anvil")
        .arg("-p")
        .arg(port.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn anvil");

    // Wait a moment to ensure Anvil is up and running
    sleep(Duration::from_secs(1));

    (child, rpc_url)
}

/// Node that answers every JSON-RPC call with an error response.
async fn answer_with_error(request: web::Json<Value>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "jsonrpc": "2.0",
        "id": request["id"],
        "error": { "code": -32000, "message": "gas price unavailable" }
    }))
}

/// Starts a node stub on a free port that rejects every call, returning its URL.
///
/// # Panics
///
/// Panics if it fails to bind to a free port.
pub fn spawn_erroring_node() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind to port");
    let port = listener.local_addr().unwrap().port();

    let server = HttpServer::new(|| App::new().route("/", web::post().to(answer_with_error)))
        .workers(1)
        .disable_signals()
        .listen(listener)
        .expect("Failed to listen")
        .run();
    actix_web::rt::spawn(server);

    format!("http://127.0.0.1:{}", port)
}
