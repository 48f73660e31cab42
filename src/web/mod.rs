mod handlers;
mod state;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

pub use state::AppState;

pub async fn start_server(state: AppState, port: u16) -> std::io::Result<()> {
    let data = web::Data::new(state);

    tracing::info!(port, "starting land-use treemap server");
    println!("Serving land-use treemap data on http://localhost:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(handlers::configure)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
