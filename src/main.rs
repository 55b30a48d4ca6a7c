use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::env;

use staffdesk_backend::db;
use staffdesk_backend::handlers;
use staffdesk_backend::services::employee::EmployeeService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let pool = db::create_pool().await;
    let service = EmployeeService::new(pool);

    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!("Starting server at {bind_address}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(service.clone()))
            .configure(handlers::employee::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
