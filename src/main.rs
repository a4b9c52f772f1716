/// Voice Comment Service - HTTP Server
///
/// Users, questions, and the voice-comment ingestion pipeline behind one
/// actix-web app.
use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use tracing_subscriber::EnvFilter;

use voice_comment_service::db;
use voice_comment_service::handlers;
use voice_comment_service::jobs::placeholder_sweeper::start_placeholder_sweeper;
use voice_comment_service::services::{FfmpegTransform, S3Storage, VoiceCommentPipeline};
use voice_comment_service::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("Failed to load configuration");
    let bind_address = format!("{}:{}", config.app.host, config.app.port);

    let db_pool = db::create_pool(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to database");
    db::run_migrations(&db_pool)
        .await
        .expect("Failed to run migrations");

    let storage = S3Storage::new(config.s3.clone())
        .await
        .expect("Failed to initialize S3 client");
    let transform = FfmpegTransform::new(config.transform.clone());
    let pipeline = VoiceCommentPipeline::new(
        db_pool.clone(),
        Arc::new(storage),
        Arc::new(transform),
        &config.upload,
    );

    tokio::spawn(start_placeholder_sweeper(
        db_pool.clone(),
        config.upload.sweep_interval(),
        config.upload.placeholder_max_age(),
    ));

    tracing::info!(%bind_address, env = %config.app.env, "Voice comment service starting");

    let config_http = config.clone();
    HttpServer::new(move || {
        let cors = if config_http.cors.allowed_origins.iter().any(|o| o == "*") {
            Cors::permissive()
        } else {
            let mut cors = Cors::default().allow_any_method().allow_any_header();
            for origin in &config_http.cors.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .app_data(web::Data::new(config_http.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(pipeline.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .route(
                "/api/v1/health",
                web::get().to(|| async {
                    HttpResponse::Ok().json(serde_json::json!({
                        "status": "ok",
                        "service": "voice-comment-service",
                        "version": env!("CARGO_PKG_VERSION")
                    }))
                }),
            )
            .route(
                "/api/v1/health/ready",
                web::get().to(|| async { HttpResponse::Ok().finish() }),
            )
            .route(
                "/api/v1/health/live",
                web::get().to(|| async { HttpResponse::Ok().finish() }),
            )
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/users")
                            // registered before /{user_id} so the literal
                            // segment wins
                            .route("/comments", web::get().to(handlers::get_question_comments))
                            .route("", web::post().to(handlers::create_user))
                            .route("/{user_id}", web::get().to(handlers::get_user))
                            .route(
                                "/{user_id}/questions",
                                web::get().to(handlers::get_user_questions),
                            ),
                    )
                    .service(
                        web::scope("/questions")
                            .route("", web::post().to(handlers::create_question))
                            .route("/url", web::get().to(handlers::get_question_url)),
                    )
                    .service(
                        web::scope("/comments")
                            .route("/voice", web::post().to(handlers::create_voice_comment)),
                    ),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
