use actix_web::middleware::{from_fn, NormalizePath};
use actix_web::{web, App, HttpServer};
use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use recipes::api::configure_api_routes;
use recipes::api::json_extractor_config;
use recipes::api::method_override::method_override;
use recipes::cli::CLIArgs;
use recipes::logging::initialize_tracing;
use recipes::state::ApplicationStateInner;
use recipes_configuration::Configuration;
use tracing::info;



#[tokio::main]
async fn main() -> Result<()> {
    #[cfg(feature = "with_test_facilities")]
    {
        println!("-------------------------------------");
        println!("THIS IS AN INCREDIBLY IMPORTANT ERROR");
        println!("-------------------------------------");
        println!(
            "THIS BINARY HAS BEEN COMPILED WITH THE with_test_facilities FEATURE FLAG, \n\
            WHICH MEANS IT SHOULD ONLY BE USED FOR TESTING. IF YOU USE THIS IN PRODUCTION, \n\
            ANYONE CAN WIPE YOUR DATABASE REMOTELY. YOU HAVE BEEN WARNED"
        );
        println!("-------------------------------------");
        println!("THIS IS AN INCREDIBLY IMPORTANT ERROR");
        println!("-------------------------------------");
    }


    // Parse CLI arguments.
    let arguments = CLIArgs::parse();

    // Load configuration.
    let configuration = match arguments.configuration_file_path.as_ref() {
        Some(path) => {
            println!("Loading configuration: {}", path.display());
            Configuration::load_from_path(path)
        }
        None => {
            println!("Loading configuration at default path.");
            Configuration::load_from_default_path()
        }
    }
    .into_diagnostic()
    .wrap_err("Failed to load configuration file.")?;


    configuration
        .logging
        .create_log_file_output_directory_if_missing()
        .into_diagnostic()
        .wrap_err("Failed to create log file output directory.")?;

    let guard = initialize_tracing(
        configuration.logging.console_output_level_filter(),
        configuration.logging.log_file_output_level_filter(),
        &configuration.logging.log_file_output_directory,
        "recipes.log",
    )
    .wrap_err("Failed to initialize tracing.")?;

    info!(
        file_path = configuration.configuration_file_path.to_string_lossy().as_ref(),
        "Configuration loaded."
    );


    // Initialize database connection pool and other static structs.
    let state = web::Data::new(
        ApplicationStateInner::new(configuration.clone())
            .await
            .into_diagnostic()
            .wrap_err("Failed to initialize application state.")?,
    );

    if arguments.apply_pending_migrations {
        let mut database_connection = state
            .acquire_database_connection()
            .await
            .into_diagnostic()
            .wrap_err("Failed to acquire database connection for migrations.")?;

        recipes_migrations::apply_pending_migrations(&mut database_connection)
            .await
            .into_diagnostic()
            .wrap_err("Failed to apply pending database migrations.")?;
    }


    // Initialize and start the actix HTTP server.
    #[rustfmt::skip]
    #[allow(clippy::let_and_return)]
    let server = HttpServer::new(move || {
        // FIXME Modify permissive CORS to something more safe in production.
        let cors = actix_cors::Cors::permissive().expose_headers(vec![
            "Date",
            "Content-Type",
            "Content-Length",
            "Location",
        ]);

        #[allow(unused_mut)]
        let mut app = App::new()
            .wrap(from_fn(method_override))
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(json_extractor_config())
            .app_data(state.clone())
            .configure(configure_api_routes);

        #[cfg(feature = "with_test_facilities")]
        {
            app = app.service(recipes::testing::testing_router());
        }

        app
    })
        .bind((
            configuration.http.host.as_str(),
            configuration.http.port,
        ))
        .into_diagnostic()
        .wrap_err("Failed to set up actix HTTP server.")?;

    info!(
        host = configuration.http.host.as_str(),
        port = configuration.http.port,
        "HTTP server initialized and running."
    );

    // Run HTTP server until stopped.
    server
        .run()
        .await
        .into_diagnostic()
        .wrap_err("Errored while running actix HTTP server.")?;


    drop(guard);

    Ok(())
}
