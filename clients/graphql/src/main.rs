use actix_cors::Cors;
use actix_web::{
    get,
    middleware::{self, Condition},
    route,
    web::{self, Data},
    App, HttpResponse, HttpServer, Responder,
};
use actix_web_lab::respond::Html;
use clap::Parser;
use database::database::{
    database::{Database, DatabaseOptions},
    request_manager::RequestManager,
};
use juniper::http::{graphiql::graphiql_source, GraphQLRequest};
use std::{io, sync::Arc, time::Duration};

use crate::schema::{create_schema, GraphQLContext, Schema};

mod schema;

/// GraphiQL playground UI
#[get("/graphiql")]
async fn graphql_playground() -> impl Responder {
    Html(graphiql_source("/graphql", None))
}

/// GraphQL endpoint -- triggered once per request
#[route("/graphql", method = "GET", method = "POST")]
async fn graphql(
    schema: web::Data<Schema>,
    request_manager_ref: web::Data<RequestManager>,
    data: web::Json<GraphQLRequest>,
) -> impl Responder {
    let graphql_context = GraphQLContext {
        request_manager: request_manager_ref.as_ref().clone(),
    };

    let response = data.execute(&schema, &graphql_context).await;

    HttpResponse::Ok().json(response)
}

/// 📇 Phonebook GraphQL Server, query and edit an in-memory list of people
#[derive(Parser, Debug)]
struct Cli {
    /// Port the graphql server will run on
    #[clap(short, long, default_value = "4000")]
    port: u16,

    /// Address the graphql server will run on
    #[clap(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Logs every HTTP request
    #[clap(long)]
    log_http: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,

    /// Starts with an empty list of people instead of the seed people
    #[clap(long)]
    no_seed: bool,

    /// How long a request waits on the database before failing
    #[clap(long, default_value_t = 2000)]
    request_timeout_ms: u64,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let database_options = DatabaseOptions::default()
        .set_seed(!args.no_seed)
        .set_request_timeout(Duration::from_millis(args.request_timeout_ms));

    let request_manager = Database::new(database_options).run();

    // Set up Ctrl-C handler
    let set_handler_request_manager = request_manager.clone();

    ctrlc::set_handler(move || {
        match set_handler_request_manager.send_shutdown_request() {
            Ok(shutdown_response) => log::info!("Shutting down server: {}", shutdown_response),
            Err(err) => log::error!("Failed to shutdown database: {}", err),
        }

        std::process::exit(0);
    })
    .expect("Error setting Ctrl-C handler");

    // Create Juniper schema
    let schema = Arc::new(create_schema());

    log::info!("starting HTTP server on port {}.", args.port);

    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        args.address,
        args.port
    );

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(Data::from(schema.clone()))
            .app_data(web::Data::new(request_manager.clone()))
            .service(graphql)
            .service(graphql_playground)
            .wrap(Cors::permissive())
            .wrap(Condition::new(args.log_http, middleware::Logger::default()))
    })
    .workers(args.http_workers)
    .bind((args.address, args.port))?
    .run()
    .await
}
