use dotenvy::dotenv;

use learnroot::cli;
use learnroot::logging::init_tracing;
use learnroot::router::init_router;
use learnroot::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "create-admin" {
        handle_create_admin(args).await;
        return;
    }

    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind to port {port}: {e}");
            std::process::exit(1);
        }
    };

    println!("🚀 Server running on http://localhost:{port}");
    println!("📚 Swagger UI available at http://localhost:{port}/swagger-ui");
    println!("📖 Scalar UI available at http://localhost:{port}/scalar");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}

async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 5 {
        eprintln!("Usage: {} create-admin <name> <email> <password>", args[0]);
        std::process::exit(1);
    }

    let name = &args[2];
    let email = &args[3];
    let password = &args[4];

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL must be set");
            std::process::exit(1);
        }
    };

    let pool = match sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    // Make seeding work against a fresh database too
    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        eprintln!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    match cli::create_super_admin(&pool, name, email, password).await {
        Ok(_) => {
            println!("✅ Super admin created successfully!");
            println!("   Email: {}", email);
            println!("   Name: {}", name);
        }
        Err(e) => {
            eprintln!("❌ Error creating super admin: {}", e);
            std::process::exit(1);
        }
    }
}
